//! View runtime binding engine notifications to the hosting view.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};
use tokio::sync::broadcast::{error::RecvError, Receiver, Sender};

use crate::action::{ActionRouter, SwipeDirection};
use crate::config::Config;
use crate::engine::PlaybackEngine;
use crate::progress_scheduler::ProgressScheduler;
use crate::protocol::{
    EngineEvent, MediaQuery, Message, NoticeMessage, PlaylistTask, PlaylistTaskKind, Song,
    TaskMessage, ToastDuration, ViewMessage,
};
use crate::state;
use crate::state_clock::StateClock;
use crate::view::PlaybackStateView;

/// Binds the playback engine to a hosting view.
///
/// Runs one blocking loop that serializes every user-visible mutation:
/// engine notifications pass through the state clock gate, view commands
/// call into the engine and feed the result state back through the same
/// gate stamped with the current time, and worker notices are forwarded to
/// the view sink. Deferred playlist and delete requests are handed to the
/// task worker queue and never block this loop.
pub struct PlaybackViewManager {
    bus_consumer: Receiver<Message>,
    engine: Arc<dyn PlaybackEngine>,
    view: Arc<dyn PlaybackStateView>,
    clock: StateClock,
    progress: ProgressScheduler,
    actions: ActionRouter,
    task_producer: mpsc::Sender<TaskMessage>,
}

impl PlaybackViewManager {
    pub fn new(
        bus_consumer: Receiver<Message>,
        bus_producer: Sender<Message>,
        engine: Arc<dyn PlaybackEngine>,
        view: Arc<dyn PlaybackStateView>,
        config: &Config,
        task_producer: mpsc::Sender<TaskMessage>,
    ) -> Self {
        let progress =
            ProgressScheduler::new(Arc::clone(&engine), Arc::clone(&view), bus_producer);
        Self {
            bus_consumer,
            engine,
            view,
            clock: StateClock::new(),
            progress,
            actions: ActionRouter::from_config(config),
            task_producer,
        }
    }

    /// Starts the blocking view runtime loop.
    pub fn run(&mut self) {
        info!("PlaybackViewManager: started");
        self.sync_with_engine();
        loop {
            match self.bus_consumer.blocking_recv() {
                Ok(message) => self.handle_message(message),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("PlaybackViewManager: bus lagged by {} messages", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    /// Adopts the engine's current song and state before processing events.
    pub fn sync_with_engine(&mut self) {
        let song = self.engine.song(0);
        self.apply_song(Instant::now(), song);
        let state = self.engine.state();
        self.apply_state(Instant::now(), state);
    }

    fn handle_message(&mut self, message: Message) {
        match message {
            Message::Engine(EngineEvent::StateChanged { uptime, state }) => {
                self.apply_state(uptime, state);
            }
            Message::Engine(EngineEvent::SongChanged { uptime, song }) => {
                self.apply_song(uptime, song);
            }
            Message::Engine(EngineEvent::QueueChanged) => self.view.on_queue_changed(),
            Message::View(view_message) => self.handle_view_message(view_message),
            Message::Notice(NoticeMessage::ResultToast { text, duration }) => {
                self.view.on_result_message(&text, duration);
            }
            Message::Notice(NoticeMessage::PlaylistChanged) => self.view.on_queue_changed(),
        }
    }

    fn handle_view_message(&mut self, message: ViewMessage) {
        match message {
            ViewMessage::Resume => self.progress.on_resume(),
            ViewMessage::Pause => self.progress.on_pause(),
            ViewMessage::PlayPause => {
                let new_state = self.engine.play_pause();
                self.apply_local_state(new_state);
            }
            ViewMessage::NextSong => {
                let song = self.engine.shift_current_song(1);
                self.apply_song(Instant::now(), song);
            }
            ViewMessage::PreviousSong => {
                let song = self.engine.rewind_current_song();
                self.apply_song(Instant::now(), song);
            }
            ViewMessage::CycleShuffle => {
                let new_state = self.engine.cycle_shuffle();
                self.apply_local_state(new_state);
            }
            ViewMessage::CycleFinishAction => {
                let new_state = self.engine.cycle_finish_action();
                self.apply_local_state(new_state);
            }
            ViewMessage::SetShuffleMode(mode) => {
                let new_state = self.engine.set_shuffle_mode(mode);
                self.apply_local_state(new_state);
            }
            ViewMessage::SetFinishAction(action) => {
                let new_state = self.engine.set_finish_action(action);
                self.apply_local_state(new_state);
            }
            ViewMessage::SwipeUp => {
                self.actions.perform(SwipeDirection::Up, self.engine.as_ref());
            }
            ViewMessage::SwipeDown => {
                self.actions.perform(SwipeDirection::Down, self.engine.as_ref());
            }
            ViewMessage::ClearQueue => self.engine.clear_queue(),
            ViewMessage::EmptyQueue => self.engine.empty_queue(),
            ViewMessage::JumpToPosition { position_ms } => {
                self.progress.jump_to_position(position_ms);
            }
            ViewMessage::SeekDragStart => self.progress.on_drag_start(),
            ViewMessage::SeekDragMove { permille } => self.progress.on_drag_move(permille),
            ViewMessage::SeekDragEnd => self.progress.on_drag_end(),
            ViewMessage::ProgressTick { generation } => {
                self.progress.on_tick_message(generation);
            }
            ViewMessage::CommitSeek {
                permille,
                generation,
            } => self.progress.on_commit_seek(permille, generation),
            ViewMessage::SubmitPlaylistTask {
                playlist_id,
                name,
                query,
            } => self.submit_playlist_task(playlist_id, name, query),
            ViewMessage::RemoveFromPlaylist {
                playlist_id,
                name,
                audio_ids,
            } => {
                let mut task = PlaylistTask::new(playlist_id, &name);
                task.audio_ids = Some(audio_ids);
                let _ = self.task_producer.send(TaskMessage::RemoveFromPlaylist(task));
            }
            ViewMessage::RenamePlaylist { playlist_id, name } => {
                let task = PlaylistTask::new(playlist_id, &name);
                let _ = self.task_producer.send(TaskMessage::RenamePlaylist(task));
            }
            ViewMessage::DeleteMedia(descriptor) => {
                let _ = self.task_producer.send(TaskMessage::DeleteMedia(descriptor));
            }
        }
    }

    /// Routes an add request to the worker, creating the playlist first
    /// when the target id is negative.
    fn submit_playlist_task(&mut self, playlist_id: i64, name: String, query: Option<MediaQuery>) {
        let mut task = PlaylistTask::new(playlist_id, &name);
        let next = match query {
            Some(query) => {
                task.query = Some(query);
                PlaylistTaskKind::AddToPlaylist
            }
            // No source selection: snapshot the engine queue instead.
            None => PlaylistTaskKind::AddQueueToPlaylist,
        };

        let message = if task.playlist_id < 0 {
            TaskMessage::CreatePlaylist { task, next }
        } else {
            match next {
                PlaylistTaskKind::AddToPlaylist => TaskMessage::AddToPlaylist(task),
                PlaylistTaskKind::AddQueueToPlaylist => TaskMessage::AddQueueToPlaylist(task),
            }
        };
        let _ = self.task_producer.send(message);
    }

    fn apply_state(&mut self, uptime: Instant, new_state: u32) {
        if let Some(change) = self.clock.apply_state(uptime, new_state) {
            self.progress.on_state_changed(state::is_playing(change.state));
            self.view.on_state_changed(change.state, change.toggled);
        }
    }

    fn apply_song(&mut self, uptime: Instant, song: Option<Song>) {
        if let Some(song) = self.clock.apply_song(uptime, song) {
            let duration_ms = song.as_ref().map_or(0, |song| song.duration_ms);
            self.progress.on_song_changed(duration_ms);
            self.view.on_song_changed(song.as_ref());
        }
    }

    /// Applies the result of a locally-initiated transport call, stamped
    /// with the current time so a late engine notification carrying an
    /// older timestamp cannot undo it.
    fn apply_local_state(&mut self, new_state: u32) {
        if state::has_error(new_state) {
            let text = self
                .engine
                .error_message()
                .unwrap_or_else(|| "Playback failed".to_string());
            self.view.on_result_message(&text, ToastDuration::Long);
        }
        self.apply_state(Instant::now(), new_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::protocol::MediaKind;
    use crate::state::{FLAG_ERROR, FLAG_PLAYING};
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;
    use tokio::sync::broadcast;

    #[derive(Debug, Clone, PartialEq)]
    enum EngineCall {
        PlayPause,
        SeekToProgress(u32),
        SeekToPosition(u64),
        PerformAction(Action),
        ClearQueue,
        EmptyQueue,
    }

    struct MockEngine {
        state: Mutex<u32>,
        position_ms: Mutex<u64>,
        calls: Mutex<Vec<EngineCall>>,
    }

    impl MockEngine {
        fn new(state: u32, position_ms: u64) -> Self {
            Self {
                state: Mutex::new(state),
                position_ms: Mutex::new(position_ms),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<EngineCall> {
            self.calls.lock().expect("engine calls lock poisoned").clone()
        }

        fn record(&self, call: EngineCall) {
            self.calls
                .lock()
                .expect("engine calls lock poisoned")
                .push(call);
        }
    }

    impl PlaybackEngine for MockEngine {
        fn state(&self) -> u32 {
            *self.state.lock().expect("engine state lock poisoned")
        }
        fn position_ms(&self) -> u64 {
            *self.position_ms.lock().expect("engine position lock poisoned")
        }
        fn song(&self, _delta: i32) -> Option<Song> {
            None
        }
        fn song_at_queue_position(&self, _position: usize) -> Option<Song> {
            None
        }
        fn play_pause(&self) -> u32 {
            self.record(EngineCall::PlayPause);
            let mut state = self.state.lock().expect("engine state lock poisoned");
            *state ^= FLAG_PLAYING;
            *state
        }
        fn shift_current_song(&self, _delta: i32) -> Option<Song> {
            Some(test_song(2))
        }
        fn rewind_current_song(&self) -> Option<Song> {
            Some(test_song(1))
        }
        fn cycle_shuffle(&self) -> u32 {
            self.state()
        }
        fn cycle_finish_action(&self) -> u32 {
            self.state()
        }
        fn set_shuffle_mode(&self, _mode: u32) -> u32 {
            self.state()
        }
        fn set_finish_action(&self, _action: u32) -> u32 {
            self.state()
        }
        fn seek_to_position(&self, position_ms: u64) {
            self.record(EngineCall::SeekToPosition(position_ms));
        }
        fn seek_to_progress(&self, permille: u32) {
            self.record(EngineCall::SeekToProgress(permille));
        }
        fn delete_media(&self, _kind: MediaKind, _id: i64) -> usize {
            0
        }
        fn clear_queue(&self) {
            self.record(EngineCall::ClearQueue);
        }
        fn empty_queue(&self) {
            self.record(EngineCall::EmptyQueue);
        }
        fn perform_action(&self, action: Action) {
            self.record(EngineCall::PerformAction(action));
        }
        fn error_message(&self) -> Option<String> {
            Some("playback failed: unreadable file".to_string())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum ViewEvent {
        State(u32, u32),
        Song(Option<i64>),
        Queue,
        SeekProgress(u32),
        Elapsed(String),
        DurationText(String),
        Toast(String, ToastDuration),
    }

    #[derive(Default)]
    struct RecordingView {
        events: Mutex<Vec<ViewEvent>>,
    }

    impl RecordingView {
        fn events(&self) -> Vec<ViewEvent> {
            self.events.lock().expect("view events lock poisoned").clone()
        }

        fn record(&self, event: ViewEvent) {
            self.events
                .lock()
                .expect("view events lock poisoned")
                .push(event);
        }
    }

    impl PlaybackStateView for RecordingView {
        fn on_state_changed(&self, state: u32, toggled: u32) {
            self.record(ViewEvent::State(state, toggled));
        }
        fn on_song_changed(&self, song: Option<&Song>) {
            self.record(ViewEvent::Song(song.map(|song| song.id)));
        }
        fn on_queue_changed(&self) {
            self.record(ViewEvent::Queue);
        }
        fn on_seek_progress(&self, permille: u32) {
            self.record(ViewEvent::SeekProgress(permille));
        }
        fn on_elapsed_time(&self, text: &str) {
            self.record(ViewEvent::Elapsed(text.to_string()));
        }
        fn on_duration_time(&self, text: &str) {
            self.record(ViewEvent::DurationText(text.to_string()));
        }
        fn on_result_message(&self, text: &str, duration: ToastDuration) {
            self.record(ViewEvent::Toast(text.to_string(), duration));
        }
    }

    fn test_song(id: i64) -> Song {
        Song {
            id,
            title: format!("Song {}", id),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_ms: 200_000,
            path: PathBuf::from(format!("/music/{}.flac", id)),
            album_id: 1,
            artist_id: 1,
        }
    }

    struct ManagerHarness {
        bus_sender: broadcast::Sender<Message>,
        engine: Arc<MockEngine>,
        view: Arc<RecordingView>,
        task_receiver: mpsc::Receiver<TaskMessage>,
    }

    impl ManagerHarness {
        fn new(engine: MockEngine) -> Self {
            Self::with_config(engine, Config::default())
        }

        fn with_config(engine: MockEngine, config: Config) -> Self {
            let _ = colog::default_builder().try_init();
            let (bus_sender, bus_receiver) = broadcast::channel(1024);
            let (task_sender, task_receiver) = mpsc::channel();
            let engine = Arc::new(engine);
            let view = Arc::new(RecordingView::default());

            let manager_engine: Arc<dyn PlaybackEngine> = engine.clone();
            let manager_view: Arc<dyn PlaybackStateView> = view.clone();
            let manager_bus_sender = bus_sender.clone();
            thread::spawn(move || {
                let mut manager = PlaybackViewManager::new(
                    bus_receiver,
                    manager_bus_sender,
                    manager_engine,
                    manager_view,
                    &config,
                    task_sender,
                );
                manager.run();
            });

            let harness = Self {
                bus_sender,
                engine,
                view,
                task_receiver,
            };
            // The manager adopts the engine state before its loop starts;
            // wait for that so timestamps fabricated by tests come later.
            harness.flush();
            harness
        }

        fn send(&self, message: Message) {
            self.bus_sender
                .send(message)
                .expect("failed to send message to bus");
        }

        /// Sends a queue-changed probe and waits until its callback shows
        /// up, proving everything sent before it has been processed.
        fn flush(&self) {
            let before = self
                .view
                .events()
                .iter()
                .filter(|event| **event == ViewEvent::Queue)
                .count();
            self.send(Message::Engine(EngineEvent::QueueChanged));
            self.wait_until(Duration::from_secs(1), |harness| {
                harness
                    .view
                    .events()
                    .iter()
                    .filter(|event| **event == ViewEvent::Queue)
                    .count()
                    > before
            });
        }

        fn wait_until<F>(&self, timeout: Duration, mut predicate: F)
        where
            F: FnMut(&Self) -> bool,
        {
            let start = Instant::now();
            loop {
                if predicate(self) {
                    return;
                }
                if start.elapsed() > timeout {
                    panic!("timed out waiting for condition");
                }
                thread::sleep(Duration::from_millis(5));
            }
        }

        fn last_state_event(&self) -> Option<(u32, u32)> {
            self.view.events().iter().rev().find_map(|event| match event {
                ViewEvent::State(state, toggled) => Some((*state, *toggled)),
                _ => None,
            })
        }

        fn state_event_count(&self) -> usize {
            self.view
                .events()
                .iter()
                .filter(|event| matches!(event, ViewEvent::State(..)))
                .count()
        }

        fn elapsed_event_count(&self) -> usize {
            self.view
                .events()
                .iter()
                .filter(|event| matches!(event, ViewEvent::Elapsed(_)))
                .count()
        }
    }

    #[test]
    fn test_stale_engine_state_event_is_dropped() {
        let harness = ManagerHarness::new(MockEngine::new(0, 0));
        let base = Instant::now();

        harness.send(Message::Engine(EngineEvent::StateChanged {
            uptime: base + Duration::from_millis(50),
            state: FLAG_PLAYING,
        }));
        harness.flush();
        assert_eq!(harness.last_state_event(), Some((FLAG_PLAYING, FLAG_PLAYING)));
        let count = harness.state_event_count();

        // Older event arriving late must not regress the displayed state.
        harness.send(Message::Engine(EngineEvent::StateChanged {
            uptime: base,
            state: 0,
        }));
        harness.flush();
        assert_eq!(harness.state_event_count(), count);
        assert_eq!(harness.last_state_event(), Some((FLAG_PLAYING, FLAG_PLAYING)));
    }

    #[test]
    fn test_local_change_beats_late_engine_notification() {
        let harness = ManagerHarness::new(MockEngine::new(0, 0));
        let before_toggle = Instant::now();

        harness.send(Message::View(ViewMessage::PlayPause));
        harness.flush();
        assert_eq!(harness.last_state_event(), Some((FLAG_PLAYING, FLAG_PLAYING)));
        let count = harness.state_event_count();

        // An engine notification stamped before the local toggle loses.
        harness.send(Message::Engine(EngineEvent::StateChanged {
            uptime: before_toggle,
            state: 0,
        }));
        harness.flush();
        assert_eq!(harness.state_event_count(), count);
    }

    #[test]
    fn test_error_flag_in_local_result_surfaces_toast() {
        let harness = ManagerHarness::new(MockEngine::new(FLAG_ERROR, 0));

        harness.send(Message::View(ViewMessage::PlayPause));
        harness.flush();

        let events = harness.view.events();
        assert!(events.contains(&ViewEvent::Toast(
            "playback failed: unreadable file".to_string(),
            ToastDuration::Long,
        )));
        // The state still updates despite the error bit.
        assert_eq!(
            harness.last_state_event(),
            Some((FLAG_ERROR | FLAG_PLAYING, FLAG_PLAYING))
        );
    }

    #[test]
    fn test_song_change_updates_duration_and_display() {
        let harness = ManagerHarness::new(MockEngine::new(0, 30_000));

        harness.send(Message::Engine(EngineEvent::SongChanged {
            uptime: Instant::now(),
            song: Some(test_song(3)),
        }));
        harness.flush();

        let events = harness.view.events();
        assert!(events.contains(&ViewEvent::DurationText("3:20".to_string())));
        assert!(events.contains(&ViewEvent::Song(Some(3))));
        // 30s into 200s, rounded to permille.
        assert!(events.contains(&ViewEvent::SeekProgress(150)));
        assert!(events.contains(&ViewEvent::Elapsed("0:30".to_string())));
    }

    #[test]
    fn test_pause_stops_self_scheduled_ticks() {
        let harness = ManagerHarness::new(MockEngine::new(FLAG_PLAYING, 500));

        // Playing state arrives; the scheduler starts ticking about once
        // a second.
        harness.send(Message::Engine(EngineEvent::StateChanged {
            uptime: Instant::now(),
            state: FLAG_PLAYING,
        }));
        harness.flush();
        harness.wait_until(Duration::from_secs(2), |harness| {
            harness.elapsed_event_count() >= 2
        });

        harness.send(Message::View(ViewMessage::Pause));
        harness.flush();
        // One tick may already be in flight when the pause lands; after it
        // drains, the count must stay put.
        thread::sleep(Duration::from_millis(200));
        let count = harness.elapsed_event_count();
        thread::sleep(Duration::from_millis(1300));
        assert_eq!(harness.elapsed_event_count(), count);
    }

    #[test]
    fn test_redundant_triggers_keep_one_pending_tick() {
        let harness = ManagerHarness::new(MockEngine::new(FLAG_PLAYING, 500));

        // Each re-announcement refreshes the display immediately and
        // reschedules the wakeup; the superseded sleepers must all be
        // dropped as stale instead of stacking up.
        for _ in 0..3 {
            harness.send(Message::Engine(EngineEvent::SongChanged {
                uptime: Instant::now(),
                song: Some(test_song(6)),
            }));
        }
        harness.flush();

        let count = harness.elapsed_event_count();
        thread::sleep(Duration::from_millis(1200));
        let scheduled = harness.elapsed_event_count() - count;
        assert!(
            (1..=2).contains(&scheduled),
            "expected one self-scheduled refresh, got {}",
            scheduled
        );
    }

    #[test]
    fn test_drag_suppresses_control_and_commits_single_seek() {
        let harness = ManagerHarness::new(MockEngine::new(0, 10_000));

        harness.send(Message::Engine(EngineEvent::SongChanged {
            uptime: Instant::now(),
            song: Some(test_song(4)),
        }));
        harness.flush();
        let progress_count_before_drag = harness
            .view
            .events()
            .iter()
            .filter(|event| matches!(event, ViewEvent::SeekProgress(_)))
            .count();

        harness.send(Message::View(ViewMessage::SeekDragStart));
        for step in 1..=5u32 {
            harness.send(Message::View(ViewMessage::SeekDragMove {
                permille: step * 100,
            }));
            thread::sleep(Duration::from_millis(20));
        }
        harness.send(Message::View(ViewMessage::SeekDragEnd));

        // All five updates fall inside one debounce window; only the last
        // survives, and the engine hears about it exactly once.
        harness.wait_until(Duration::from_secs(1), |harness| {
            harness
                .engine
                .calls()
                .iter()
                .any(|call| matches!(call, EngineCall::SeekToProgress(_)))
        });
        thread::sleep(Duration::from_millis(300));
        let seeks: Vec<EngineCall> = harness
            .engine
            .calls()
            .into_iter()
            .filter(|call| matches!(call, EngineCall::SeekToProgress(_)))
            .collect();
        assert_eq!(seeks, vec![EngineCall::SeekToProgress(500)]);

        // During the drag no seek-control writes happened; the one write
        // after the commit comes from the post-commit refresh.
        let progress_events: Vec<ViewEvent> = harness
            .view
            .events()
            .into_iter()
            .filter(|event| matches!(event, ViewEvent::SeekProgress(_)))
            .collect();
        assert_eq!(progress_events.len(), progress_count_before_drag + 1);
    }

    #[test]
    fn test_drag_preview_updates_elapsed_label() {
        let harness = ManagerHarness::new(MockEngine::new(0, 0));

        harness.send(Message::Engine(EngineEvent::SongChanged {
            uptime: Instant::now(),
            song: Some(test_song(5)),
        }));
        harness.send(Message::View(ViewMessage::SeekDragStart));
        harness.send(Message::View(ViewMessage::SeekDragMove { permille: 500 }));
        harness.flush();

        // 500 permille of 200s previews as 1:40.
        assert!(harness
            .view
            .events()
            .contains(&ViewEvent::Elapsed("1:40".to_string())));
    }

    #[test]
    fn test_swipe_routes_configured_action() {
        let mut config = Config::default();
        config.gestures.swipe_up_action = "next_song".to_string();
        config.gestures.swipe_down_action = "not_a_real_action".to_string();
        let harness = ManagerHarness::with_config(MockEngine::new(0, 0), config);

        harness.send(Message::View(ViewMessage::SwipeUp));
        harness.send(Message::View(ViewMessage::SwipeDown));
        harness.flush();

        let actions: Vec<EngineCall> = harness
            .engine
            .calls()
            .into_iter()
            .filter(|call| matches!(call, EngineCall::PerformAction(_)))
            .collect();
        assert_eq!(
            actions,
            vec![
                EngineCall::PerformAction(Action::NextSong),
                EngineCall::PerformAction(Action::Nothing),
            ]
        );
    }

    #[test]
    fn test_submit_new_playlist_routes_create_chain() {
        let harness = ManagerHarness::new(MockEngine::new(0, 0));

        harness.send(Message::View(ViewMessage::SubmitPlaylistTask {
            playlist_id: -1,
            name: "Fresh".to_string(),
            query: Some(MediaQuery {
                kind: MediaKind::Artist,
                id: 9,
            }),
        }));

        let message = harness
            .task_receiver
            .recv_timeout(Duration::from_secs(1))
            .expect("task worker should receive a message");
        match message {
            TaskMessage::CreatePlaylist { task, next } => {
                assert_eq!(task.playlist_id, -1);
                assert_eq!(task.name, "Fresh");
                assert!(task.query.is_some());
                assert_eq!(next, PlaylistTaskKind::AddToPlaylist);
            }
            other => panic!("expected CreatePlaylist, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_without_query_snapshots_queue() {
        let harness = ManagerHarness::new(MockEngine::new(0, 0));

        harness.send(Message::View(ViewMessage::SubmitPlaylistTask {
            playlist_id: 8,
            name: "Existing".to_string(),
            query: None,
        }));

        let message = harness
            .task_receiver
            .recv_timeout(Duration::from_secs(1))
            .expect("task worker should receive a message");
        assert!(matches!(message, TaskMessage::AddQueueToPlaylist(task) if task.playlist_id == 8));
    }

    #[test]
    fn test_jump_to_position_seeks_and_refreshes() {
        let harness = ManagerHarness::new(MockEngine::new(0, 45_000));

        harness.send(Message::View(ViewMessage::JumpToPosition {
            position_ms: 45_000,
        }));
        harness.flush();

        assert!(harness
            .engine
            .calls()
            .contains(&EngineCall::SeekToPosition(45_000)));
        assert!(harness
            .view
            .events()
            .contains(&ViewEvent::Elapsed("0:45".to_string())));
    }

    #[test]
    fn test_worker_notices_reach_the_view() {
        let harness = ManagerHarness::new(MockEngine::new(0, 0));

        harness.send(Message::Notice(NoticeMessage::ResultToast {
            text: "Added 3 songs to Favorites".to_string(),
            duration: ToastDuration::Short,
        }));
        harness.flush();

        assert!(harness.view.events().contains(&ViewEvent::Toast(
            "Added 3 songs to Favorites".to_string(),
            ToastDuration::Short,
        )));
    }
}
