//! Self-rescheduling elapsed-time refresh loop for the seek control.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::trace;
use tokio::sync::broadcast::Sender;

use crate::engine::PlaybackEngine;
use crate::protocol::{Message, ViewMessage};
use crate::view::PlaybackStateView;

/// Quiet period after the last drag update before a seek is committed.
const SEEK_DEBOUNCE_MS: u64 = 150;

/// Formats a millisecond position as `M:SS`, or `H:MM:SS` past an hour.
pub fn format_elapsed(position_ms: u64) -> String {
    let total_secs = position_ms / 1000;
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Seek-control position for `position_ms` into a `duration_ms` song,
/// rounded to permille and clamped to 0..=1000. Duration 0 maps to 0.
fn progress_permille(position_ms: u64, duration_ms: u64) -> u32 {
    if duration_ms == 0 {
        return 0;
    }
    ((1000 * position_ms + duration_ms / 2) / duration_ms).min(1000) as u32
}

/// Drives periodic elapsed-time refreshes while a song plays.
///
/// Runs entirely on the view runtime thread. Wakeups are posted back to
/// the bus as `ProgressTick`/`CommitSeek` messages carrying a generation
/// counter; bumping the counter cancels anything still in flight, so at
/// most one pending tick and one pending seek commit exist at any time.
pub struct ProgressScheduler {
    engine: Arc<dyn PlaybackEngine>,
    view: Arc<dyn PlaybackStateView>,
    bus_producer: Sender<Message>,
    /// Current song duration in milliseconds.
    duration_ms: u64,
    playing: bool,
    /// True while the hosting view is not visible.
    paused: bool,
    /// True while the user drags the seek control.
    tracking: bool,
    tick_generation: u64,
    seek_generation: u64,
}

impl ProgressScheduler {
    pub fn new(
        engine: Arc<dyn PlaybackEngine>,
        view: Arc<dyn PlaybackStateView>,
        bus_producer: Sender<Message>,
    ) -> Self {
        Self {
            engine,
            view,
            bus_producer,
            duration_ms: 0,
            playing: false,
            paused: false,
            tracking: false,
            tick_generation: 0,
            seek_generation: 0,
        }
    }

    /// The current song changed; adopt its duration and refresh now.
    pub fn on_song_changed(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
        self.view.on_duration_time(&format_elapsed(duration_ms));
        self.tick();
    }

    /// The engine's playing flag changed.
    pub fn on_state_changed(&mut self, playing: bool) {
        self.playing = playing;
        self.tick();
    }

    /// The hosting view became visible again.
    pub fn on_resume(&mut self) {
        self.paused = false;
        self.tick();
    }

    /// The hosting view went invisible; stop refreshing until resumed.
    pub fn on_pause(&mut self) {
        self.paused = true;
        self.cancel_pending_tick();
    }

    /// A scheduled tick arrived from the bus.
    pub fn on_tick_message(&mut self, generation: u64) {
        if generation != self.tick_generation {
            trace!("ProgressScheduler: dropping canceled tick {}", generation);
            return;
        }
        self.tick();
    }

    /// The user grabbed the seek control. Until released, ticks must not
    /// move the control out from under the drag.
    pub fn on_drag_start(&mut self) {
        self.tracking = true;
    }

    /// The user moved the seek control to `permille`. Previews the elapsed
    /// label and (re)arms the debounced seek commit.
    pub fn on_drag_move(&mut self, permille: u32) {
        let permille = permille.min(1000);
        let preview_ms = u64::from(permille) * self.duration_ms / 1000;
        self.view.on_elapsed_time(&format_elapsed(preview_ms));
        self.cancel_pending_tick();
        self.schedule_seek_commit(permille);
    }

    /// The user released the seek control.
    pub fn on_drag_end(&mut self) {
        self.tracking = false;
    }

    /// A debounced seek commit arrived from the bus.
    pub fn on_commit_seek(&mut self, permille: u32, generation: u64) {
        if generation != self.seek_generation {
            trace!("ProgressScheduler: dropping superseded seek {}", generation);
            return;
        }
        self.engine.seek_to_progress(permille);
        self.tick();
    }

    /// Jumps straight to an absolute position.
    pub fn jump_to_position(&mut self, position_ms: u64) {
        self.engine.seek_to_position(position_ms);
        self.tick();
    }

    /// Refreshes the elapsed display and reschedules the next wakeup.
    pub fn tick(&mut self) {
        let position_ms = self.engine.position_ms();

        if !self.tracking {
            self.view
                .on_seek_progress(progress_permille(position_ms, self.duration_ms));
        }
        self.view.on_elapsed_time(&format_elapsed(position_ms));

        if self.playing && !self.paused {
            // Wake up just after the elapsed second flips over.
            self.schedule_tick(1050 - position_ms % 1000);
        } else {
            self.cancel_pending_tick();
        }
    }

    fn cancel_pending_tick(&mut self) {
        self.tick_generation = self.tick_generation.wrapping_add(1);
    }

    fn schedule_tick(&mut self, delay_ms: u64) {
        self.tick_generation = self.tick_generation.wrapping_add(1);
        let generation = self.tick_generation;
        let bus_producer = self.bus_producer.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(delay_ms));
            let _ = bus_producer.send(Message::View(ViewMessage::ProgressTick { generation }));
        });
    }

    fn schedule_seek_commit(&mut self, permille: u32) {
        self.seek_generation = self.seek_generation.wrapping_add(1);
        let generation = self.seek_generation;
        let bus_producer = self.bus_producer.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(SEEK_DEBOUNCE_MS));
            let _ = bus_producer.send(Message::View(ViewMessage::CommitSeek {
                permille,
                generation,
            }));
        });
    }
}
