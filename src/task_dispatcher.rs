//! Ordered worker that executes deferred playlist and delete tasks.

use std::fmt;
use std::fs;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::broadcast;

use crate::engine::PlaybackEngine;
use crate::protocol::{
    MediaDescriptor, Message, NoticeMessage, PlaylistTask, PlaylistTaskKind, TaskMessage,
    ToastDuration,
};
use crate::store::{PlaylistStore, StoreError};

/// Failure raised while executing a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Query-based playlist removal is not supported; submitting one is a
    /// contract violation in the caller, not a user-facing condition.
    UnsupportedQueryRemoval,
    /// The playlist store rejected the operation.
    Store(StoreError),
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::UnsupportedQueryRemoval => {
                write!(f, "removal by query is not supported")
            }
            TaskError::Store(err) => write!(f, "store operation failed: {}", err),
        }
    }
}

impl std::error::Error for TaskError {}

impl From<StoreError> for TaskError {
    fn from(err: StoreError) -> Self {
        TaskError::Store(err)
    }
}

/// Executes task messages one at a time in submission order.
///
/// All store and engine calls happen on the worker thread; user-facing
/// results are published to the bus as notices and never returned to the
/// submitter. A create step chains its follow-up by re-submitting the
/// task to the worker's own queue rather than calling through, so the
/// create is fully applied before the dependent add runs and the queue
/// order stays flat and inspectable.
pub struct TaskDispatcher {
    task_consumer: Receiver<TaskMessage>,
    /// Loopback used by chained create-then-use tasks.
    task_producer: Sender<TaskMessage>,
    bus_producer: broadcast::Sender<Message>,
    engine: Arc<dyn PlaybackEngine>,
    store: Arc<dyn PlaylistStore>,
}

impl TaskDispatcher {
    pub fn new(
        task_consumer: Receiver<TaskMessage>,
        task_producer: Sender<TaskMessage>,
        bus_producer: broadcast::Sender<Message>,
        engine: Arc<dyn PlaybackEngine>,
        store: Arc<dyn PlaylistStore>,
    ) -> Self {
        Self {
            task_consumer,
            task_producer,
            bus_producer,
            engine,
            store,
        }
    }

    /// Starts the blocking worker loop. Returns on
    /// [`TaskMessage::Shutdown`]; a task in flight at that point still
    /// completes. Dropping senders alone never ends the loop because the
    /// dispatcher keeps its own loopback sender alive.
    pub fn run(&mut self) {
        info!("TaskDispatcher: started");
        while let Ok(message) = self.task_consumer.recv() {
            if matches!(message, TaskMessage::Shutdown) {
                break;
            }
            match self.handle_task(message) {
                Ok(()) => {}
                Err(TaskError::UnsupportedQueryRemoval) => {
                    // Contract bug in the submitter; nothing to show the user.
                    error!("TaskDispatcher: {}", TaskError::UnsupportedQueryRemoval);
                }
                Err(TaskError::Store(err)) => {
                    warn!("TaskDispatcher: {}", err);
                    self.notify(
                        format!("Playlist operation failed: {}", err),
                        ToastDuration::Short,
                    );
                }
            }
        }
        debug!("TaskDispatcher: queue closed, stopping");
    }

    fn handle_task(&mut self, message: TaskMessage) -> Result<(), TaskError> {
        match message {
            TaskMessage::CreatePlaylist { mut task, next } => {
                let playlist_id = self.store.create_playlist(&task.name)?;
                debug!(
                    "TaskDispatcher: created playlist {} ({})",
                    task.name, playlist_id
                );
                task.playlist_id = playlist_id;
                let follow_up = match next {
                    PlaylistTaskKind::AddToPlaylist => TaskMessage::AddToPlaylist(task),
                    PlaylistTaskKind::AddQueueToPlaylist => TaskMessage::AddQueueToPlaylist(task),
                };
                let _ = self.task_producer.send(follow_up);
            }
            TaskMessage::AddToPlaylist(task) => self.add_to_playlist(task)?,
            TaskMessage::AddQueueToPlaylist(mut task) => {
                let mut audio_ids = Vec::new();
                let mut position = 0;
                while let Some(song) = self.engine.song_at_queue_position(position) {
                    audio_ids.push(song.id);
                    position += 1;
                }
                task.audio_ids = Some(audio_ids);
                self.add_to_playlist(task)?;
            }
            TaskMessage::RemoveFromPlaylist(task) => self.remove_from_playlist(task)?,
            TaskMessage::RenamePlaylist(task) => {
                self.store.rename_playlist(task.playlist_id, &task.name)?;
            }
            TaskMessage::DeleteMedia(descriptor) => self.delete_media(descriptor),
            TaskMessage::NotifyPlaylistChanged => {
                let _ = self
                    .bus_producer
                    .send(Message::Notice(NoticeMessage::PlaylistChanged));
            }
            // Intercepted by run() before dispatch.
            TaskMessage::Shutdown => {}
        }
        Ok(())
    }

    /// Adds the songs described by `task` to its playlist and reports the
    /// combined count.
    fn add_to_playlist(&mut self, task: PlaylistTask) -> Result<(), TaskError> {
        let mut count = 0;

        if let Some(query) = task.query.as_ref() {
            count += self.store.add_by_query(task.playlist_id, query)?;
        }
        if let Some(audio_ids) = task.audio_ids.as_ref() {
            count += self.store.add_audio_ids(task.playlist_id, audio_ids)?;
        }

        self.notify(
            format!("Added {} to {}", count_songs(count), task.name),
            ToastDuration::Short,
        );
        let _ = self.task_producer.send(TaskMessage::NotifyPlaylistChanged);
        Ok(())
    }

    fn remove_from_playlist(&mut self, task: PlaylistTask) -> Result<(), TaskError> {
        if task.query.is_some() {
            return Err(TaskError::UnsupportedQueryRemoval);
        }

        let mut count = 0;
        if let Some(audio_ids) = task.audio_ids.as_ref() {
            count += self.store.remove_audio_ids(task.playlist_id, audio_ids)?;
        }

        self.notify(
            format!("Removed {} from {}", count_songs(count), task.name),
            ToastDuration::Short,
        );
        let _ = self.task_producer.send(TaskMessage::NotifyPlaylistChanged);
        Ok(())
    }

    /// Deletes the described media object, surfacing exactly one result
    /// message whatever the path taken.
    fn delete_media(&mut self, descriptor: MediaDescriptor) {
        let mut message = None;

        match &descriptor {
            MediaDescriptor::File { path, .. } => {
                if let Err(err) = fs::remove_file(path) {
                    warn!(
                        "TaskDispatcher: failed to delete {}: {}",
                        path.display(),
                        err
                    );
                    message = Some(format!("Unable to delete file {}", path.display()));
                }
            }
            MediaDescriptor::Playlist { id, title } => {
                if let Err(err) = self.store.delete_playlist(*id) {
                    warn!("TaskDispatcher: failed to delete playlist {}: {}", id, err);
                    message = Some(format!("Unable to delete playlist {}", title));
                }
            }
            MediaDescriptor::Media { kind, id, .. } => {
                let count = self.engine.delete_media(*kind, *id);
                message = Some(format!("Deleted {}", count_items(count)));
            }
        }

        let text = message.unwrap_or_else(|| match &descriptor {
            MediaDescriptor::File { title, .. }
            | MediaDescriptor::Playlist { title, .. }
            | MediaDescriptor::Media { title, .. } => format!("Deleted {}", title),
        });
        self.notify(text, ToastDuration::Short);
    }

    fn notify(&self, text: String, duration: ToastDuration) {
        let _ = self
            .bus_producer
            .send(Message::Notice(NoticeMessage::ResultToast {
                text,
                duration,
            }));
    }
}

fn count_songs(count: usize) -> String {
    if count == 1 {
        "1 song".to_string()
    } else {
        format!("{} songs", count)
    }
}

fn count_items(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}
