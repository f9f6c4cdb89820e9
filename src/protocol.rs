//! Event-bus protocol shared by the view runtime components.
//!
//! This module defines all message payloads exchanged between the playback
//! engine adapter, the view runtime, and the background task worker.

use std::path::PathBuf;
use std::time::Instant;

/// Top-level envelope for all bus traffic.
#[derive(Debug, Clone)]
pub enum Message {
    Engine(EngineEvent),
    View(ViewMessage),
    Notice(NoticeMessage),
}

/// Notifications emitted by the playback engine adapter.
///
/// State and song events carry the monotonic time of the engine call that
/// produced them; the view runtime drops anything older than what it has
/// already applied, so out-of-order delivery never regresses the display.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    StateChanged {
        uptime: Instant,
        state: u32,
    },
    SongChanged {
        uptime: Instant,
        song: Option<Song>,
    },
    /// Queue or timeline layout changed (positions, size, ordering).
    QueueChanged,
}

/// Commands and timer wakeups originating from the hosting view.
#[derive(Debug, Clone)]
pub enum ViewMessage {
    /// The hosting view became visible again.
    Resume,
    /// The hosting view is no longer visible; progress refreshes stop.
    Pause,
    PlayPause,
    NextSong,
    PreviousSong,
    CycleShuffle,
    CycleFinishAction,
    SetShuffleMode(u32),
    SetFinishAction(u32),
    SwipeUp,
    SwipeDown,
    ClearQueue,
    EmptyQueue,
    JumpToPosition {
        position_ms: u64,
    },
    SeekDragStart,
    SeekDragMove {
        permille: u32,
    },
    SeekDragEnd,
    /// Self-scheduled elapsed-time refresh. Stale generations are ignored.
    ProgressTick {
        generation: u64,
    },
    /// Debounced seek commit armed by the last drag update.
    CommitSeek {
        permille: u32,
        generation: u64,
    },
    /// Add songs to a playlist, creating it first when `playlist_id` is
    /// negative. Without a query the engine queue is snapshotted instead.
    SubmitPlaylistTask {
        playlist_id: i64,
        name: String,
        query: Option<MediaQuery>,
    },
    RemoveFromPlaylist {
        playlist_id: i64,
        name: String,
        audio_ids: Vec<i64>,
    },
    RenamePlaylist {
        playlist_id: i64,
        name: String,
    },
    DeleteMedia(MediaDescriptor),
}

/// User-facing results published by the background task worker.
#[derive(Debug, Clone)]
pub enum NoticeMessage {
    ResultToast {
        text: String,
        duration: ToastDuration,
    },
    PlaylistChanged,
}

/// Display-time hint for a result toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastDuration {
    Short,
    Long,
}

/// Immutable song descriptor owned by the playback engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    /// Stable song id in the media store.
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
    /// File path on disk.
    pub path: PathBuf,
    pub album_id: i64,
    pub artist_id: i64,
}

/// Media categories understood by the engine and the playlist store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Artist,
    Album,
    Song,
    Playlist,
    Genre,
    File,
}

/// Library selection resolved to concrete songs by the playlist store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaQuery {
    pub kind: MediaKind,
    pub id: i64,
}

/// Deferred playlist mutation request.
///
/// Built by the view layer, consumed once by the task worker. The create
/// step fills in `playlist_id` before re-submitting the follow-up.
#[derive(Debug, Clone)]
pub struct PlaylistTask {
    /// Target playlist id. Negative means "create a new playlist first".
    pub playlist_id: i64,
    /// Playlist name used for creation, renaming, and result messages.
    pub name: String,
    /// Songs selected by a library query, if any.
    pub query: Option<MediaQuery>,
    /// Explicitly selected song ids, if any.
    pub audio_ids: Option<Vec<i64>>,
}

impl PlaylistTask {
    pub fn new(playlist_id: i64, name: &str) -> Self {
        Self {
            playlist_id,
            name: name.to_string(),
            query: None,
            audio_ids: None,
        }
    }
}

/// Follow-up task kind processed after a create step completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistTaskKind {
    AddToPlaylist,
    AddQueueToPlaylist,
}

/// Messages processed by the ordered task worker, one at a time.
#[derive(Debug, Clone)]
pub enum TaskMessage {
    /// Creates (or overwrites) the named playlist, stores the new id into
    /// the task, and re-submits it as `next` to the same queue.
    CreatePlaylist {
        task: PlaylistTask,
        next: PlaylistTaskKind,
    },
    AddToPlaylist(PlaylistTask),
    /// Snapshots the engine queue into the task before adding.
    AddQueueToPlaylist(PlaylistTask),
    RemoveFromPlaylist(PlaylistTask),
    RenamePlaylist(PlaylistTask),
    DeleteMedia(MediaDescriptor),
    /// Playlist membership changed; broadcast to the view runtime.
    NotifyPlaylistChanged,
    /// Stops the worker loop. The worker holds its own loopback sender
    /// for chained tasks, so dropping external senders never closes the
    /// queue; teardown must send this instead. Tasks queued ahead of it
    /// still run; anything behind it is dropped.
    Shutdown,
}

/// Media object targeted by a delete request.
#[derive(Debug, Clone)]
pub enum MediaDescriptor {
    /// A loose file deleted from the filesystem.
    File { path: PathBuf, title: String },
    /// A playlist row deleted from the store.
    Playlist { id: i64, title: String },
    /// Any other media object deleted through the engine.
    Media {
        kind: MediaKind,
        id: i64,
        title: String,
    },
}
