//! Seam to the long-running playback engine.

use crate::action::Action;
use crate::protocol::{MediaKind, Song};

/// Handle to the playback engine consumed by the view runtime and the
/// task worker. Implemented by the embedding application's engine adapter
/// and injected at construction.
///
/// Transport mutators return the resulting state bitmask; failures set
/// [`crate::state::FLAG_ERROR`] in it instead of raising an error type,
/// with the human-readable cause available from [`error_message`].
///
/// [`error_message`]: PlaybackEngine::error_message
pub trait PlaybackEngine: Send + Sync {
    /// Current state bitmask.
    fn state(&self) -> u32;

    /// Current playback position in milliseconds.
    fn position_ms(&self) -> u64;

    /// Song at `delta` positions relative to the current one (0 = current).
    fn song(&self, delta: i32) -> Option<Song>;

    /// Song at an absolute queue position, `None` past the end.
    fn song_at_queue_position(&self, position: usize) -> Option<Song>;

    /// Toggles playback and returns the new state.
    fn play_pause(&self) -> u32;

    /// Moves by `delta` songs and returns the song now current.
    fn shift_current_song(&self, delta: i32) -> Option<Song>;

    /// Restarts the current song, or moves to the previous one when close
    /// to the start. Returns the song now current.
    fn rewind_current_song(&self) -> Option<Song>;

    fn cycle_shuffle(&self) -> u32;

    fn cycle_finish_action(&self) -> u32;

    fn set_shuffle_mode(&self, mode: u32) -> u32;

    fn set_finish_action(&self, action: u32) -> u32;

    /// Seeks to an absolute position in milliseconds.
    fn seek_to_position(&self, position_ms: u64);

    /// Seeks to a permille (0..=1000) of the current song duration.
    fn seek_to_progress(&self, permille: u32);

    /// Deletes media records of `kind` with the given id, returning the
    /// number of affected songs.
    fn delete_media(&self, kind: MediaKind, id: i64) -> usize;

    /// Removes every queued song after the current one.
    fn clear_queue(&self);

    /// Removes every song from the queue.
    fn empty_queue(&self);

    /// Runs a configured logical action.
    fn perform_action(&self, action: Action);

    /// Cause of the most recent failure, surfaced when `FLAG_ERROR` is set.
    fn error_message(&self) -> Option<String>;
}
