//! Seam to the persistent playlist store.

use std::fmt;

use crate::protocol::MediaQuery;

/// Failure reported by the playlist store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

/// Handle to the persistent playlist store used by the task worker.
///
/// Calls may block; they only ever run on the worker thread.
pub trait PlaylistStore: Send + Sync {
    /// Creates a playlist named `name`, overwriting any existing playlist
    /// with the same name. Returns the playlist id.
    fn create_playlist(&self, name: &str) -> Result<i64, StoreError>;

    fn rename_playlist(&self, playlist_id: i64, name: &str) -> Result<(), StoreError>;

    /// Adds the songs matched by `query`, returning the number added.
    fn add_by_query(&self, playlist_id: i64, query: &MediaQuery) -> Result<usize, StoreError>;

    /// Adds the given song ids, returning the number added.
    fn add_audio_ids(&self, playlist_id: i64, audio_ids: &[i64]) -> Result<usize, StoreError>;

    /// Removes the given song ids, returning the number removed.
    fn remove_audio_ids(&self, playlist_id: i64, audio_ids: &[i64]) -> Result<usize, StoreError>;

    fn delete_playlist(&self, playlist_id: i64) -> Result<(), StoreError>;
}
