//! Notification sink implemented by the hosting view.

use crate::protocol::{Song, ToastDuration};

/// Callbacks delivered to the hosting view.
///
/// Every method is invoked from the view runtime thread, one call at a
/// time, in the order the underlying events were accepted. Implementations
/// that marshal onto a toolkit event loop must not block.
pub trait PlaybackStateView: Send + Sync {
    /// The state bitmask changed. `toggled` holds exactly the bits that
    /// flipped; refresh only the widgets owned by those bits.
    fn on_state_changed(&self, state: u32, toggled: u32);

    /// The current song changed. `None` means the queue is empty.
    fn on_song_changed(&self, song: Option<&Song>);

    /// Queue or timeline contents changed.
    fn on_queue_changed(&self);

    /// New seek-control position in permille. Never called while the user
    /// is dragging the control.
    fn on_seek_progress(&self, permille: u32);

    /// Formatted elapsed-time label text.
    fn on_elapsed_time(&self, text: &str);

    /// Formatted total-duration label text.
    fn on_duration_time(&self, text: &str);

    /// One-line user-facing result message.
    fn on_result_message(&self, text: &str, duration: ToastDuration);
}
