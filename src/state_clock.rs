//! Monotonic gate that orders state and song notifications.

use std::time::Instant;

use crate::protocol::Song;

/// Change descriptor returned when a state event passes the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub old_state: u32,
    pub state: u32,
    /// Bits that differ between the old and new state.
    pub toggled: u32,
}

/// Orders state and song notifications against monotonic timestamps.
///
/// The engine delivers notifications from its own threads while the view
/// runtime issues local transport calls; whichever carries the newest
/// timestamp wins and everything older is silently dropped. The state and
/// song channels are gated independently. A plain compare-and-store is
/// enough because every call happens on the view runtime thread.
#[derive(Debug, Default)]
pub struct StateClock {
    state: u32,
    song: Option<Song>,
    last_state_event: Option<Instant>,
    last_song_event: Option<Instant>,
}

impl StateClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last applied state bitmask.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Last applied song.
    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    /// Applies a state event.
    ///
    /// Returns the change descriptor when the event is fresh and flips at
    /// least one bit. A fresh event carrying an identical state still
    /// advances the channel timestamp but reports no change; a stale or
    /// tied timestamp is a no-op.
    pub fn apply_state(&mut self, uptime: Instant, state: u32) -> Option<StateChange> {
        if self.last_state_event.is_some_and(|last| uptime <= last) {
            return None;
        }
        self.last_state_event = Some(uptime);

        if state == self.state {
            return None;
        }
        let old_state = self.state;
        self.state = state;
        Some(StateChange {
            old_state,
            state,
            toggled: old_state ^ state,
        })
    }

    /// Applies a song event.
    ///
    /// Returns the accepted song when the event is fresh; stale or tied
    /// timestamps are a no-op. Song changes are always reported, even when
    /// the engine re-announces the same song.
    pub fn apply_song(&mut self, uptime: Instant, song: Option<Song>) -> Option<Option<Song>> {
        if self.last_song_event.is_some_and(|last| uptime <= last) {
            return None;
        }
        self.last_song_event = Some(uptime);
        self.song = song.clone();
        Some(song)
    }
}
