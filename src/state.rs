//! Playback state bitmask layout shared with the engine.
//!
//! The engine reports its state as a packed integer: boolean flags in the
//! low bits and small enumerated fields in reserved ranges. Bits outside
//! the ranges defined here are opaque to this crate and pass through the
//! gate untouched.

/// Set while the engine is playing.
pub const FLAG_PLAYING: u32 = 1 << 0;
/// Set when the engine has no media available.
pub const FLAG_NO_MEDIA: u32 = 1 << 1;
/// Set when the last engine operation failed.
pub const FLAG_ERROR: u32 = 1 << 2;

/// Bit offset of the finish-action field.
pub const SHIFT_FINISH: u32 = 4;
/// Bits holding the configured finish action.
pub const MASK_FINISH: u32 = 0x7 << SHIFT_FINISH;
/// Bit offset of the shuffle-mode field.
pub const SHIFT_SHUFFLE: u32 = 7;
/// Bits holding the active shuffle mode.
pub const MASK_SHUFFLE: u32 = 0x3 << SHIFT_SHUFFLE;

/// Behavior applied when the queue runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishAction {
    Stop,
    Repeat,
    RepeatCurrent,
    StopCurrent,
    Random,
}

/// Queue shuffle mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleMode {
    Off,
    Songs,
    Albums,
}

pub fn is_playing(state: u32) -> bool {
    state & FLAG_PLAYING != 0
}

pub fn has_error(state: u32) -> bool {
    state & FLAG_ERROR != 0
}

/// Extracts the finish action packed into `state`.
pub fn finish_action(state: u32) -> FinishAction {
    match (state & MASK_FINISH) >> SHIFT_FINISH {
        1 => FinishAction::Repeat,
        2 => FinishAction::RepeatCurrent,
        3 => FinishAction::StopCurrent,
        4 => FinishAction::Random,
        _ => FinishAction::Stop,
    }
}

/// Extracts the shuffle mode packed into `state`.
pub fn shuffle_mode(state: u32) -> ShuffleMode {
    match (state & MASK_SHUFFLE) >> SHIFT_SHUFFLE {
        1 => ShuffleMode::Songs,
        2 => ShuffleMode::Albums,
        _ => ShuffleMode::Off,
    }
}
