//! Logical gesture actions resolved from configuration.

use crate::config::Config;
use crate::engine::PlaybackEngine;

/// Logical operation bindable to a gesture.
///
/// Resolved once when the hosting view becomes active and forwarded to
/// the engine unmodified; what each action does is the engine's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Nothing,
    PlayPause,
    NextSong,
    PreviousSong,
    NextAlbum,
    PreviousAlbum,
    Repeat,
    Shuffle,
    ClearQueue,
    EmptyQueue,
    ShowQueue,
    SeekForward,
    SeekBackward,
}

impl Action {
    /// Parses a configured action name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Action> {
        match name {
            "nothing" => Some(Action::Nothing),
            "play_pause" => Some(Action::PlayPause),
            "next_song" => Some(Action::NextSong),
            "previous_song" => Some(Action::PreviousSong),
            "next_album" => Some(Action::NextAlbum),
            "previous_album" => Some(Action::PreviousAlbum),
            "repeat" => Some(Action::Repeat),
            "shuffle" => Some(Action::Shuffle),
            "clear_queue" => Some(Action::ClearQueue),
            "empty_queue" => Some(Action::EmptyQueue),
            "show_queue" => Some(Action::ShowQueue),
            "seek_forward" => Some(Action::SeekForward),
            "seek_backward" => Some(Action::SeekBackward),
            _ => None,
        }
    }
}

/// Direction of a vertical swipe over the cover view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
}

/// Maps swipe gestures to their configured logical actions.
///
/// Malformed configuration values silently fall back to [`Action::Nothing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRouter {
    up_action: Action,
    down_action: Action,
}

impl ActionRouter {
    /// Resolves both gesture bindings from the current configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            up_action: Action::from_name(&config.gestures.swipe_up_action)
                .unwrap_or(Action::Nothing),
            down_action: Action::from_name(&config.gestures.swipe_down_action)
                .unwrap_or(Action::Nothing),
        }
    }

    /// Pure lookup of the action bound to `direction`.
    pub fn resolve(&self, direction: SwipeDirection) -> Action {
        match direction {
            SwipeDirection::Up => self.up_action,
            SwipeDirection::Down => self.down_action,
        }
    }

    /// Runs the action bound to `direction` on the engine, unconditionally.
    pub fn perform(&self, direction: SwipeDirection, engine: &dyn PlaybackEngine) {
        engine.perform_action(self.resolve(direction));
    }
}
