//! Session lifecycle states.

use serde::{Deserialize, Serialize};

/// The lifecycle state of a model session.
///
/// Transitions happen only through session manager operations:
///
/// ```text
/// Idle -(load)-> Loading -(success)-> Ready -(unload)-> Idle
///                Loading -(failure)-> Errored -(load)-> Loading
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No model loaded.
    Idle,
    /// A model is being instantiated.
    Loading,
    /// A model is loaded and can serve generations.
    Ready,
    /// The last load failed; recoverable via a fresh load.
    Errored,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Ready => "ready",
            SessionState::Errored => "errored",
        };
        write!(f, "{}", label)
    }
}
