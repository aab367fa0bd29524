//! Plume core: model session ownership, streaming generation and the
//! interaction journal for a local-first writing assistant.
//!
//! Inference itself is an external capability reached through the
//! [`engine`] contract; persistence mechanics live behind the collaborator
//! traits in [`journal`] and [`persona`].

pub mod config;
pub mod engine;
pub mod error;
pub mod generation;
pub mod journal;
pub mod observer;
pub mod persona;
pub mod session;

// Re-export common error types
pub use error::{PlumeError, Result, SessionError};
