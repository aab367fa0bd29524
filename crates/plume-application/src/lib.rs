//! Plume application layer: the writing-assistant use case over the core
//! session, persona and journal components.

pub mod assistant;
pub mod presets;

pub use assistant::{AssistantService, Suggestion};
pub use presets::default_personas;
