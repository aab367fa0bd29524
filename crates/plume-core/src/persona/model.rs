//! Persona domain model.
//!
//! A persona is a writing voice the assistant can adopt: its style prompt is
//! injected as the system message of every generation it participates in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the source of a persona (system-provided or user-created).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum PersonaSource {
    /// System-provided default personas
    System,
    /// User-created custom personas
    User,
}

impl Default for PersonaSource {
    fn default() -> Self {
        PersonaSource::User
    }
}

/// A writing persona with its own tone and register.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name of the persona
    pub name: String,
    /// Short description shown in the persona picker
    pub description: String,
    /// System prompt describing the voice to write in
    pub style_prompt: String,
    /// Source of the persona (System or User)
    #[serde(default)]
    pub source: PersonaSource,
}

impl Persona {
    /// Creates a user persona with a fresh UUID.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        style_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            style_prompt: style_prompt.into(),
            source: PersonaSource::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_persona_gets_unique_id() {
        let a = Persona::new("Sobre", "ton neutre", "Écris sobrement.");
        let b = Persona::new("Sobre", "ton neutre", "Écris sobrement.");
        assert_ne!(a.id, b.id);
        assert_eq!(a.source, PersonaSource::User);
    }
}
