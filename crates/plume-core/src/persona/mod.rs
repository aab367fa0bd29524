//! Persona domain module.
//!
//! - `model`: the persona entity (`Persona`, `PersonaSource`)
//! - `repository`: lookup interface consumed by the application layer
//! - `with_persona`: pure system-prompt injection

mod model;
mod repository;

pub use model::{Persona, PersonaSource};
pub use repository::PersonaRepository;

use crate::generation::{ChatMessage, normalize_messages};

/// Injects a persona's style prompt into a message sequence.
///
/// Pure function: the persona's system message is prepended and the whole
/// sequence normalized, so it ends up first in the outbound order. Without a
/// persona the sequence is only normalized.
pub fn with_persona(persona: Option<&Persona>, messages: Vec<ChatMessage>) -> Vec<ChatMessage> {
    match persona {
        Some(persona) => {
            let mut injected = Vec::with_capacity(messages.len() + 1);
            injected.push(ChatMessage::system(persona.style_prompt.clone()));
            injected.extend(messages);
            normalize_messages(injected)
        }
        None => normalize_messages(messages),
    }
}
