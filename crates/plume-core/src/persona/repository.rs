//! Persona repository trait.
//!
//! The persona catalog itself (storage, editing UI) is an external
//! collaborator; the core only consumes this narrow interface.

use super::model::Persona;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for looking up personas.
#[async_trait]
pub trait PersonaRepository: Send + Sync {
    /// Retrieves all personas.
    async fn get_all(&self) -> Result<Vec<Persona>>;

    /// Finds a persona by its ID.
    ///
    /// Returns `Ok(None)` when no persona has that ID.
    async fn find_by_id(&self, persona_id: &str) -> Result<Option<Persona>>;
}
