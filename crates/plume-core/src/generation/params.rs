//! Generation parameters.

use serde::{Deserialize, Serialize};

/// Sampling parameters for a completion request.
///
/// Unspecified fields fall back to the defaults below, both when constructed
/// in code and when deserialized from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 100,
            top_p: 0.9,
            frequency_penalty: 0.0,
        }
    }
}
