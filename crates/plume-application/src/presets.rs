//! Default persona presets.
//!
//! Provides the system-defined writing voices available before the user
//! creates any of their own.

use plume_core::persona::{Persona, PersonaSource};

/// UUID for the neutral persona (deterministic, stable across installs)
const NEUTRE_UUID: &str = "5b1c8e2d-9f4a-4c7e-8d3b-2a6f1e9c4d7b";

/// UUID for the formal persona
const SOUTENU_UUID: &str = "7e3a9c5f-2d8b-4e1a-9c6d-4b2f8a1e6c3d";

/// UUID for the creative persona
const CREATIF_UUID: &str = "1d6f4b8a-3e9c-4a2d-b7e5-8c1a5f3d9b2e";

/// Returns the preset persona catalog shipped with the assistant.
pub fn default_personas() -> Vec<Persona> {
    vec![
        Persona {
            id: NEUTRE_UUID.to_string(),
            name: "Neutre".to_string(),
            description: "Ton factuel et direct, sans fioritures.".to_string(),
            style_prompt: "Tu es un assistant d'écriture. Écris dans un ton neutre et factuel, \
                           en phrases courtes et directes. Réponds uniquement avec le texte \
                           demandé, sans explication."
                .to_string(),
            source: PersonaSource::System,
        },
        Persona {
            id: SOUTENU_UUID.to_string(),
            name: "Soutenu".to_string(),
            description: "Registre soutenu, adapté aux courriers formels.".to_string(),
            style_prompt: "Tu es un assistant d'écriture. Écris dans un registre soutenu et \
                           élégant, adapté à une correspondance formelle. Réponds uniquement \
                           avec le texte demandé, sans explication."
                .to_string(),
            source: PersonaSource::System,
        },
        Persona {
            id: CREATIF_UUID.to_string(),
            name: "Créatif".to_string(),
            description: "Ton vivant et imagé, pour les textes narratifs.".to_string(),
            style_prompt: "Tu es un assistant d'écriture. Écris dans un ton vivant et imagé, \
                           avec des tournures expressives. Réponds uniquement avec le texte \
                           demandé, sans explication."
                .to_string(),
            source: PersonaSource::System,
        },
    ]
}
