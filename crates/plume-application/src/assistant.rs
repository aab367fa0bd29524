//! Writing assistant use case.
//!
//! Coordinates the model session, the persona catalog and the interaction
//! journal: a suggestion is generated against the current text, and only an
//! explicit accept records it in the journal.

use plume_core::error::{PlumeError, Result};
use plume_core::generation::{ChatMessage, GenerationResult, GenerationSink};
use plume_core::journal::{ActionKind, InteractionJournal, JournalEntry, NewJournalEntry};
use plume_core::persona::{PersonaRepository, with_persona};
use plume_core::session::ModelSession;
use std::sync::Arc;

/// A generated suggestion, ready to be accepted or discarded.
///
/// Discarding is simply dropping it; nothing is recorded until
/// [`AssistantService::accept`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub action: ActionKind,
    pub persona_label: Option<String>,
    pub text_before: String,
    pub result: GenerationResult,
}

/// Use case wiring session, personas and journal together.
///
/// All collaborators are shared by `Arc`; the service itself is cheap to
/// clone into UI handlers.
#[derive(Clone)]
pub struct AssistantService {
    session: Arc<ModelSession>,
    journal: Arc<InteractionJournal>,
    personas: Arc<dyn PersonaRepository>,
}

impl AssistantService {
    pub fn new(
        session: Arc<ModelSession>,
        journal: Arc<InteractionJournal>,
        personas: Arc<dyn PersonaRepository>,
    ) -> Self {
        Self {
            session,
            journal,
            personas,
        }
    }

    /// The underlying session, for lifecycle operations and observers.
    pub fn session(&self) -> &Arc<ModelSession> {
        &self.session
    }

    /// Generates a suggestion for `text` under the given action.
    ///
    /// When a persona id is supplied, its style prompt is injected as the
    /// system message. Chunks stream through `sink` as they are produced.
    /// Fails with `MODELE_NON_PRET` when no model is ready.
    pub async fn suggest(
        &self,
        action: ActionKind,
        text: &str,
        persona_id: Option<&str>,
        sink: &mut dyn GenerationSink,
    ) -> Result<Suggestion> {
        let persona = match persona_id {
            Some(id) => Some(
                self.personas
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| PlumeError::not_found("persona", id))?,
            ),
            None => None,
        };

        let messages = with_persona(
            persona.as_ref(),
            vec![ChatMessage::user(instruction(&action, text))],
        );

        tracing::debug!(action = %action, persona = ?persona.as_ref().map(|p| &p.name), "requesting suggestion");
        let result = self.session.generate(messages, None, sink).await?;

        Ok(Suggestion {
            action,
            persona_label: persona.map(|p| p.name),
            text_before: text.to_string(),
            result,
        })
    }

    /// Records an accepted suggestion in the journal.
    pub async fn accept(&self, suggestion: &Suggestion) -> Result<JournalEntry> {
        let entry = NewJournalEntry::accepted(
            suggestion.action.clone(),
            suggestion.persona_label.clone(),
            suggestion.text_before.clone(),
            suggestion.result.text.clone(),
        );
        self.journal.append(entry).await
    }

    /// Accepted suggestions, most recent first.
    pub async fn history(&self) -> Result<Vec<JournalEntry>> {
        self.journal.list_all().await
    }

    /// Removes a single history entry.
    pub async fn remove_entry(&self, id: &str) -> Result<()> {
        self.journal.remove(id).await
    }

    /// Clears the whole history.
    pub async fn clear_history(&self) -> Result<()> {
        self.journal.clear().await
    }
}

/// Builds the user-facing instruction for an action.
///
/// For [`ActionKind::Custom`] the text is already the instruction and is
/// passed through unchanged.
fn instruction(action: &ActionKind, text: &str) -> String {
    match action {
        ActionKind::Rephrase => format!(
            "Reformule le texte suivant en conservant son sens :\n\n{}",
            text
        ),
        ActionKind::Correct => format!(
            "Corrige l'orthographe et la grammaire du texte suivant, sans en changer le style :\n\n{}",
            text
        ),
        ActionKind::Summarize => {
            format!("Résume le texte suivant en quelques phrases :\n\n{}", text)
        }
        ActionKind::Expand => format!(
            "Développe le texte suivant en enrichissant les idées :\n\n{}",
            text
        ),
        ActionKind::Custom => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::StreamExt;
    use futures::stream;
    use plume_core::engine::{
        CompletionDelta, CompletionStream, EngineLoader, InferenceEngine, ProgressFn,
    };
    use plume_core::generation::{CollectingSink, GenerationParams, MessageRole};
    use plume_core::journal::{EntryStore, TextStats};
    use plume_core::persona::Persona;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct EchoEngine {
        reply: String,
        seen_messages: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    }

    #[async_trait]
    impl InferenceEngine for EchoEngine {
        async fn complete_chat(
            &self,
            messages: &[ChatMessage],
            _params: &GenerationParams,
        ) -> plume_core::Result<CompletionStream> {
            self.seen_messages.lock().unwrap().push(messages.to_vec());
            Ok(stream::iter(vec![Ok(CompletionDelta::text(self.reply.clone()))]).boxed())
        }
    }

    struct EchoLoader {
        reply: String,
        seen_messages: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    }

    #[async_trait]
    impl EngineLoader for EchoLoader {
        async fn load(
            &self,
            _model_id: &str,
            _on_progress: ProgressFn,
        ) -> plume_core::Result<Box<dyn InferenceEngine>> {
            Ok(Box::new(EchoEngine {
                reply: self.reply.clone(),
                seen_messages: self.seen_messages.clone(),
            }))
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        entries: Mutex<HashMap<String, JournalEntry>>,
    }

    #[async_trait]
    impl EntryStore for MemoryStore {
        async fn put(&self, entry: &JournalEntry) -> plume_core::Result<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(entry.id.clone(), entry.clone());
            Ok(())
        }
        async fn get(&self, id: &str) -> plume_core::Result<Option<JournalEntry>> {
            Ok(self.entries.lock().unwrap().get(id).cloned())
        }
        async fn get_all(&self) -> plume_core::Result<Vec<JournalEntry>> {
            Ok(self.entries.lock().unwrap().values().cloned().collect())
        }
        async fn delete(&self, id: &str) -> plume_core::Result<()> {
            self.entries.lock().unwrap().remove(id);
            Ok(())
        }
        async fn clear(&self) -> plume_core::Result<()> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }
    }

    struct MemoryPersonas {
        personas: Vec<Persona>,
    }

    #[async_trait]
    impl PersonaRepository for MemoryPersonas {
        async fn get_all(&self) -> plume_core::Result<Vec<Persona>> {
            Ok(self.personas.clone())
        }
        async fn find_by_id(&self, persona_id: &str) -> plume_core::Result<Option<Persona>> {
            Ok(self.personas.iter().find(|p| p.id == persona_id).cloned())
        }
    }

    struct Fixture {
        service: AssistantService,
        seen_messages: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
        persona: Persona,
    }

    async fn fixture(reply: &str) -> Fixture {
        let seen_messages = Arc::new(Mutex::new(Vec::new()));
        let loader = EchoLoader {
            reply: reply.to_string(),
            seen_messages: seen_messages.clone(),
        };
        let session = Arc::new(ModelSession::new(Arc::new(loader)));
        session.load("model-A").await.unwrap();

        let persona = Persona::new("Soutenu", "registre soutenu", "Écris en registre soutenu.");
        let service = AssistantService::new(
            session,
            Arc::new(InteractionJournal::new(Arc::new(MemoryStore::default()))),
            Arc::new(MemoryPersonas {
                personas: vec![persona.clone()],
            }),
        );

        Fixture {
            service,
            seen_messages,
            persona,
        }
    }

    #[tokio::test]
    async fn test_suggest_builds_action_instruction() {
        let fixture = fixture("Texte reformulé.").await;

        let mut sink = CollectingSink::new();
        let suggestion = fixture
            .service
            .suggest(ActionKind::Rephrase, "un ptit text", None, &mut sink)
            .await
            .unwrap();

        let seen = fixture.seen_messages.lock().unwrap();
        assert_eq!(seen[0].len(), 1);
        assert_eq!(seen[0][0].role, MessageRole::User);
        assert!(seen[0][0].content.starts_with("Reformule"));
        assert!(seen[0][0].content.contains("un ptit text"));

        assert_eq!(suggestion.result.text, "Texte reformulé.");
        assert_eq!(sink.text, "Texte reformulé.");
        assert!(suggestion.persona_label.is_none());
    }

    #[tokio::test]
    async fn test_suggest_injects_persona_style_prompt() {
        let fixture = fixture("Madame, Monsieur,").await;

        let suggestion = fixture
            .service
            .suggest(
                ActionKind::Rephrase,
                "salut",
                Some(&fixture.persona.id),
                &mut CollectingSink::new(),
            )
            .await
            .unwrap();

        let seen = fixture.seen_messages.lock().unwrap();
        assert_eq!(seen[0][0].role, MessageRole::System);
        assert_eq!(seen[0][0].content, fixture.persona.style_prompt);
        assert_eq!(seen[0][1].role, MessageRole::User);
        assert_eq!(suggestion.persona_label.as_deref(), Some("Soutenu"));
    }

    #[tokio::test]
    async fn test_suggest_with_unknown_persona_fails() {
        let fixture = fixture("x").await;

        let err = fixture
            .service
            .suggest(
                ActionKind::Rephrase,
                "salut",
                Some("absent-id"),
                &mut CollectingSink::new(),
            )
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        // No engine call was made for the failed lookup.
        assert!(fixture.seen_messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_requires_a_ready_session() {
        let fixture = fixture("x").await;
        fixture.service.session().unload();

        let err = fixture
            .service
            .suggest(ActionKind::Correct, "salut", None, &mut CollectingSink::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "MODELE_NON_PRET");
    }

    #[tokio::test]
    async fn test_accept_records_entry_with_stats() {
        let fixture = fixture("bonjour monsieur").await;

        let suggestion = fixture
            .service
            .suggest(
                ActionKind::Rephrase,
                "salut",
                Some(&fixture.persona.id),
                &mut CollectingSink::new(),
            )
            .await
            .unwrap();
        let entry = fixture.service.accept(&suggestion).await.unwrap();

        assert_eq!(entry.text_before, "salut");
        assert_eq!(entry.text_after, "bonjour monsieur");
        assert_eq!(entry.persona_label.as_deref(), Some("Soutenu"));
        assert_eq!(entry.stats_before, TextStats::measure("salut"));
        assert_eq!(entry.stats_after, TextStats::measure("bonjour monsieur"));

        let history = fixture.service.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], entry);
    }

    #[tokio::test]
    async fn test_discarded_suggestion_records_nothing() {
        let fixture = fixture("proposition").await;

        let _suggestion = fixture
            .service
            .suggest(ActionKind::Expand, "salut", None, &mut CollectingSink::new())
            .await
            .unwrap();

        assert!(fixture.service.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear_history() {
        let fixture = fixture("proposition").await;

        let suggestion = fixture
            .service
            .suggest(ActionKind::Summarize, "salut", None, &mut CollectingSink::new())
            .await
            .unwrap();
        let first = fixture.service.accept(&suggestion).await.unwrap();
        let _second = fixture.service.accept(&suggestion).await.unwrap();

        fixture.service.remove_entry(&first.id).await.unwrap();
        assert_eq!(fixture.service.history().await.unwrap().len(), 1);

        fixture.service.clear_history().await.unwrap();
        assert!(fixture.service.history().await.unwrap().is_empty());
    }
}
