//! Model session lifecycle management.

use super::state::SessionState;
use crate::engine::{EngineLoader, InferenceEngine, LoadProgress, ProgressFn};
use crate::error::{PlumeError, Result, SessionError};
use crate::generation::{
    ChatMessage, GenerationParams, GenerationResult, GenerationSink, drain_stream,
    estimate_tokens, normalize_messages, postprocess,
};
use crate::observer::ObserverHub;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Owns the lifecycle of at most one loaded inference engine.
///
/// `ModelSession` is responsible for:
/// - Loading and unloading the engine for a model identifier
/// - Serializing generation requests against the loaded engine
/// - Relaying state changes, load progress and errors to observers
///
/// Construct one long-lived instance and share it by `Arc`; the one-session
/// contract is the caller wiring a single instance, not a hidden global.
///
/// # Concurrency
///
/// Operations suspend at I/O boundaries only (engine load, stream reads).
/// Callers must not issue a second `generate` while one is outstanding on the
/// same session; the session tracks the condition but does not lock it out.
pub struct ModelSession {
    loader: Arc<dyn EngineLoader>,
    observers: Arc<ObserverHub>,
    state: Mutex<SessionState>,
    engine: Mutex<Option<Arc<dyn InferenceEngine>>>,
    model_id: Mutex<Option<String>>,
    progress: Arc<Mutex<Option<LoadProgress>>>,
    last_error: Mutex<Option<SessionError>>,
    last_result: Mutex<Option<GenerationResult>>,
    generating: AtomicBool,
}

impl ModelSession {
    /// Creates a new session in the `Idle` state.
    pub fn new(loader: Arc<dyn EngineLoader>) -> Self {
        Self {
            loader,
            observers: Arc::new(ObserverHub::new()),
            state: Mutex::new(SessionState::Idle),
            engine: Mutex::new(None),
            model_id: Mutex::new(None),
            progress: Arc::new(Mutex::new(None)),
            last_error: Mutex::new(None),
            last_result: Mutex::new(None),
            generating: AtomicBool::new(false),
        }
    }

    /// The hub through which observers subscribe to session events.
    pub fn observers(&self) -> &ObserverHub {
        &self.observers
    }

    /// Loads a model, replacing any previously loaded one.
    ///
    /// At most one load may be in flight: a `load` issued while the session
    /// is already `Loading` is a no-op. Every progress report from the engine
    /// loader is relayed to observers in emission order. On failure the
    /// session transitions to `Errored` with code `ERREUR_CHARGEMENT`; a
    /// fresh `load` is the only way out of `Errored`.
    pub async fn load(&self, model_id: &str) -> Result<()> {
        {
            let mut state = self.state.lock().unwrap();
            if *state == SessionState::Loading {
                tracing::warn!(model_id, "load ignored, another load is in flight");
                return Ok(());
            }
            *state = SessionState::Loading;
        }
        // The previous handle, if any, is simply dropped.
        *self.engine.lock().unwrap() = None;
        *self.model_id.lock().unwrap() = Some(model_id.to_string());
        *self.progress.lock().unwrap() = None;
        tracing::info!(model_id, "loading model");
        self.observers.emit_status(SessionState::Loading);

        let progress_slot = Arc::clone(&self.progress);
        let hub = Arc::clone(&self.observers);
        let on_progress: ProgressFn = Box::new(move |progress: LoadProgress| {
            *progress_slot.lock().unwrap() = Some(progress.clone());
            hub.emit_progress(&progress);
        });

        match self.loader.load(model_id, on_progress).await {
            Ok(engine) => {
                *self.engine.lock().unwrap() = Some(Arc::from(engine));
                *self.progress.lock().unwrap() = None;
                *self.state.lock().unwrap() = SessionState::Ready;
                tracing::info!(model_id, "model ready");
                self.observers.emit_status(SessionState::Ready);
                Ok(())
            }
            Err(cause) => {
                let err = PlumeError::model_load(
                    format!("failed to load model '{}'", model_id),
                    Some(cause.to_string()),
                );
                let session_error = err.session_error();
                *self.last_error.lock().unwrap() = Some(session_error.clone());
                *self.state.lock().unwrap() = SessionState::Errored;
                tracing::warn!(model_id, error = %cause, "model load failed");
                self.observers.emit_error(&session_error);
                self.observers.emit_status(SessionState::Errored);
                Err(err)
            }
        }
    }

    /// Drops the engine handle and returns to `Idle`.
    ///
    /// Clears the model identifier, pending progress and the last result.
    /// No-op when already `Idle`. A load in flight cannot be unloaded; it
    /// runs to completion first.
    pub fn unload(&self) {
        {
            let mut state = self.state.lock().unwrap();
            match *state {
                SessionState::Idle => return,
                SessionState::Loading => {
                    tracing::warn!("unload ignored, a load is in flight");
                    return;
                }
                _ => *state = SessionState::Idle,
            }
        }
        *self.engine.lock().unwrap() = None;
        *self.model_id.lock().unwrap() = None;
        *self.progress.lock().unwrap() = None;
        *self.last_result.lock().unwrap() = None;
        tracing::info!("model unloaded");
        self.observers.emit_status(SessionState::Idle);
    }

    /// True iff the session is `Ready` and holds an engine.
    pub fn is_ready(&self) -> bool {
        *self.state.lock().unwrap() == SessionState::Ready
            && self.engine.lock().unwrap().is_some()
    }

    /// The current lifecycle state.
    pub fn status(&self) -> SessionState {
        *self.state.lock().unwrap()
    }

    /// The identifier of the loaded (or loading) model, if any.
    pub fn model_id(&self) -> Option<String> {
        self.model_id.lock().unwrap().clone()
    }

    /// The latest load progress, while a load is in flight.
    pub fn progress(&self) -> Option<LoadProgress> {
        self.progress.lock().unwrap().clone()
    }

    /// The last error recorded by a session operation.
    pub fn last_error(&self) -> Option<SessionError> {
        self.last_error.lock().unwrap().clone()
    }

    /// Clears the recorded error. Errors are never cleared automatically.
    pub fn clear_error(&self) {
        *self.last_error.lock().unwrap() = None;
    }

    /// The result of the last successful generation, until unload.
    pub fn last_result(&self) -> Option<GenerationResult> {
        self.last_result.lock().unwrap().clone()
    }

    /// True while a generation is outstanding on this session.
    pub fn is_generating(&self) -> bool {
        self.generating.load(Ordering::SeqCst)
    }

    /// Streams a chat completion against the loaded engine.
    ///
    /// The message sequence is normalized (system messages fronted) before
    /// submission. Each non-empty delta is forwarded to `sink` in emission
    /// order; the call suspends until the stream is exhausted. When `params`
    /// is `None` the default sampling parameters apply.
    ///
    /// All-or-nothing: any failure during setup or streaming surfaces as
    /// `ERREUR_GENERATION` and no partial result is returned. The session
    /// stays `Ready` and a previously recorded result is left intact.
    pub async fn generate(
        &self,
        messages: Vec<ChatMessage>,
        params: Option<GenerationParams>,
        sink: &mut dyn GenerationSink,
    ) -> Result<GenerationResult> {
        let engine = {
            let state = self.state.lock().unwrap();
            let engine = self.engine.lock().unwrap();
            match (*state, engine.as_ref()) {
                (SessionState::Ready, Some(engine)) => Arc::clone(engine),
                _ => return Err(PlumeError::ModelNotReady),
            }
        };

        if self.generating.swap(true, Ordering::SeqCst) {
            // Caller contract violation: single-flight per session.
            tracing::warn!("generate called while a previous call is outstanding");
        }

        let params = params.unwrap_or_default();
        let outbound = normalize_messages(messages);
        let started = Instant::now();
        let outcome = drain_stream(engine.as_ref(), &outbound, &params, sink).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        self.generating.store(false, Ordering::SeqCst);

        match outcome {
            Ok((raw, usage)) => {
                let text = postprocess(&raw);
                let token_count = match usage {
                    Some(usage) => usage.total_tokens,
                    None => estimate_tokens(&text),
                };
                let result = GenerationResult {
                    text,
                    token_count,
                    elapsed_ms,
                };
                *self.last_result.lock().unwrap() = Some(result.clone());
                tracing::debug!(tokens = token_count, elapsed_ms, "generation finished");
                Ok(result)
            }
            Err(cause) => {
                let err =
                    PlumeError::generation("text generation failed", Some(cause.to_string()));
                let session_error = err.session_error();
                *self.last_error.lock().unwrap() = Some(session_error.clone());
                tracing::warn!(error = %cause, "generation failed");
                self.observers.emit_error(&session_error);
                Err(err)
            }
        }
    }
}
