//! Inference engine contract.
//!
//! The core does not implement inference. It drives an opaque engine through
//! this contract: a loader instantiates an engine for a model identifier and
//! reports progress while doing so; the engine serves chat completions as an
//! asynchronous sequence of text deltas.

use crate::error::Result;
use crate::generation::{ChatMessage, GenerationParams};
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// Progress reported while a model is being instantiated.
///
/// Ephemeral: the session clears it on entering `Ready` or `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadProgress {
    /// Completion percentage, 0..=100.
    pub percent: u8,
    /// Human-readable label for the current stage (e.g. "fetching weights").
    pub stage: String,
}

impl LoadProgress {
    pub fn new(percent: u8, stage: impl Into<String>) -> Self {
        Self {
            percent,
            stage: stage.into(),
        }
    }
}

/// Token usage reported by the engine on the final delta of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub total_tokens: u32,
}

/// One element of a completion stream.
///
/// `usage`, when present, is authoritative for the whole completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionDelta {
    /// Incremental text content. May be empty.
    pub delta: String,
    /// Usage total, reported at most once per stream.
    pub usage: Option<TokenUsage>,
}

impl CompletionDelta {
    pub fn text(delta: impl Into<String>) -> Self {
        Self {
            delta: delta.into(),
            usage: None,
        }
    }
}

/// A lazy, finite, non-restartable sequence of completion deltas.
///
/// Implementations must preserve emission order; the consumer drains the
/// stream to exhaustion before producing a result.
pub type CompletionStream = BoxStream<'static, Result<CompletionDelta>>;

/// Callback invoked for each progress report during a load.
pub type ProgressFn = Box<dyn Fn(LoadProgress) + Send + Sync>;

/// A loaded inference engine serving chat-style completions.
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Starts a chat completion and returns its delta stream.
    ///
    /// The returned stream owns everything it needs; dropping the engine
    /// handle after the call does not invalidate an in-flight stream.
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<CompletionStream>;
}

/// Instantiates inference engines from model identifiers.
///
/// The session manager is the only caller; it relays every progress report
/// to its observers in emission order.
#[async_trait]
pub trait EngineLoader: Send + Sync {
    async fn load(
        &self,
        model_id: &str,
        on_progress: ProgressFn,
    ) -> Result<Box<dyn InferenceEngine>>;
}
