//! Streaming generation: request normalization, stream consumption and
//! result post-processing.
//!
//! The session manager owns the engine handle; this module holds the pure
//! pieces of the orchestration so they can be exercised without a session.

mod params;
mod request;
mod sink;

pub use params::GenerationParams;
pub use request::{ChatMessage, MessageRole, normalize_messages};
pub use sink::{CollectingSink, DiscardSink, GenerationSink};

use crate::engine::{InferenceEngine, TokenUsage};
use crate::error::Result;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

/// The terminal outcome of an accepted generation call.
///
/// Produced exactly once per accepted request; immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Final text, trimmed and stripped of a single wrapping quote pair.
    pub text: String,
    /// Engine-reported usage total when available, estimate otherwise.
    pub token_count: u32,
    /// Wall-clock time from call start to stream exhaustion.
    pub elapsed_ms: u64,
}

/// Drains a completion stream to exhaustion.
///
/// Each non-empty delta is forwarded to the sink before being accumulated;
/// emission order is preserved exactly, with no reordering or batching. The
/// last usage report seen on the stream wins.
pub(crate) async fn drain_stream(
    engine: &dyn InferenceEngine,
    messages: &[ChatMessage],
    params: &GenerationParams,
    sink: &mut dyn GenerationSink,
) -> Result<(String, Option<TokenUsage>)> {
    let mut stream = engine.complete_chat(messages, params).await?;

    let mut accumulated = String::new();
    let mut usage = None;
    while let Some(item) = stream.next().await {
        let delta = item?;
        if !delta.delta.is_empty() {
            sink.on_chunk(&delta.delta);
            accumulated.push_str(&delta.delta);
        }
        if let Some(reported) = delta.usage {
            usage = Some(reported);
        }
    }

    Ok((accumulated, usage))
}

/// Post-processes accumulated text into the final result text.
///
/// Trims surrounding whitespace and strips at most one leading and one
/// trailing quotation mark (ASCII `"` or guillemet `«`/`»`), then trims
/// again. Small models often wrap a rewritten sentence in quotes; the quotes
/// are not part of the suggestion.
pub fn postprocess(raw: &str) -> String {
    let mut text = raw.trim();
    if let Some(first) = text.chars().next()
        && (first == '"' || first == '«')
    {
        text = &text[first.len_utf8()..];
    }
    if let Some(last) = text.chars().next_back()
        && (last == '"' || last == '»')
    {
        text = &text[..text.len() - last.len_utf8()];
    }
    text.trim().to_string()
}

/// Estimates a token count from text when the engine reports no usage.
pub fn estimate_tokens(text: &str) -> u32 {
    text.chars().count().div_ceil(4) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postprocess_trims_whitespace() {
        assert_eq!(postprocess("  Bonjour le monde  \n"), "Bonjour le monde");
    }

    #[test]
    fn test_postprocess_strips_ascii_quotes() {
        assert_eq!(postprocess("\"Bonjour\""), "Bonjour");
    }

    #[test]
    fn test_postprocess_strips_guillemets() {
        assert_eq!(postprocess("« Bonjour le monde »"), "Bonjour le monde");
    }

    #[test]
    fn test_postprocess_strips_at_most_one_quote_pair() {
        assert_eq!(postprocess("\"\"double\"\""), "\"double\"");
    }

    #[test]
    fn test_postprocess_keeps_inner_quotes() {
        assert_eq!(postprocess("il a dit « non »."), "il a dit « non ».");
    }

    #[test]
    fn test_postprocess_lone_quote() {
        assert_eq!(postprocess("\""), "");
    }

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
    }

    #[test]
    fn test_estimate_tokens_counts_characters_not_bytes() {
        // four characters, more than four bytes
        assert_eq!(estimate_tokens("éléo"), 1);
    }
}
