//! Streaming sink abstraction for decoupling generation from presentation.
//!
//! The orchestrator emits incremental output through a caller-supplied sink;
//! this is the sole mechanism for progressive UI feedback. Chunks arrive in
//! the engine's emission order, synchronously, and fully precede the terminal
//! `GenerationResult`.

/// Receives text chunks as they are produced during a generation.
pub trait GenerationSink: Send {
    /// Called once per non-empty delta, in emission order.
    fn on_chunk(&mut self, delta: &str);
}

/// A sink that collects chunks for programmatic use.
///
/// Useful for testing or when the caller only needs the final result.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Accumulated text content, in delivery order.
    pub text: String,
    /// Individual chunks as delivered.
    pub chunks: Vec<String>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GenerationSink for CollectingSink {
    fn on_chunk(&mut self, delta: &str) {
        self.text.push_str(delta);
        self.chunks.push(delta.to_string());
    }
}

/// A sink that ignores everything.
#[derive(Debug, Default)]
pub struct DiscardSink;

impl GenerationSink for DiscardSink {
    fn on_chunk(&mut self, _delta: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_accumulates_in_order() {
        let mut sink = CollectingSink::new();
        sink.on_chunk("Bon");
        sink.on_chunk("jour");
        assert_eq!(sink.text, "Bonjour");
        assert_eq!(sink.chunks, vec!["Bon", "jour"]);
    }
}
