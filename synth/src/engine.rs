//! The synthesis engine interface.

use crate::{GenerateRequest, Result, SAMPLE_RATE};

/// Interface for a speech synthesis engine.
///
/// Implementations are safe for concurrent read-only use; an engine that
/// needs exclusive access to its runtime serializes internally. Calls may
/// block for the duration of inference, so the serving layer invokes
/// `generate` from a blocking task.
pub trait SynthesisEngine: Send + Sync {
    /// Sample rate of generated audio, in Hz.
    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    /// Synthesizes the request into a finite mono sample sequence.
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<f32>>;
}
