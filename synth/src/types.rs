//! Value types for synthesis requests.

/// Sample rate of generated audio, in Hz.
pub const SAMPLE_RATE: u32 = 24_000;

/// A prior conversation turn used to condition synthesis.
///
/// Multi-turn context lets the model keep voice continuity across a
/// conversation. The audio buffer holds the turn's samples and may be
/// empty when only the transcript is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub speaker: i64,
    pub text: String,
    pub audio: Vec<f32>,
}

impl Segment {
    /// Creates a segment with no audio.
    pub fn new(speaker: i64, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            audio: Vec::new(),
        }
    }
}

/// Sampling parameters forwarded to the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_k: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_k: 50,
        }
    }
}

/// One synthesis request as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Text to synthesize.
    pub text: String,
    /// Speaker id of the synthesized turn.
    pub speaker: i64,
    /// Prior turns conditioning the synthesis, oldest first.
    pub context: Vec<Segment>,
    /// Advisory bound on output duration; the engine forwards it to the
    /// model and does not enforce it.
    pub max_audio_length_ms: u64,
    pub sampling: SamplingConfig,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            speaker: 0,
            context: Vec::new(),
            max_audio_length_ms: 10_000,
            sampling: SamplingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_defaults() {
        let sampling = SamplingConfig::default();
        assert_eq!(sampling.temperature, 0.8);
        assert_eq!(sampling.top_k, 50);
    }

    #[test]
    fn test_request_defaults() {
        let request = GenerateRequest::default();
        assert_eq!(request.speaker, 0);
        assert_eq!(request.max_audio_length_ms, 10_000);
        assert!(request.context.is_empty());
    }
}
