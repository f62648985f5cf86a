//! Wire types for the TTS endpoint.

use murmur_synth::{GenerateRequest, SamplingConfig, Segment};
use serde::Deserialize;

/// Request body for `POST /tts`.
#[derive(Debug, Clone, Deserialize)]
pub struct TtsRequest {
    /// Text to synthesize.
    pub text: String,

    /// Speaker id, defaults to 0.
    #[serde(default)]
    pub speaker: i64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Advisory bound on output duration.
    #[serde(default = "default_max_audio_length_ms")]
    pub max_audio_length_ms: u64,

    /// Prior conversation turns, oldest first.
    #[serde(default)]
    pub context: Vec<ContextTurn>,
}

/// One prior conversation turn in the request body.
///
/// A turn missing `text` or `speaker` is dropped when the engine context
/// is built; it does not fail the request.
#[derive(Debug, Clone, Deserialize)]
pub struct ContextTurn {
    pub speaker: Option<i64>,
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Vec<f32>,
}

fn default_temperature() -> f32 {
    0.8
}

fn default_top_k() -> u32 {
    50
}

fn default_max_audio_length_ms() -> u64 {
    10_000
}

impl TtsRequest {
    /// Lowers the wire request into an engine request, dropping incomplete
    /// context turns.
    pub fn into_generate(self) -> GenerateRequest {
        let context = self
            .context
            .into_iter()
            .filter_map(|turn| match (turn.speaker, turn.text) {
                (Some(speaker), Some(text)) => Some(Segment {
                    speaker,
                    text,
                    audio: turn.audio,
                }),
                _ => None,
            })
            .collect();

        GenerateRequest {
            text: self.text,
            speaker: self.speaker,
            context,
            max_audio_length_ms: self.max_audio_length_ms,
            sampling: SamplingConfig {
                temperature: self.temperature,
                top_k: self.top_k,
            },
        }
    }
}
