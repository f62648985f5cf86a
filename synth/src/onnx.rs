//! ONNX Runtime binding for the synthesis engine.
//!
//! The synthesis algorithm itself lives inside an exported ONNX graph;
//! this module only builds input tensors and reads back the generated
//! sample tensor. Expected graph signature:
//!
//! | input           | type | shape  | meaning                              |
//! |-----------------|------|--------|--------------------------------------|
//! | `text`          | i64  | [1, n] | prompt token ids (byte vocabulary)   |
//! | `speaker`       | i64  | [1]    | speaker id of the turn to synthesize |
//! | `context_audio` | f32  | [1, m] | concatenated context samples (m ≥ 0) |
//! | `temperature`   | f32  | [1]    | sampling temperature                 |
//! | `top_k`         | i64  | [1]    | sampling top-k                       |
//! | `max_samples`   | i64  | [1]    | advisory output length bound         |
//!
//! The first output is one f32 tensor of mono samples at 24000 Hz.
//!
//! The prompt vocabulary is byte-level: ids 0-255 are UTF-8 bytes, each
//! turn is prefixed with a speaker tag `SPEAKER_BASE + speaker`, and turns
//! are separated by `TURN_SEP`.

use std::path::Path;

use ndarray::{Array1, Array2};
use ort::inputs;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;
use parking_lot::Mutex;

use crate::{Error, GenerateRequest, Result, SAMPLE_RATE, SynthesisEngine};

/// Token id separating conversation turns in the prompt.
const TURN_SEP: i64 = 256;

/// Base id for speaker tags; speaker `n` encodes as `SPEAKER_BASE + n`.
const SPEAKER_BASE: i64 = 257;

/// Synthesis engine backed by an ONNX Runtime inference session.
///
/// The session is serialized behind a mutex; concurrent callers queue.
pub struct OnnxEngine {
    session: Mutex<Session>,
}

impl OnnxEngine {
    /// Builds an inference session from an exported model file.
    pub fn load(model_path: &Path) -> Result<Self> {
        let session = Session::builder()
            .and_then(|builder| builder.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|builder| builder.commit_from_file(model_path))
            .map_err(Error::load)?;

        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl SynthesisEngine for OnnxEngine {
    fn generate(&self, request: &GenerateRequest) -> Result<Vec<f32>> {
        let ids = encode_prompt(request);
        let context_audio: Vec<f32> = request
            .context
            .iter()
            .flat_map(|turn| turn.audio.iter().copied())
            .collect();

        let text = Array2::from_shape_vec((1, ids.len()), ids).map_err(Error::generation)?;
        let context = Array2::from_shape_vec((1, context_audio.len()), context_audio)
            .map_err(Error::generation)?;
        let speaker = Array1::from_vec(vec![request.speaker]);
        let temperature = Array1::from_vec(vec![request.sampling.temperature]);
        let top_k = Array1::from_vec(vec![i64::from(request.sampling.top_k)]);
        let max_samples = Array1::from_vec(vec![max_samples_bound(request.max_audio_length_ms)]);

        let mut session = self.session.lock();
        let outputs = session
            .run(inputs![
                "text" => Tensor::from_array(text).map_err(Error::generation)?,
                "speaker" => Tensor::from_array(speaker).map_err(Error::generation)?,
                "context_audio" => Tensor::from_array(context).map_err(Error::generation)?,
                "temperature" => Tensor::from_array(temperature).map_err(Error::generation)?,
                "top_k" => Tensor::from_array(top_k).map_err(Error::generation)?,
                "max_samples" => Tensor::from_array(max_samples).map_err(Error::generation)?,
            ])
            .map_err(Error::generation)?;

        if outputs.len() == 0 {
            return Err(Error::Generation(
                "model returned no output tensors".to_string(),
            ));
        }

        let (_, samples) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(Error::generation)?;
        Ok(samples.to_vec())
    }
}

/// Encodes the request into the graph's byte-level prompt vocabulary.
fn encode_prompt(request: &GenerateRequest) -> Vec<i64> {
    let mut ids = Vec::new();
    for turn in &request.context {
        push_turn(&mut ids, turn.speaker, &turn.text);
    }
    push_turn(&mut ids, request.speaker, &request.text);
    ids
}

fn push_turn(ids: &mut Vec<i64>, speaker: i64, text: &str) {
    if !ids.is_empty() {
        ids.push(TURN_SEP);
    }
    ids.push(SPEAKER_BASE + speaker.max(0));
    ids.extend(text.bytes().map(i64::from));
}

fn max_samples_bound(max_audio_length_ms: u64) -> i64 {
    (max_audio_length_ms.saturating_mul(u64::from(SAMPLE_RATE)) / 1000) as i64
}
