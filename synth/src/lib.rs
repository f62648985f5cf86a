//! Speech synthesis engine interface and collaborator bindings.
//!
//! This crate provides:
//! - [`SynthesisEngine`]: the narrow interface the serving layer calls
//! - [`OnnxEngine`]: the production binding, an ONNX Runtime session
//! - [`HubStore`]: content-addressed weight fetching from the Hugging
//!   Face Hub
//! - [`GenerateRequest`], [`Segment`], [`SamplingConfig`]: synthesis
//!   value types
//!
//! # Example
//!
//! ```rust,no_run
//! use murmur_synth::{GenerateRequest, HubStore, OnnxEngine, SynthesisEngine, WeightSpec};
//!
//! # async fn demo() -> murmur_synth::Result<()> {
//! let store = HubStore::new()?;
//! let weights = store.fetch(&WeightSpec::new("onnx-community/csm-1b-ONNX", "onnx/model.onnx")).await?;
//! let engine = OnnxEngine::load(&weights)?;
//!
//! let samples = engine.generate(&GenerateRequest {
//!     text: "Hello from murmur.".to_string(),
//!     ..Default::default()
//! })?;
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
mod onnx;
mod store;
mod types;

pub use engine::SynthesisEngine;
pub use error::{Error, Result};
pub use onnx::OnnxEngine;
pub use store::{HubStore, WeightSpec};
pub use types::{GenerateRequest, SamplingConfig, Segment, SAMPLE_RATE};
