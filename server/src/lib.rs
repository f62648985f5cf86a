//! HTTP serving layer for text-to-speech synthesis.
//!
//! The daemon accepts connections immediately while the synthesis model
//! loads in the background. Readiness moves through exactly one of
//! `loading -> ready` or `loading -> failed`; requests are gated on the
//! phase and never queued behind the loader. Generated audio lands in a
//! temp artifact that is streamed back to the caller and deleted exactly
//! once — after delivery, or by the shutdown flush.
//!
//! # Endpoints
//!
//! - `GET /` — status plus a human-readable message
//! - `GET /health` — machine-readable status
//! - `POST /tts` — synthesize a [`request::TtsRequest`] into a WAV
//!   attachment
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() -> murmur_server::Result<()> {
//! let config = murmur_server::Config::from_env();
//! murmur_server::serve(config).await
//! # }
//! ```

pub mod artifacts;
pub mod config;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod request;
mod server;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use server::{router, serve};
