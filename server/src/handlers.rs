//! HTTP request handlers.
//!
//! `POST /tts` walks the full request lifecycle: readiness gate, context
//! construction, synthesis, persistence, streamed delivery. Synthesis and
//! encoding run on the blocking pool; the cleanup guard rides the response
//! body so the temp file is deleted only after delivery.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::Response;
use futures::Stream;
use serde::Serialize;
use tokio_util::io::ReaderStream;
use tracing::error;

use crate::artifacts::CleanupGuard;
use crate::error::{Error, Result};
use crate::request::TtsRequest;
use crate::state::{AppContext, Phase};

/// Body of the status endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

fn phase_message(phase: Phase) -> &'static str {
    match phase {
        Phase::Loading => "The TTS model is still loading...",
        Phase::Failed => "Failed to load the TTS model",
        Phase::Ready => "TTS server is ready",
    }
}

/// `GET /` — server status with a human-readable message.
pub async fn root(State(ctx): State<Arc<AppContext>>) -> Json<StatusResponse> {
    let phase = ctx.phase();
    Json(StatusResponse {
        status: phase.as_str(),
        message: Some(phase_message(phase)),
    })
}

/// `GET /health` — machine-readable status only.
pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: ctx.phase().as_str(),
        message: None,
    })
}

/// `POST /tts` — synthesizes the request into a WAV attachment.
pub async fn tts(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<TtsRequest>,
) -> Result<Response> {
    let engine = match ctx.phase() {
        Phase::Loading => return Err(Error::NotReady),
        Phase::Failed => return Err(Error::LoadFailed),
        Phase::Ready => ctx.engine().ok_or(Error::LoadFailed)?,
    };

    if request.text.is_empty() {
        return Err(Error::InvalidRequest("text must not be empty".to_string()));
    }

    let generate = request.into_generate();
    let sample_rate = engine.sample_rate();

    let samples = tokio::task::spawn_blocking(move || engine.generate(&generate))
        .await
        .map_err(|err| Error::Task(err.to_string()))?
        .map_err(|err| {
            error!("Error generating speech: {}", err);
            Error::Generation(err)
        })?;

    let artifact = ctx.artifacts().allocate();
    let encode_path = artifact.path().to_path_buf();
    let encoded =
        tokio::task::spawn_blocking(move || murmur_wav::encode(&encode_path, &samples, sample_rate))
            .await;

    match encoded {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            error!("Error generating speech: {}", err);
            ctx.artifacts().release(artifact.path());
            return Err(Error::Encode(err));
        }
        Err(err) => {
            error!("Error generating speech: {}", err);
            ctx.artifacts().release(artifact.path());
            return Err(Error::Task(err.to_string()));
        }
    }

    let file = match tokio::fs::File::open(artifact.path()).await {
        Ok(file) => file,
        Err(err) => {
            ctx.artifacts().release(artifact.path());
            return Err(Error::Io(err));
        }
    };

    let body = Body::from_stream(DeliveryStream {
        inner: ReaderStream::new(file),
        _guard: ctx.artifacts().cleanup_guard(artifact),
    });

    let mut response = Response::new(body);
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
    response.headers_mut().insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"tts_output.wav\""),
    );
    Ok(response)
}

/// Response body stream that keeps the artifact's cleanup guard alive
/// until the transport is done with the bytes.
struct DeliveryStream<S> {
    inner: S,
    _guard: CleanupGuard,
}

impl<S: Stream + Unpin> Stream for DeliveryStream<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}
