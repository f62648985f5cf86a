//! Router-level scenario tests with fake synthesis engines.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tower::ServiceExt;

use murmur_server::artifacts::ArtifactStore;
use murmur_server::state::AppContext;
use murmur_server::{Config, router};
use murmur_synth::{GenerateRequest, Segment, SynthesisEngine};

/// Engine returning fixed samples and recording every request it sees.
struct FakeEngine {
    samples: Vec<f32>,
    calls: AtomicUsize,
    seen: Mutex<Vec<GenerateRequest>>,
}

impl FakeEngine {
    fn with_samples(samples: Vec<f32>) -> Arc<Self> {
        Arc::new(Self {
            samples,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl SynthesisEngine for FakeEngine {
    fn generate(&self, request: &GenerateRequest) -> murmur_synth::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(request.clone());
        Ok(self.samples.clone())
    }
}

struct FailingEngine;

impl SynthesisEngine for FailingEngine {
    fn generate(&self, _request: &GenerateRequest) -> murmur_synth::Result<Vec<f32>> {
        Err(murmur_synth::Error::Generation("sampler exploded".to_string()))
    }
}

fn test_app() -> (Arc<AppContext>, Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let ctx = AppContext::new(ArtifactStore::new(dir.path().to_path_buf()));
    let app = router(ctx.clone(), &Config::default());
    (ctx, app, dir)
}

async fn post_tts(app: Router, body: Value) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/tts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn rejects_with_503_while_loading() {
    let (_ctx, app, _dir) = test_app();

    let response = post_tts(app, json!({"text": "hello"})).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Model is still loading. Please try again later.");
}

#[tokio::test]
async fn rejects_with_500_after_failed_load() {
    let (ctx, app, _dir) = test_app();
    ctx.fail();

    let response = post_tts(app, json!({"text": "hello"})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Model failed to load. Please check server logs.");
}

#[tokio::test]
async fn synthesizes_one_second_of_silence() {
    let (ctx, app, dir) = test_app();
    let engine = FakeEngine::with_samples(vec![0.0; 24000]);
    ctx.publish(engine.clone());

    let response = post_tts(app, json!({"text": "hi", "speaker": 1})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/wav"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"tts_output.wav\""
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let (samples, rate) = murmur_wav::decode(std::io::Cursor::new(&bytes[..])).unwrap();
    assert_eq!(rate, 24000);
    assert_eq!(samples.len(), 24000);
    assert!(samples.iter().all(|&s| s == 0.0));

    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    assert_eq!(engine.seen.lock()[0].speaker, 1);

    // Delivery finished, so the cleanup guard has already fired.
    assert_eq!(ctx.artifacts().live_count(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn delivered_audio_round_trips_exactly() {
    let (ctx, app, _dir) = test_app();
    let expected = vec![0.0f32, 0.5, -0.5, 0.25, 1.0, -1.0, 0.125];
    ctx.publish(FakeEngine::with_samples(expected.clone()));

    let response = post_tts(app, json!({"text": "hi"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let (samples, _) = murmur_wav::decode(std::io::Cursor::new(&bytes[..])).unwrap();
    assert_eq!(samples, expected);
}

#[tokio::test]
async fn incomplete_context_turns_are_not_forwarded() {
    let (ctx, app, _dir) = test_app();
    let engine = FakeEngine::with_samples(vec![0.1; 100]);
    ctx.publish(engine.clone());

    let response = post_tts(
        app,
        json!({
            "text": "hi",
            "context": [
                {"speaker": 0, "text": "prev"},
                {"text": "missing speaker"}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let seen = engine.seen.lock();
    assert_eq!(seen[0].context, vec![Segment::new(0, "prev")]);
}

#[tokio::test]
async fn sampling_defaults_reach_the_engine() {
    let (ctx, app, _dir) = test_app();
    let engine = FakeEngine::with_samples(vec![0.1; 100]);
    ctx.publish(engine.clone());

    let response = post_tts(app, json!({"text": "hi"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let seen = engine.seen.lock();
    assert_eq!(seen[0].sampling.temperature, 0.8);
    assert_eq!(seen[0].sampling.top_k, 50);
    assert_eq!(seen[0].max_audio_length_ms, 10_000);
}

#[tokio::test]
async fn empty_text_is_rejected_before_synthesis() {
    let (ctx, app, _dir) = test_app();
    let engine = FakeEngine::with_samples(vec![0.1; 100]);
    ctx.publish(engine.clone());

    let response = post_tts(app, json!({"text": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid request: text must not be empty");
    assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generation_failure_surfaces_as_500() {
    let (ctx, app, _dir) = test_app();
    ctx.publish(Arc::new(FailingEngine));

    let response = post_tts(app, json!({"text": "hi"})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Error generating speech: generation failed: sampler exploded"
    );
    assert_eq!(ctx.artifacts().live_count(), 0);
}

#[tokio::test]
async fn empty_sample_output_fails_encoding_without_leaking() {
    let (ctx, app, dir) = test_app();
    ctx.publish(FakeEngine::with_samples(Vec::new()));

    let response = post_tts(app, json!({"text": "hi"})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Error generating speech: no samples to encode");

    assert_eq!(ctx.artifacts().live_count(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn root_reports_phase_with_message() {
    let (ctx, app, _dir) = test_app();

    let body = body_json(get(app.clone(), "/").await).await;
    assert_eq!(body["status"], "loading");
    assert_eq!(body["message"], "The TTS model is still loading...");

    ctx.publish(FakeEngine::with_samples(vec![0.0; 10]));
    let body = body_json(get(app, "/").await).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["message"], "TTS server is ready");
}

#[tokio::test]
async fn health_reports_phase_only() {
    let (ctx, app, _dir) = test_app();
    ctx.fail();

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body.get("message").is_none());
}
