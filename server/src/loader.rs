//! One-shot background model loader.

use std::future::Future;
use std::sync::Arc;

use murmur_synth::{HubStore, OnnxEngine, SynthesisEngine, WeightSpec};
use tracing::{error, info};

use crate::state::AppContext;

/// Awaits `load` and publishes the outcome: engine handle plus `Ready` on
/// success, `Failed` on error.
///
/// Exactly one attempt, no retry; the process keeps serving either way.
pub async fn run<F>(ctx: Arc<AppContext>, load: F)
where
    F: Future<Output = murmur_synth::Result<Arc<dyn SynthesisEngine>>>,
{
    info!("loading synthesis model...");
    match load.await {
        Ok(engine) => {
            ctx.publish(engine);
            info!("synthesis model ready");
        }
        Err(err) => {
            error!("Error loading model: {}", err);
            ctx.fail();
        }
    }
}

/// Production load path: fetch weights from the hub store, then build the
/// ONNX engine off the async runtime.
pub async fn fetch_and_load(spec: WeightSpec) -> murmur_synth::Result<Arc<dyn SynthesisEngine>> {
    let store = HubStore::new()?;
    let weights = store.fetch(&spec).await?;
    let engine = tokio::task::spawn_blocking(move || OnnxEngine::load(&weights))
        .await
        .map_err(murmur_synth::Error::load)??;
    Ok(Arc::new(engine))
}
