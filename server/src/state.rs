//! Process-wide readiness state and shared request context.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use murmur_synth::SynthesisEngine;
use once_cell::sync::OnceCell;
use tracing::warn;

use crate::artifacts::ArtifactStore;

/// Readiness of the synthesis model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Failed,
}

impl Phase {
    /// Wire representation used by the status endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Failed => "error",
        }
    }
}

const LOADING: u8 = 0;
const READY: u8 = 1;
const FAILED: u8 = 2;

/// Atomic readiness cell with monotonic transitions.
///
/// Written once by the model loader; read by every request. Once a
/// terminal phase (`Ready` or `Failed`) is reached it never reverts.
#[derive(Debug, Default)]
pub struct Readiness(AtomicU8);

impl Readiness {
    pub fn new() -> Self {
        Self(AtomicU8::new(LOADING))
    }

    pub fn get(&self) -> Phase {
        match self.0.load(Ordering::Acquire) {
            READY => Phase::Ready,
            FAILED => Phase::Failed,
            _ => Phase::Loading,
        }
    }

    /// Transitions out of `Loading`; returns false if a terminal phase was
    /// already reached.
    fn advance(&self, to: u8) -> bool {
        self.0
            .compare_exchange(LOADING, to, Ordering::Release, Ordering::Relaxed)
            .is_ok()
    }

    pub fn mark_ready(&self) -> bool {
        self.advance(READY)
    }

    pub fn mark_failed(&self) -> bool {
        self.advance(FAILED)
    }
}

/// Shared process context handed to every request task.
///
/// Owns the readiness cell, the published engine handle, and the artifact
/// registry; there are no ambient globals.
pub struct AppContext {
    readiness: Readiness,
    engine: OnceCell<Arc<dyn SynthesisEngine>>,
    artifacts: ArtifactStore,
}

impl AppContext {
    pub fn new(artifacts: ArtifactStore) -> Arc<Self> {
        Arc::new(Self {
            readiness: Readiness::new(),
            engine: OnceCell::new(),
            artifacts,
        })
    }

    pub fn phase(&self) -> Phase {
        self.readiness.get()
    }

    /// Publishes the loaded engine and flips readiness to `Ready`.
    ///
    /// The handle is set before the phase becomes observable, so a request
    /// that sees `Ready` always finds the engine. Returns false if the
    /// phase was already terminal.
    pub fn publish(&self, engine: Arc<dyn SynthesisEngine>) -> bool {
        if self.engine.set(engine).is_err() {
            warn!("engine already published, ignoring");
            return false;
        }
        self.readiness.mark_ready()
    }

    /// Records a failed load; terminal until process restart.
    pub fn fail(&self) -> bool {
        self.readiness.mark_failed()
    }

    /// The published engine handle, if readiness reached `Ready`.
    pub fn engine(&self) -> Option<Arc<dyn SynthesisEngine>> {
        self.engine.get().cloned()
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }
}
