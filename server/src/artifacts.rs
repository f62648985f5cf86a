//! Temp artifact lifecycle: allocation, registration, exactly-once deletion.
//!
//! Every generated audio file is registered in a process-wide set while it
//! is live. The set, guarded by a mutex, is the arbiter of deletion:
//! whichever party removes a path from the set (the post-delivery cleanup
//! guard or the shutdown flush) deletes the file; the loser finds the path
//! absent and does nothing. Deletion failures are logged, never surfaced.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// Registry of live temp artifacts.
#[derive(Clone)]
pub struct ArtifactStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    dir: PathBuf,
    live: Mutex<HashSet<PathBuf>>,
}

/// A freshly allocated, not-yet-delivered audio file location.
#[derive(Debug)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtifactStore {
    /// Creates a store placing artifacts under `dir`.
    pub fn new(dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                dir,
                live: Mutex::new(HashSet::new()),
            }),
        }
    }

    /// Allocates a unique artifact path and registers it as live.
    pub fn allocate(&self) -> Artifact {
        let path = self.inner.dir.join(format!("murmur-{}.wav", Uuid::new_v4()));
        self.inner.live.lock().insert(path.clone());
        Artifact { path }
    }

    /// Wraps a delivered artifact in a guard that releases it exactly once
    /// when the transport is done with the bytes.
    pub fn cleanup_guard(&self, artifact: Artifact) -> CleanupGuard {
        CleanupGuard {
            store: self.clone(),
            path: artifact.path,
        }
    }

    /// Unregisters one artifact and, if it was still registered, deletes
    /// the file. A second call for the same path is a no-op.
    pub fn release(&self, path: &Path) {
        let was_live = self.inner.live.lock().remove(path);
        if !was_live {
            return;
        }
        match std::fs::remove_file(path) {
            Ok(()) => debug!("removed temp file {}", path.display()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!("error removing temp file {}: {}", path.display(), err),
        }
    }

    /// Shutdown sweep: force-deletes every remaining artifact. Per-file
    /// errors are logged and do not stop the sweep.
    pub fn flush(&self) {
        let remaining: Vec<PathBuf> = self.inner.live.lock().drain().collect();
        for path in remaining {
            match std::fs::remove_file(&path) {
                Ok(()) => debug!("removed temp file {}", path.display()),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
                Err(err) => warn!("error removing temp file {}: {}", path.display(), err),
            }
        }
    }

    /// Number of live artifacts; used by tests and shutdown logging.
    pub fn live_count(&self) -> usize {
        self.inner.live.lock().len()
    }
}

/// Releases one artifact when dropped.
///
/// Carried by the response body stream so deletion happens strictly after
/// the bytes are handed to the transport (or the client goes away).
pub struct CleanupGuard {
    store: ArtifactStore,
    path: PathBuf,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        self.store.release(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_registers_unique_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());

        let a = store.allocate();
        let b = store.allocate();
        assert_ne!(a.path(), b.path());
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_release_is_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());

        let artifact = store.allocate();
        std::fs::write(artifact.path(), b"pcm").unwrap();

        store.release(artifact.path());
        assert!(!artifact.path().exists());
        assert_eq!(store.live_count(), 0);

        // Second release finds nothing registered and does nothing.
        store.release(artifact.path());
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());

        let artifact = store.allocate();
        std::fs::write(artifact.path(), b"pcm").unwrap();
        let path = artifact.path().to_path_buf();

        let guard = store.cleanup_guard(artifact);
        assert_eq!(store.live_count(), 1);
        drop(guard);

        assert!(!path.exists());
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_flush_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_path_buf());

        let a = store.allocate();
        let b = store.allocate();
        // Only one of the two was ever written.
        std::fs::write(b.path(), b"pcm").unwrap();

        store.flush();
        assert_eq!(store.live_count(), 0);
        assert!(!a.path().exists());
        assert!(!b.path().exists());
    }
}
