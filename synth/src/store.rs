//! Content-addressed weight fetching from the Hugging Face Hub.

use std::path::PathBuf;

use hf_hub::api::tokio::{Api, ApiBuilder};
use hf_hub::{Repo, RepoType};
use tracing::info;

use crate::{Error, Result};

/// Identifies one weight artifact in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightSpec {
    /// Hub repository id, e.g. `onnx-community/csm-1b-ONNX`.
    pub repo_id: String,
    /// File within the repository, e.g. `onnx/model.onnx`.
    pub filename: String,
    /// Optional revision; defaults to the repository head.
    pub revision: Option<String>,
}

impl WeightSpec {
    /// Creates a spec pointing at the repository head.
    pub fn new(repo_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            repo_id: repo_id.into(),
            filename: filename.into(),
            revision: None,
        }
    }
}

/// Weight store backed by the Hugging Face Hub cache.
///
/// Downloads go into the shared local cache; a weight file already present
/// is returned without network I/O. `HF_TOKEN` is honored for gated
/// repositories.
pub struct HubStore {
    api: Api,
}

impl HubStore {
    /// Creates a store using the default cache location.
    pub fn new() -> Result<Self> {
        let token = std::env::var("HF_TOKEN").ok();
        let api = ApiBuilder::new()
            .with_token(token)
            .with_progress(false)
            .build()
            .map_err(Error::fetch)?;
        Ok(Self { api })
    }

    /// Resolves the artifact to a local path, downloading if absent.
    pub async fn fetch(&self, spec: &WeightSpec) -> Result<PathBuf> {
        let repo = match &spec.revision {
            Some(rev) => Repo::with_revision(spec.repo_id.clone(), RepoType::Model, rev.clone()),
            None => Repo::model(spec.repo_id.clone()),
        };

        let path = self
            .api
            .repo(repo)
            .get(&spec.filename)
            .await
            .map_err(Error::fetch)?;
        info!("weights for {} at {}", spec.repo_id, path.display());
        Ok(path)
    }
}
