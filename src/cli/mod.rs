pub mod account;
pub mod partners;
pub mod plans;
pub mod preferences;
pub mod profile;
pub mod score;

use aitolove::api::ApiClient;
use aitolove::config::AppConfig;
use aitolove::session::{FileStore, Session};
use anyhow::{Context as _, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Shared state for one command: the on-disk session and a client that reads
/// its token from the same store.
pub struct Context {
    pub session: Session<Arc<FileStore>>,
    pub api: ApiClient,
}

impl Context {
    pub fn open(config: AppConfig) -> Result<Self> {
        let session_path = config.resolved_session_path();
        let store = Arc::new(FileStore::open(&session_path)?);
        let api = ApiClient::new(config.api.base_url.clone(), store.clone());
        tracing::debug!(api = %config.api.base_url, session = %session_path.display(), "client ready");
        Ok(Self {
            session: Session::new(store),
            api,
        })
    }
}

/// Pretty-print any JSON-serializable response.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read and decode a JSON file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}
