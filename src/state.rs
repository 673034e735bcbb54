// Local session state.
//
// A single JSON file holding the registration response. Its presence is what
// selects the update path over registration. There is no locking: two
// invocations racing on the same file is unsupported, whichever write lands
// last wins.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::api::models::SessionState;
use crate::error::{Error, Result};

/// Default location, relative to the working directory.
pub const STATE_FILE: &str = "data.json";

#[async_trait]
pub trait StateStore {
    /// `Ok(None)` when nothing has been registered yet.
    async fn load(&self) -> Result<Option<SessionState>>;

    /// Replace whatever is stored with `state`.
    async fn save(&self, state: &SessionState) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        let temp = self.temp_path();

        let result: std::io::Result<()> = async {
            let mut options = fs::OpenOptions::new();
            options.write(true).create(true).truncate(true);
            #[cfg(unix)]
            options.mode(0o644);

            let mut file = options.open(&temp).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            drop(file);

            fs::rename(&temp, &self.path).await
        }
        .await;

        if result.is_err() {
            let _ = fs::remove_file(&temp).await;
        }
        result
    }
}

impl Default for FileStateStore {
    fn default() -> Self {
        Self::new(STATE_FILE)
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self) -> Result<Option<SessionState>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(Error::StateRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let state: SessionState =
            serde_json::from_slice(&bytes).map_err(|source| Error::StateParse {
                path: self.path.clone(),
                source,
            })?;

        if state.token().is_empty() {
            return Err(Error::StateMissingToken {
                path: self.path.clone(),
            });
        }

        debug!("Loaded state from {}", self.path.display());
        Ok(Some(state))
    }

    async fn save(&self, state: &SessionState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(state).map_err(Error::StateEncode)?;

        self.write_atomic(&bytes)
            .await
            .map_err(|source| Error::StateWrite {
                path: self.path.clone(),
                source,
            })?;

        debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}
