use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::store::Todo;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode seed file {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("seed file contains duplicate todo id {0}")]
    DuplicateId(i32),
}

/// Reads the startup JSON array of todos.
pub async fn load_seed(path: &Path) -> Result<Vec<Todo>, SeedError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| SeedError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
