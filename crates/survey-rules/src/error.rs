use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading survey documents or response snapshots.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("invalid survey document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
