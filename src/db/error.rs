use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the persistence layer. Callers decide whether they are
/// fatal (schema setup) or shown to the user (writes and reads).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create data directory `{path}`: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("unable to open database file `{path}`: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
