use std::path::PathBuf;

/// Errors surfaced by the library.
///
/// Sparse or missing metadata is never an error: tables simply shrink.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid timeline granularity {0:?} (expected day, week, month or year)")]
    InvalidGranularity(String),

    #[error("cannot read photo folder {}", .path.display())]
    ScanRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
