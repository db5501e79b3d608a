use thiserror::Error;

pub type DashResult<T> = Result<T, DashError>;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("failed to load dataset: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Fatal startup failures while building the dataset.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("source `{source_name}` is unreachable: {reason}")]
    Unreachable { source_name: String, reason: String },

    #[error("remote sources are not supported in this build: `{0}`")]
    RemoteDisabled(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(String),

    #[error("row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("no record carries a payload mass; payload bounds are undefined")]
    EmptyPayloadDomain,
}
