use thiserror::Error;

/// Failure taxonomy for catalog fetches. None of these ever reach the view
/// layer as errors; the query engine collapses them into its fallback state.
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("transport error talking to the catalog backend: {0}")]
    Transport(String),
    #[error("catalog backend answered with unexpected status {status}")]
    UnexpectedStatus { status: u16 },
    #[error("failed to decode catalog backend response: {0}")]
    Decode(String),
}
