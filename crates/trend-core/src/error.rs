use thiserror::Error;

pub type TrendResult<T> = Result<T, TrendError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("render container `{0}` not found")]
    MissingContainer(String),

    #[error("error fetching data from {url}; status: {status}")]
    Fetch { url: String, status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("could not decode feed: {0}")]
    Decode(String),

    #[error("invalid query parameter: {0}")]
    InvalidQuery(String),
}

impl From<serde_json::Error> for TrendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
