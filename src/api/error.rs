use thiserror::Error;

// Every call is single-shot and fail-fast. Whatever goes wrong, the run is
// over and the error carries enough to say why.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected payload shape: {0}")]
    Shape(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Shape(err.to_string())
    }
}
