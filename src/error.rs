use reqwest::StatusCode;

/// Errors raised at the backend API boundary.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// Transport failure (connect, DNS, TLS, timeout).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Status code outside the accepted data / no-data set.
    #[error("backend returned {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        source: reqwest::Error,
    },

    #[error("invalid json for {context}: {source}")]
    Decode {
        context: String,
        source: serde_json::Error,
    },

    /// The body parsed but failed validation.
    #[error("invalid {what}: {detail}")]
    Invalid { what: &'static str, detail: String },

    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;
