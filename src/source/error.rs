//! Source resolution error definitions.

use http::StatusCode;
use thiserror::Error;

/// Errors raised while resolving image source bytes.
///
/// All variants are terminal for the request; nothing here is caught or
/// retried inside this crate. The transformation engine turns them into the
/// client-visible error response.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Target URL absent from an otherwise well-formed request. Raised
    /// before any I/O is attempted.
    #[error("URL is missing from request")]
    MissingTarget,

    /// The store was reachable but the object is absent or has an empty
    /// body.
    #[error("could not fetch image {key} from bucket {bucket}")]
    SourceNotFound { bucket: String, key: String },

    /// Origin fetch completed but returned a non-success status.
    #[error("could not fetch image from {url} (status {status})")]
    Upstream { url: String, status: StatusCode },

    /// Transport-level store failure (connection, credentials, ...). Not
    /// separately classified.
    #[error("store error: {0}")]
    Store(String),

    /// Transport-level origin failure (connection refused, timeout, DNS,
    /// malformed URL). Not separately classified.
    #[error("fetch error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A source header value could not be written onto the response sink.
    #[error("invalid header value: {0}")]
    Header(#[from] http::header::InvalidHeaderValue),
}

/// Result type for source resolution.
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::SourceNotFound {
            bucket: "assets".into(),
            key: "img/cat.png".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not fetch image img/cat.png from bucket assets"
        );

        let err = SourceError::Upstream {
            url: "https://cdn.example.com/a.jpg".into(),
            status: StatusCode::NOT_FOUND,
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("https://cdn.example.com/a.jpg"));
    }
}
