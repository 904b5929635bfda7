//! Unified error types for pagetalk.

/// Unified error types shared by the fetch pipeline and cache layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// URL failed to parse.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response or transport failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Key-value store operation failed (transport, auth, protocol).
    #[error("STORE_ERROR: {0}")]
    StoreError(String),

    /// Stored value could not be decoded into the expected shape.
    #[error("STORE_DECODE: {0}")]
    StoreDecode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::StoreError("connection refused".to_string());
        assert!(err.to_string().contains("STORE_ERROR"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_decode_error_display() {
        let err = Error::StoreDecode("not json".to_string());
        assert!(err.to_string().contains("STORE_DECODE"));
    }
}
