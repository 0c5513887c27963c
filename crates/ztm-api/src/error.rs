use thiserror::Error;

/// Top-level error type for the `ztm-api` crate.
///
/// Covers every failure mode of the Central API surface: authentication,
/// transport, structured API rejections, and payload decoding.
/// `ztm-core` wraps these with lifecycle context.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token was rejected (HTTP 401 / 403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Rate limited by Central. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Central API ────────────────────────────────────────────────
    /// Non-success response from Central (validation, conflict, not found).
    #[error("Central API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// HTTP status code, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_404_is_not_found() {
        let err = Error::Api {
            status: 404,
            message: "not found".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn other_statuses_are_not_not_found() {
        let err = Error::Api {
            status: 503,
            message: "unavailable".into(),
        };
        assert!(!err.is_not_found());
        assert!(!Error::Authentication { message: "denied".into() }.is_not_found());
    }

    #[test]
    fn rate_limit_reports_429() {
        let err = Error::RateLimited {
            retry_after_secs: 5,
        };
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.to_string(), "Rate limited -- retry after 5s");
    }
}
