use thiserror::Error;

/// Why a documentation page could not be retrieved.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("body too large ({0} bytes)")]
    BodyTooLarge(u64),

    #[error("unsupported content-type: {0}")]
    UnsupportedContentType(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Status code of a non-success response, if that is what failed.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::NOT_FOUND)
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_accessors() {
        let not_found = FetchError::Http {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(not_found.status(), Some(StatusCode::NOT_FOUND));
        assert!(not_found.is_not_found());

        let timeout = FetchError::RequestTimeout;
        assert_eq!(timeout.status(), None);
        assert!(!timeout.is_not_found());
    }

    #[test]
    fn test_display() {
        let unavailable = FetchError::Http {
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(unavailable.to_string(), "http error 503 Service Unavailable");
        assert_eq!(FetchError::RedirectLoop.to_string(), "too many redirects");
    }
}
