use thiserror::Error;

/// Proxy error types
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("URL parameter is required")]
    MissingTargetUrl,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Upstream request failed: {0}")]
    UpstreamError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// HTTP status code mapping for proxy errors
impl ProxyError {
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::MissingTargetUrl => 400,
            ProxyError::InvalidParameter(_) => 400,
            ProxyError::UpstreamError(_) => 500,
            ProxyError::InternalError(_) => 500,
            ProxyError::IoError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(ProxyError::MissingTargetUrl.status_code(), 400);
        assert_eq!(
            ProxyError::InvalidParameter("bad".to_string()).status_code(),
            400
        );
        assert_eq!(
            ProxyError::UpstreamError("connection refused".to_string()).status_code(),
            500
        );
        assert_eq!(
            ProxyError::InternalError("oops".to_string()).status_code(),
            500
        );
    }

    #[test]
    fn test_missing_url_message() {
        // Callers match on this exact message on the 400 path
        assert_eq!(
            ProxyError::MissingTargetUrl.to_string(),
            "URL parameter is required"
        );
    }
}
