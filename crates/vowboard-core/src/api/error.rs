use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Longest response body carried into an error message
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            404 => ApiError::NotFound(truncated),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Whether a later attempt could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::RateLimited | ApiError::ServerError(_) | ApiError::NetworkError(_)
        )
    }
}
