/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Failure class shown to the user when this error ends a request.
    ///
    /// Only an explicit "not found" answer is distinguished; anything else
    /// that went wrong between us and the API is a transport failure.
    pub fn failure(&self) -> Failure {
        match self {
            AppError::NotFound(_) => Failure::NotFound,
            _ => Failure::Transport,
        }
    }
}

/// Failure classes surfaced to the user as a full-panel message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Network or HTTP error talking to the recommendation API
    Transport,
    /// The API has no movie for the requested title
    NotFound,
    /// A valid discover query that matched nothing
    EmptyResult,
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_classification() {
        assert_eq!(
            AppError::NotFound("Movie not found".to_string()).failure(),
            Failure::NotFound
        );
        assert_eq!(AppError::ExternalApi("502".to_string()).failure(), Failure::Transport);
        assert_eq!(
            AppError::MalformedPayload("missing title".to_string()).failure(),
            Failure::Transport
        );
        assert_eq!(AppError::Internal("gone".to_string()).failure(), Failure::Transport);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::ExternalApi("status 500".to_string());
        assert_eq!(err.to_string(), "External API error: status 500");
    }
}
