//! Error types for the paging server
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::OperationOutcome;

// == Paging Error Enum ==
/// Unified error type for the paging cache and its HTTP surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PagingError {
    /// Search ID was never issued or has been evicted
    #[error("Search ID \"{0}\" does not exist and may have expired")]
    NotFound(String),

    /// Negative offset/count or malformed request data
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PagingError {
    /// FHIR issue type code reported in the OperationOutcome.
    pub fn issue_code(&self) -> &'static str {
        match self {
            PagingError::NotFound(_) => "not-found",
            PagingError::InvalidArgument(_) => "invalid",
        }
    }

    /// HTTP status the error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            // An unknown paging token is reported the way FHIR servers report expired searches
            PagingError::NotFound(_) => StatusCode::GONE,
            PagingError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        }
    }
}

// == Extractor Rejections ==
// Malformed query strings and bodies are reported as OperationOutcomes too.
impl From<QueryRejection> for PagingError {
    fn from(rejection: QueryRejection) -> Self {
        PagingError::InvalidArgument(rejection.body_text())
    }
}

impl From<JsonRejection> for PagingError {
    fn from(rejection: JsonRejection) -> Self {
        PagingError::InvalidArgument(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for PagingError {
    fn into_response(self) -> Response {
        let body = Json(OperationOutcome::error(self.issue_code(), self.to_string()));
        (self.status(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the paging server.
pub type Result<T> = std::result::Result<T, PagingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_mentions_search_id() {
        let err = PagingError::NotFound("abc".to_string());
        assert!(err.to_string().contains("\"abc\""));
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn test_query_rejection_is_invalid_argument() {
        let uri: axum::http::Uri = "/?_getpages=x&_getpagesoffset=abc".parse().unwrap();
        let rejection = axum::extract::Query::<crate::models::GetPagesQuery>::try_from_uri(&uri)
            .err()
            .unwrap();

        let err = PagingError::from(rejection);
        assert!(matches!(err, PagingError::InvalidArgument(_)));
        assert_eq!(err.issue_code(), "invalid");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            PagingError::NotFound("x".to_string()).status(),
            StatusCode::GONE
        );
        assert_eq!(
            PagingError::InvalidArgument("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
