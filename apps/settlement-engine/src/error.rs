//! Service error handling for the settlement engine.
//!
//! Every failure that reaches the HTTP boundary is turned into a
//! [`ServiceError`] carrying a stable [`ErrorCode`]. The code alone decides
//! the HTTP status.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `INVALID_REQUEST` | 400 | Malformed or structurally invalid request |
//! | `UNKNOWN_SYMBOL` | 400 | No share rate recorded for the symbol |
//! | `UNKNOWN_PORTFOLIO` | 400 | No portfolio with the id |
//! | `INSUFFICIENT_POSITION` | 404 | SELL larger than the held position |
//! | `NOT_FOUND` | 404 | Read of an unknown resource |
//! | `LOOKUP_TIMEOUT` | 504 | A rate or portfolio lookup did not answer in time |
//! | `COLLABORATOR_UNAVAILABLE` | 500 | A store failed |
//! | `INTERNAL_ERROR` | 500 | Unexpected server error |

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::dto::ValidationErrors;
use crate::application::use_cases::{QueryError, SettlementError};
use crate::domain::trade_settlement::RejectionReason;

/// Error codes for the settlement engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    /// Invalid request format or missing fields.
    InvalidRequest,

    // Settlement rejections
    /// No share rate recorded for the symbol.
    UnknownSymbol,
    /// No portfolio with the requested id.
    UnknownPortfolio,
    /// SELL quantity exceeds the net position.
    InsufficientPosition,

    // Reads
    /// Requested resource does not exist.
    NotFound,

    // Infrastructure
    /// A lookup exceeded its time bound.
    LookupTimeout,
    /// A backing store failed.
    CollaboratorUnavailable,
    /// Internal server error.
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status for this error.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::UnknownSymbol | Self::UnknownPortfolio => {
                StatusCode::BAD_REQUEST
            }
            Self::InsufficientPosition | Self::NotFound => StatusCode::NOT_FOUND,
            Self::LookupTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::CollaboratorUnavailable | Self::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::UnknownSymbol => "UNKNOWN_SYMBOL",
            Self::UnknownPortfolio => "UNKNOWN_PORTFOLIO",
            Self::InsufficientPosition => "INSUFFICIENT_POSITION",
            Self::NotFound => "NOT_FOUND",
            Self::LookupTimeout => "LOOKUP_TIMEOUT",
            Self::CollaboratorUnavailable => "COLLABORATOR_UNAVAILABLE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// An error with context, ready to be rendered as an HTTP response.
#[derive(Debug, Error)]
pub struct ServiceError {
    /// Error code.
    code: ErrorCode,
    /// Human-readable message.
    message: String,
    /// Additional context (key-value pairs).
    context: Vec<(String, String)>,
}

impl ServiceError {
    /// Create a new service error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Convert to the HTTP error body.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            message: self.message.clone(),
            details: self.context.iter().cloned().collect(),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Additional details.
    pub details: BTreeMap<String, String>,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.code.http_status(), Json(self.to_http_response())).into_response()
    }
}

/// Convenience constructors for common errors.
impl ServiceError {
    /// Invalid request format.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Resource not found.
    #[must_use]
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        let id = id.to_string();
        Self::new(ErrorCode::NotFound, format!("{resource} {id} not found"))
            .with_context(resource.to_lowercase(), id)
    }

    /// Internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        errors.errors.into_iter().fold(
            Self::invalid_request("Request failed validation"),
            |err, field| err.with_context(field.field, field.message),
        )
    }
}

impl From<RejectionReason> for ServiceError {
    fn from(reason: RejectionReason) -> Self {
        let summary = reason.summary();
        match reason {
            RejectionReason::UnknownSymbol { symbol } => {
                Self::new(ErrorCode::UnknownSymbol, summary).with_context("symbol", symbol.as_str())
            }
            RejectionReason::UnknownPortfolio { portfolio_id } => {
                Self::new(ErrorCode::UnknownPortfolio, summary)
                    .with_context("portfolioId", portfolio_id.to_string())
            }
            RejectionReason::InsufficientPosition {
                available,
                requested,
            } => Self::new(ErrorCode::InsufficientPosition, summary)
                .with_context("available", available.to_string())
                .with_context("requested", requested.to_string()),
        }
    }
}

impl From<SettlementError> for ServiceError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::Rejected(reason) => reason.into(),
            SettlementError::LookupTimedOut { lookup, .. } => {
                Self::new(ErrorCode::LookupTimeout, err.to_string()).with_context("lookup", lookup)
            }
            SettlementError::Pricing(_) => Self::internal(err.to_string()),
            SettlementError::RateSource(_)
            | SettlementError::PortfolioSource(_)
            | SettlementError::Ledger(_) => {
                Self::new(ErrorCode::CollaboratorUnavailable, err.to_string())
            }
        }
    }
}

impl From<QueryError> for ServiceError {
    fn from(err: QueryError) -> Self {
        Self::new(ErrorCode::CollaboratorUnavailable, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::FieldError;
    use crate::domain::shared::{DomainError, PortfolioId, Quantity, Symbol};
    use crate::domain::trade_settlement::{LedgerError, NetPosition};
    use std::time::Duration;
    use test_case::test_case;

    #[test_case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST ; "invalid request")]
    #[test_case(ErrorCode::UnknownSymbol, StatusCode::BAD_REQUEST ; "unknown symbol")]
    #[test_case(ErrorCode::UnknownPortfolio, StatusCode::BAD_REQUEST ; "unknown portfolio")]
    #[test_case(ErrorCode::InsufficientPosition, StatusCode::NOT_FOUND ; "insufficient position")]
    #[test_case(ErrorCode::NotFound, StatusCode::NOT_FOUND ; "not found")]
    #[test_case(ErrorCode::LookupTimeout, StatusCode::GATEWAY_TIMEOUT ; "lookup timeout")]
    #[test_case(ErrorCode::CollaboratorUnavailable, StatusCode::INTERNAL_SERVER_ERROR ; "collaborator")]
    #[test_case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR ; "internal")]
    fn error_code_http_mapping(code: ErrorCode, status: StatusCode) {
        assert_eq!(code.http_status(), status);
    }

    #[test]
    fn service_error_creation() {
        let error = ServiceError::new(ErrorCode::InvalidRequest, "Bad request")
            .with_context("field", "symbol")
            .with_context("value", "");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "Bad request");
        assert_eq!(error.context().len(), 2);
    }

    #[test]
    fn service_error_display() {
        let error = ServiceError::invalid_request("Missing field");
        assert_eq!(error.to_string(), "[INVALID_REQUEST] Missing field");
    }

    #[test]
    fn rejection_maps_to_short_message() {
        let error: ServiceError = RejectionReason::InsufficientPosition {
            available: NetPosition::new(10),
            requested: Quantity::new(1000).unwrap(),
        }
        .into();

        let body = error.to_http_response();
        assert_eq!(body.code, "INSUFFICIENT_POSITION");
        assert_eq!(body.message, "not enough shares");
        assert_eq!(body.details["available"], "10");
        assert_eq!(body.details["requested"], "1000");
    }

    #[test]
    fn settlement_errors_map_to_codes() {
        let err: ServiceError = SettlementError::from(RejectionReason::UnknownSymbol {
            symbol: Symbol::new("Z"),
        })
        .into();
        assert_eq!(err.code(), ErrorCode::UnknownSymbol);

        let err: ServiceError = SettlementError::from(RejectionReason::UnknownPortfolio {
            portfolio_id: PortfolioId::new(999),
        })
        .into();
        assert_eq!(err.code(), ErrorCode::UnknownPortfolio);
        assert_eq!(err.message(), "no portfolio");

        let err: ServiceError = SettlementError::LookupTimedOut {
            lookup: "rate",
            timeout: Duration::from_millis(10),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::LookupTimeout);

        let err: ServiceError = SettlementError::from(LedgerError::Unavailable {
            message: "down".to_string(),
        })
        .into();
        assert_eq!(err.code(), ErrorCode::CollaboratorUnavailable);

        let err: ServiceError = SettlementError::from(DomainError::InvalidValue {
            field: "price".to_string(),
            message: "overflows".to_string(),
        })
        .into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.code().http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_become_details() {
        let errors = ValidationErrors {
            errors: vec![
                FieldError {
                    field: "symbol".to_string(),
                    message: "is required".to_string(),
                },
                FieldError {
                    field: "noOfShares".to_string(),
                    message: "Quantity must be positive".to_string(),
                },
            ],
        };
        let body = ServiceError::from(errors).to_http_response();

        assert_eq!(body.code, "INVALID_REQUEST");
        assert_eq!(body.details.len(), 2);
        assert_eq!(body.details["symbol"], "is required");
    }

    #[test]
    fn not_found_carries_id() {
        let body = ServiceError::not_found("Portfolio", 42).to_http_response();
        assert_eq!(body.message, "Portfolio 42 not found");
        assert_eq!(body.details["portfolio"], "42");
    }
}
