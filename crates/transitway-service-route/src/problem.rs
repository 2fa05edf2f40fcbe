//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details
//! standard. See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use transitway_lib::Error as LibError;

/// Problem type URI for unknown stop ids or names.
pub const PROBLEM_UNKNOWN_STOP: &str = "/problems/unknown-stop";

/// Problem type URI for routes that cannot be found.
pub const PROBLEM_ROUTE_NOT_FOUND: &str = "/problems/route-not-found";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// RFC 9457 Problem Details response structure.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Create a 404 Not Found problem for unknown stops.
    pub fn unknown_stop(query: &str, suggestions: &[String]) -> Self {
        let detail = if suggestions.is_empty() {
            format!("Stop '{}' not found", query)
        } else {
            format!(
                "Stop '{}' not found. Did you mean: {}?",
                query,
                suggestions.join(", ")
            )
        };
        Self::new(PROBLEM_UNKNOWN_STOP, "Unknown Stop", StatusCode::NOT_FOUND).with_detail(detail)
    }

    /// Create a 404 Not Found problem for unreachable routes.
    pub fn route_not_found(start: &str, goal: &str) -> Self {
        Self::new(
            PROBLEM_ROUTE_NOT_FOUND,
            "Route Not Found",
            StatusCode::NOT_FOUND,
        )
        .with_detail(format!("No route found between {start} and {goal}"))
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Server Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
    }

    /// Map a library error onto the matching problem response.
    pub fn from_lib_error(error: &LibError) -> Self {
        match error {
            LibError::UnknownStop { query, suggestions } => {
                Self::unknown_stop(query, suggestions)
            }
            LibError::RouteNotFound { start, goal } => Self::route_not_found(start, goal),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}
