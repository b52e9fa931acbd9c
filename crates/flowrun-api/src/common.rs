// Common DTOs for public API
//
// These types are shared across the definition and instance endpoints.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable reason.
    #[schema(example = "Action 'approve' not allowed from state 'draft'.")]
    pub error: String,
    /// Machine-readable error kind.
    #[schema(example = "transition_not_allowed")]
    pub code: String,
    /// HTTP status code, repeated for convenience.
    #[schema(example = 400)]
    pub status: u16,
}

/// 201 Created with a `Location` header pointing at the new resource.
///
/// Ids that cannot be expressed as a header value get no `Location` header.
pub fn created<T: Serialize>(location: String, body: T) -> Response {
    let mut response = (StatusCode::CREATED, Json(body)).into_response();
    match HeaderValue::try_from(location) {
        Ok(value) => {
            response.headers_mut().insert(header::LOCATION, value);
        }
        Err(e) => tracing::warn!(error = %e, "Resource location is not a valid header value"),
    }
    response
}
