// HTTP mapping for engine errors
//
// Every error kind gets a distinguishable response: the status code groups
// them (400 rejections, 404 lookups, 500 internal) and `code` names the kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flowrun_core::WorkflowError;

use crate::common::ErrorResponse;

/// Error returned by workflow handlers
#[derive(Debug)]
pub struct ApiError(pub WorkflowError);

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            WorkflowError::Definition(_) => StatusCode::BAD_REQUEST,
            WorkflowError::DefinitionNotFound(_) | WorkflowError::InstanceNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            WorkflowError::ActionInvalid(_) | WorkflowError::TransitionNotAllowed { .. } => {
                StatusCode::BAD_REQUEST
            }
            WorkflowError::Store(_) | WorkflowError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.code(), "Workflow operation failed");
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
            code: self.0.code().to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
