//! Error handling utilities for operation handlers
//!
//! Turns a [`DispatchError`] into the unsuccessful [`OperationResponse`]
//! a host sends back.

use crate::error::DispatchError;
use crate::operation_handler::core::{
    ErrorPayload, OperationMetadata, OperationRequest, OperationResponse,
};

/// Create an error response from a DispatchError.
pub fn create_error_response(
    error: DispatchError,
    request: &OperationRequest,
    request_id: String,
) -> OperationResponse {
    let status = error.status_code();

    // Internal details stay in the logs.
    let message = match &error {
        DispatchError::Json(_) | DispatchError::Storage(_) | DispatchError::Internal { .. } => {
            "Internal server error".to_string()
        }
        _ => error.to_string(),
    };

    OperationResponse {
        success: false,
        status,
        data: None,
        error: Some(ErrorPayload { status, message }),
        error_code: Some(error.error_code().to_string()),
        metadata: OperationMetadata {
            resource_type: request.resource_type,
            operation: request.operation,
            resource_id: request.resource_id.clone(),
            resource_count: None,
            request_id,
        },
    }
}
