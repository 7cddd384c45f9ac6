//! Error types for dispatch operations.
//!
//! Every failure a pipeline can produce is a [`DispatchError`]. Validator
//! failures carry a [`ValidationError`] whose `Display` output is the exact
//! message returned to the caller.

use crate::pipeline::Operation;
use crate::resource::ResourceType;

/// Main error type for dispatch operations.
///
/// Each variant maps to an HTTP-style status code through
/// [`DispatchError::status_code`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A validator rejected the request payload or path parameters
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Unknown record identifier
    #[error("{message}")]
    NotFound { message: String },

    /// The record exists but is in a state that forbids the operation
    #[error("{message}")]
    Conflict { message: String },

    /// No pipeline is registered for this (resource, operation) pair
    #[error("{operation} not allowed for {resource}")]
    MethodNotAllowed {
        resource: ResourceType,
        operation: Operation,
    },

    /// JSON serialization errors while rendering a reply
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors from the backing record store
    #[error("Record store error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Field-level validation failures.
///
/// The messages match what clients of the dishes and orders endpoints
/// already expect, including the dish mismatch wording `Router :`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is missing, empty, or of the wrong type
    #[error("{resource} must include a {field}.")]
    MissingField {
        resource: &'static str,
        field: &'static str,
    },

    /// Dish price is present but not a positive integer
    #[error("Dish must have a price that is an integer greater than 0.")]
    InvalidPrice,

    /// An order line item has a missing or non-positive quantity
    #[error("Dish {index} must have a quantity that is an integer greater than 0")]
    InvalidQuantity { index: usize },

    /// Order status is not one of the values accepted on update
    #[error("Order must have a status of pending, preparing, out-for-delivery, delivered.")]
    InvalidStatus,

    /// The id in the body disagrees with the id in the route
    #[error(
        "{resource} id does not match route id. {resource}: {body_id}, {} {route_id}",
        route_label(.resource)
    )]
    IdMismatch {
        resource: &'static str,
        body_id: String,
        route_id: String,
    },

    /// The operation needs a route id and none was given
    #[error("{resource} id is required for this operation.")]
    MissingRouteId { resource: &'static str },
}

/// Dish clients match on `Router :`; orders use `Route:`.
fn route_label(resource: &str) -> &'static str {
    match resource {
        "Dish" => "Router :",
        _ => "Route:",
    }
}

impl DispatchError {
    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Wrap a record store error.
    pub fn storage<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(error))
    }

    /// HTTP-style status code for this error.
    ///
    /// Conflicts report 400, which is what existing clients of the order
    /// delete endpoint check for.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Conflict { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::MethodNotAllowed { .. } => 405,
            Self::Json(_) | Self::Storage(_) | Self::Internal { .. } => 500,
        }
    }

    /// Machine-readable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            Self::Json(_) => "JSON_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
