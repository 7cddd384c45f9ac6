//! Framework-agnostic operation handler.
//!
//! This module turns structured requests into pipeline runs and renders the
//! outcome as a response with a status code, a body and request metadata.
//!
//! # Key Types
//!
//! - [`OperationHandler`] - Dispatches requests to the dish and order pipelines
//! - [`OperationRequest`] - Structured request (operation, collection, route id, body)
//! - [`OperationResponse`] - Status, data or error, and metadata
//!
//! # Examples
//!
//! ```rust
//! use grubdash::operation_handler::{OperationHandler, OperationRequest};
//! use grubdash::resource::ResourceType;
//! use serde_json::json;
//!
//! # async fn example() {
//! let handler = OperationHandler::builder().build();
//!
//! let request = OperationRequest::create(
//!     ResourceType::Dishes,
//!     json!({"data": {
//!         "name": "Dolcelatte and chickpea spaghetti",
//!         "description": "Spaghetti topped with a blend of dolcelatte and chickpeas",
//!         "price": 19,
//!         "image_url": "https://example.com/spaghetti.jpg"
//!     }}),
//! );
//! let response = handler.handle_operation(request).await;
//! assert_eq!(response.status, 201);
//! # }
//! ```

mod builders;
mod core;
mod errors;

pub use self::core::{
    ErrorPayload, OperationHandler, OperationMetadata, OperationRequest, OperationResponse,
};

pub use builders::OperationHandlerBuilder;

pub use errors::create_error_response;
