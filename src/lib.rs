//! Dish and order dispatch for a food delivery backend.
//!
//! Each request runs through a pipeline: an ordered chain of validators that
//! inspect the payload and path, then a terminal handler that reads or
//! mutates an in-memory record store. The first validator to fail ends the
//! request with an error and a status code.
//!
//! # Core Components
//!
//! - [`OperationHandler`] - Entry point that routes requests to pipelines
//! - [`pipeline::Pipeline`] - Validator chain plus terminal handler
//! - [`storage::RecordStore`] - Trait for implementing storage backends
//!
//! # Quick Start
//!
//! ```rust
//! use grubdash::{OperationHandler, OperationRequest};
//! use grubdash::resource::ResourceType;
//!
//! # async fn example() {
//! let handler = OperationHandler::builder().build();
//! let response = handler
//!     .handle_operation(OperationRequest::list(ResourceType::Orders))
//!     .await;
//! assert_eq!(response.status, 200);
//! # }
//! ```

pub mod config;
pub mod controllers;
pub mod error;
pub mod id;
pub mod operation_handler;
pub mod pipeline;
pub mod resource;
pub mod storage;

// Re-export commonly used types for convenience
pub use config::DispatchConfig;
pub use error::{DispatchError, DispatchResult, ValidationError};
pub use operation_handler::{
    OperationHandler, OperationHandlerBuilder, OperationMetadata, OperationRequest,
    OperationResponse,
};
pub use pipeline::Operation;
pub use resource::{Dish, Order, OrderDish, OrderStatus, ResourceType};
pub use storage::{InMemoryStore, RecordStore};
