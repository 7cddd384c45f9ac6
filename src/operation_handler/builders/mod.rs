//! Builder utilities for operation handler types
//!
//! Convenience constructors for [`OperationRequest`](super::OperationRequest)
//! and the [`OperationHandlerBuilder`].

pub mod handler;
pub mod request;

pub use handler::OperationHandlerBuilder;
