//! Request builder utilities for OperationRequest
//!
//! Convenience constructors for each operation type.

use crate::operation_handler::core::OperationRequest;
use crate::pipeline::Operation;
use crate::resource::ResourceType;
use serde_json::Value;

impl OperationRequest {
    /// Create a new list operation request.
    pub fn list(resource_type: ResourceType) -> Self {
        Self {
            operation: Operation::List,
            resource_type,
            resource_id: None,
            body: None,
            request_id: None,
        }
    }

    /// Create a new create operation request.
    ///
    /// `body` is the full envelope, e.g. `{"data": {...}}`.
    pub fn create(resource_type: ResourceType, body: Value) -> Self {
        Self {
            operation: Operation::Create,
            resource_type,
            resource_id: None,
            body: Some(body),
            request_id: None,
        }
    }

    /// Create a new read operation request.
    pub fn read(resource_type: ResourceType, resource_id: impl Into<String>) -> Self {
        Self {
            operation: Operation::Read,
            resource_type,
            resource_id: Some(resource_id.into()),
            body: None,
            request_id: None,
        }
    }

    /// Create a new update operation request.
    pub fn update(
        resource_type: ResourceType,
        resource_id: impl Into<String>,
        body: Value,
    ) -> Self {
        Self {
            operation: Operation::Update,
            resource_type,
            resource_id: Some(resource_id.into()),
            body: Some(body),
            request_id: None,
        }
    }

    /// Create a new delete operation request.
    pub fn delete(resource_type: ResourceType, resource_id: impl Into<String>) -> Self {
        Self {
            operation: Operation::Delete,
            resource_type,
            resource_id: Some(resource_id.into()),
            body: None,
            request_id: None,
        }
    }

    /// Set the request ID used for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_request() {
        let request = OperationRequest::update(ResourceType::Orders, "o1", json!({"data": {}}))
            .with_request_id("req-9");

        assert_eq!(request.operation, Operation::Update);
        assert_eq!(request.resource_type, ResourceType::Orders);
        assert_eq!(request.resource_id.as_deref(), Some("o1"));
        assert_eq!(request.request_id.as_deref(), Some("req-9"));
        assert!(request.body.is_some());
    }

    #[test]
    fn test_list_request_has_no_target() {
        let request = OperationRequest::list(ResourceType::Dishes);
        assert!(request.resource_id.is_none());
        assert!(request.body.is_none());
    }
}
