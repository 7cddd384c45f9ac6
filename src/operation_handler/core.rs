//! Core operation handler infrastructure
//!
//! This module contains the request/response types and the dispatcher that
//! routes an [`OperationRequest`] to the pipeline registered for its
//! resource and operation.

use crate::config::DispatchConfig;
use crate::controllers::ResourceRoutes;
use crate::error::DispatchResult;
use crate::pipeline::{Operation, Reply, Request};
use crate::resource::{Dish, Dishes, Order, Orders, Resource, ResourceType, payload_from_body};
use crate::storage::{InMemoryStore, Record, RecordStore};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::{Value, json};

/// Transport-agnostic entry point for dish and order operations.
///
/// Hosts translate their own requests (HTTP, message queue, test harness)
/// into [`OperationRequest`]s and render the returned
/// [`OperationResponse`]s.
pub struct OperationHandler<DS = InMemoryStore<Dish>, OS = InMemoryStore<Order>> {
    pub(super) dishes: ResourceRoutes<Dishes, DS>,
    pub(super) orders: ResourceRoutes<Orders, OS>,
    pub(super) config: DispatchConfig,
}

/// Structured request for a dispatch operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    /// The operation to perform
    pub operation: Operation,
    /// The collection the operation targets
    pub resource_type: ResourceType,
    /// Record id from the route, for read/update/delete
    pub resource_id: Option<String>,
    /// Request body, normally `{"data": {...}}`
    pub body: Option<Value>,
    /// Request ID for tracing and correlation
    pub request_id: Option<String>,
}

/// Structured response from a dispatch operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// HTTP-style status code
    pub status: u16,
    /// The record or records returned by the operation
    pub data: Option<Value>,
    /// Error details if the operation failed
    pub error: Option<ErrorPayload>,
    /// Error code for programmatic handling
    pub error_code: Option<String>,
    /// Additional metadata about the operation
    pub metadata: OperationMetadata,
}

/// Error details returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub status: u16,
    pub message: String,
}

/// Metadata about a dispatch operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationMetadata {
    /// Resource collection involved in the operation
    pub resource_type: ResourceType,
    /// The operation that was requested
    pub operation: Operation,
    /// Record ID if applicable
    pub resource_id: Option<String>,
    /// Number of records returned
    pub resource_count: Option<usize>,
    /// Request ID for tracing
    pub request_id: String,
}

impl OperationResponse {
    /// The JSON body a host should send back, if any.
    ///
    /// Successful responses wrap their payload as `{"data": ...}`; failures
    /// render as `{"error": message}`; 204 responses have no body.
    pub fn body(&self) -> Option<Value> {
        match (&self.data, &self.error) {
            (_, Some(error)) => Some(json!({ "error": error.message })),
            (Some(data), None) => Some(json!({ "data": data })),
            (None, None) => None,
        }
    }

    /// Error message if the operation failed.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}

impl OperationHandler {
    /// Start building a handler backed by in-memory stores.
    pub fn builder() -> super::OperationHandlerBuilder {
        super::OperationHandlerBuilder::new()
    }
}

impl<DS, OS> OperationHandler<DS, OS>
where
    DS: RecordStore<Dish> + 'static,
    OS: RecordStore<Order> + 'static,
{
    /// Create a handler over the given stores with default configuration.
    pub fn new(dish_store: DS, order_store: OS) -> Self {
        super::OperationHandlerBuilder::new()
            .with_dish_store(dish_store)
            .with_order_store(order_store)
            .build()
    }

    /// Handle a structured dispatch request.
    ///
    /// This is the main entry point. It never fails: every error is turned
    /// into an unsuccessful [`OperationResponse`].
    pub async fn handle_operation(&self, request: OperationRequest) -> OperationResponse {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        info!(
            "Dispatching {} {} (request: '{}')",
            request.resource_type, request.operation, request_id
        );

        let result = match request.resource_type {
            ResourceType::Dishes => dispatch(&self.dishes, &request, &request_id).await,
            ResourceType::Orders => dispatch(&self.orders, &request, &request_id).await,
        };

        match &result {
            Ok(response) => {
                debug!(
                    "{} {} completed with status {} (request: '{}')",
                    request.resource_type, request.operation, response.status, request_id
                );
            }
            Err(e) => {
                warn!(
                    "{} {} failed: {} (request: '{}')",
                    request.resource_type, request.operation, e, request_id
                );
            }
        }

        result.unwrap_or_else(|e| super::errors::create_error_response(e, &request, request_id))
    }

    /// Dish routes and store.
    pub fn dishes(&self) -> &ResourceRoutes<Dishes, DS> {
        &self.dishes
    }

    /// Order routes and store.
    pub fn orders(&self) -> &ResourceRoutes<Orders, OS> {
        &self.orders
    }

    /// Active configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }
}

async fn dispatch<R, S>(
    routes: &ResourceRoutes<R, S>,
    request: &OperationRequest,
    request_id: &str,
) -> DispatchResult<OperationResponse>
where
    R: Resource,
    S: RecordStore<R::Record>,
{
    let payload: R::Payload = payload_from_body(request.body.as_ref());
    let pipeline_request = Request::new(request_id, request.resource_id.clone(), payload);
    let reply = routes.dispatch(request.operation, pipeline_request).await?;
    success_response(reply, request, request_id)
}

fn success_response<T>(
    reply: Reply<T>,
    request: &OperationRequest,
    request_id: &str,
) -> DispatchResult<OperationResponse>
where
    T: Record + Serialize,
{
    let status = reply.status_code();
    let resource_count = reply.record_count();

    let (data, resource_id) = match reply {
        Reply::Found(record) | Reply::Created(record) => (
            Some(serde_json::to_value(&record)?),
            Some(record.id().to_string()),
        ),
        Reply::Listed(records) => (
            Some(serde_json::to_value(&records)?),
            request.resource_id.clone(),
        ),
        Reply::NoContent => (None, request.resource_id.clone()),
    };

    Ok(OperationResponse {
        success: true,
        status,
        data,
        error: None,
        error_code: None,
        metadata: OperationMetadata {
            resource_type: request.resource_type,
            operation: request.operation,
            resource_id,
            resource_count: Some(resource_count),
            request_id: request_id.to_string(),
        },
    })
}
