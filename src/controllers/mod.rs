//! Resource controllers.
//!
//! A controller owns a record store and the pipelines registered for its
//! resource. Not every resource supports every operation: dispatching an
//! operation with no registered pipeline fails with MethodNotAllowed.

pub mod dishes;
pub mod orders;

use crate::error::{DispatchError, DispatchResult};
use crate::pipeline::{Operation, Pipeline, Reply, Request};
use crate::resource::Resource;
use crate::storage::RecordStore;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Store plus per-operation pipelines for one resource.
pub struct ResourceRoutes<R: Resource, S> {
    store: S,
    pipelines: HashMap<Operation, Pipeline<R, S>>,
}

impl<R, S> ResourceRoutes<R, S>
where
    R: Resource,
    S: RecordStore<R::Record>,
{
    /// Create routes with no registered operations.
    pub fn new(store: S) -> Self {
        Self {
            store,
            pipelines: HashMap::new(),
        }
    }

    /// Register a pipeline, replacing any previous one for its operation.
    pub fn register(mut self, pipeline: Pipeline<R, S>) -> Self {
        debug!(
            "Registering {} {} with validators {:?}",
            R::TYPE,
            pipeline.operation(),
            pipeline.validator_names()
        );
        self.pipelines.insert(pipeline.operation(), pipeline);
        self
    }

    /// Whether `operation` has a registered pipeline.
    pub fn supports(&self, operation: Operation) -> bool {
        self.pipelines.contains_key(&operation)
    }

    /// Supported operations, in canonical order.
    pub fn operations(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| self.supports(*op))
            .collect()
    }

    /// The pipeline registered for `operation`.
    pub fn pipeline(&self, operation: Operation) -> Option<&Pipeline<R, S>> {
        self.pipelines.get(&operation)
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the pipeline registered for `operation`.
    pub async fn dispatch(
        &self,
        operation: Operation,
        request: Request<R::Payload>,
    ) -> DispatchResult<Reply<R::Record>> {
        let pipeline = self
            .pipelines
            .get(&operation)
            .ok_or(DispatchError::MethodNotAllowed {
                resource: R::TYPE,
                operation,
            })?;
        pipeline.run(request, &self.store).await
    }
}

impl<R: Resource, S> fmt::Debug for ResourceRoutes<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRoutes")
            .field("resource", &R::TYPE)
            .field("pipelines", &self.pipelines.values().collect::<Vec<_>>())
            .finish()
    }
}
