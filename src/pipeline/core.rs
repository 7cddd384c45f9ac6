//! Core pipeline types.
//!
//! A [`Pipeline`] is an ordered list of validators followed by exactly one
//! terminal handler, serving one (resource, operation) pair. Validators run
//! strictly in declaration order and the first rejection ends the run; the
//! handler only sees requests every validator accepted.

use crate::error::DispatchResult;
use crate::pipeline::{Handler, Validator};
use crate::resource::Resource;
use crate::storage::RecordStore;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations a resource may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Return the whole collection
    List,
    /// Append a new record
    Create,
    /// Return one record by id
    Read,
    /// Overwrite one record by id
    Update,
    /// Remove one record by id
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input to a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Request<P> {
    /// Request ID for tracing and correlation
    pub request_id: String,
    /// Record id taken from the route, for read/update/delete
    pub route_id: Option<String>,
    /// Typed body payload
    pub payload: P,
}

impl<P> Request<P> {
    pub fn new(request_id: impl Into<String>, route_id: Option<String>, payload: P) -> Self {
        Self {
            request_id: request_id.into(),
            route_id,
            payload,
        }
    }
}

/// Successful outcome of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// A single record, status 200
    Found(T),
    /// A newly created record, status 201
    Created(T),
    /// A whole collection, status 200
    Listed(Vec<T>),
    /// Success without a body, status 204
    NoContent,
}

impl<T> Reply<T> {
    /// HTTP-style status code for this reply.
    pub fn status_code(&self) -> u16 {
        match self {
            Reply::Found(_) | Reply::Listed(_) => 200,
            Reply::Created(_) => 201,
            Reply::NoContent => 204,
        }
    }

    /// Number of records carried by the reply.
    pub fn record_count(&self) -> usize {
        match self {
            Reply::Found(_) | Reply::Created(_) => 1,
            Reply::Listed(records) => records.len(),
            Reply::NoContent => 0,
        }
    }
}

/// Validators plus one terminal handler for one (resource, operation) pair.
pub struct Pipeline<R: Resource, S> {
    operation: Operation,
    validators: Vec<Box<dyn Validator<R, S>>>,
    handler: Box<dyn Handler<R, S>>,
}

impl<R, S> Pipeline<R, S>
where
    R: Resource,
    S: RecordStore<R::Record>,
{
    /// Start building a pipeline for `operation`.
    pub fn builder(operation: Operation) -> PipelineBuilder<R, S> {
        PipelineBuilder::new(operation)
    }

    /// The operation this pipeline serves.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Validator names in execution order.
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    /// Run the validators in order, then the handler.
    ///
    /// The first validator error is returned as-is and no later step runs.
    pub async fn run(
        &self,
        request: Request<R::Payload>,
        store: &S,
    ) -> DispatchResult<Reply<R::Record>> {
        let mut context = R::Context::default();

        for validator in &self.validators {
            if let Err(e) = validator.validate(&request, &mut context, store).await {
                debug!(
                    "{} {} rejected by '{}' (request: '{}'): {}",
                    R::TYPE,
                    self.operation,
                    validator.name(),
                    request.request_id,
                    e
                );
                return Err(e);
            }
            trace!(
                "{} {} passed '{}' (request: '{}')",
                R::TYPE,
                self.operation,
                validator.name(),
                request.request_id
            );
        }

        self.handler.handle(request, context, store).await
    }
}

impl<R: Resource, S> fmt::Debug for Pipeline<R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("resource", &R::TYPE)
            .field("operation", &self.operation)
            .field(
                "validators",
                &self.validators.iter().map(|v| v.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for [`Pipeline`].
///
/// ```rust
/// use grubdash::pipeline::{ListRecords, Operation, Pipeline};
/// use grubdash::resource::{Dish, Dishes};
/// use grubdash::storage::InMemoryStore;
///
/// let pipeline: Pipeline<Dishes, InMemoryStore<Dish>> =
///     Pipeline::builder(Operation::List).handle(ListRecords);
/// assert!(pipeline.validator_names().is_empty());
/// ```
pub struct PipelineBuilder<R: Resource, S> {
    operation: Operation,
    validators: Vec<Box<dyn Validator<R, S>>>,
}

impl<R, S> PipelineBuilder<R, S>
where
    R: Resource,
    S: RecordStore<R::Record>,
{
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            validators: Vec::new(),
        }
    }

    /// Append a validator to the chain.
    pub fn validate(mut self, validator: impl Validator<R, S> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Finish the pipeline with its terminal handler.
    pub fn handle(self, handler: impl Handler<R, S> + 'static) -> Pipeline<R, S> {
        Pipeline {
            operation: self.operation,
            validators: self.validators,
            handler: Box::new(handler),
        }
    }
}
