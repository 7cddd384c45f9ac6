//! Terminal handlers.
//!
//! The handler is the last step of a pipeline and the only one allowed to
//! mutate the store. Handlers shared by every resource live here; create,
//! update and delete are resource-specific and live with their controllers.

use crate::error::{DispatchError, DispatchResult};
use crate::pipeline::{Reply, Request};
use crate::resource::Resource;
use crate::storage::RecordStore;
use async_trait::async_trait;

/// The terminal step of a pipeline.
#[async_trait]
pub trait Handler<R: Resource, S>: Send + Sync {
    async fn handle(
        &self,
        request: Request<R::Payload>,
        context: R::Context,
        store: &S,
    ) -> DispatchResult<Reply<R::Record>>;
}

/// Returns the full collection in storage order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRecords;

#[async_trait]
impl<R, S> Handler<R, S> for ListRecords
where
    R: Resource,
    S: RecordStore<R::Record>,
{
    async fn handle(
        &self,
        _request: Request<R::Payload>,
        _context: R::Context,
        store: &S,
    ) -> DispatchResult<Reply<R::Record>> {
        let records = store.list().await.map_err(DispatchError::storage)?;
        Ok(Reply::Listed(records))
    }
}

/// Returns the record attached by the existence check.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadAttached;

#[async_trait]
impl<R, S> Handler<R, S> for ReadAttached
where
    R: Resource,
    S: RecordStore<R::Record>,
{
    async fn handle(
        &self,
        _request: Request<R::Payload>,
        context: R::Context,
        _store: &S,
    ) -> DispatchResult<Reply<R::Record>> {
        let record = R::attached(&context).cloned().ok_or_else(|| {
            DispatchError::internal(format!("{} read ran without an existence check", R::LABEL))
        })?;
        Ok(Reply::Found(record))
    }
}

/// Take a context field that an earlier validator must have set.
///
/// A missing value means the pipeline was assembled without that validator.
pub fn validated<T>(value: Option<T>, field: &'static str) -> DispatchResult<T> {
    value.ok_or_else(|| {
        DispatchError::internal(format!("handler reached without a validated '{}'", field))
    })
}
