//! Validators: the steps that run before a pipeline's handler.
//!
//! Most validators are pure predicates over the request and are written as
//! plain functions wrapped in [`Check`]. The two that need the record store
//! or are shared across resources, [`RecordExists`] and [`RouteIdMatches`],
//! are generic over [`Resource`].

use crate::error::{DispatchError, DispatchResult, ValidationError};
use crate::pipeline::Request;
use crate::resource::Resource;
use crate::storage::RecordStore;
use async_trait::async_trait;
use std::marker::PhantomData;

/// One step of a validation chain.
///
/// On success a validator may fill fields of the per-request context for
/// later validators and the handler. On failure the returned error is the
/// pipeline's result.
#[async_trait]
pub trait Validator<R: Resource, S>: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn validate(
        &self,
        request: &Request<R::Payload>,
        context: &mut R::Context,
        store: &S,
    ) -> DispatchResult<()>;
}

/// Signature of a pure validation predicate.
pub type CheckFn<R> = fn(
    &Request<<R as Resource>::Payload>,
    &mut <R as Resource>::Context,
) -> DispatchResult<()>;

/// A validator that never touches the store.
pub struct Check<R: Resource> {
    name: &'static str,
    check: CheckFn<R>,
}

impl<R: Resource> Check<R> {
    pub fn new(name: &'static str, check: CheckFn<R>) -> Self {
        Self { name, check }
    }
}

#[async_trait]
impl<R, S> Validator<R, S> for Check<R>
where
    R: Resource,
    S: RecordStore<R::Record>,
{
    fn name(&self) -> &'static str {
        self.name
    }

    async fn validate(
        &self,
        request: &Request<R::Payload>,
        context: &mut R::Context,
        _store: &S,
    ) -> DispatchResult<()> {
        (self.check)(request, context)
    }
}

/// Looks up the route id and attaches the record to the context.
///
/// Fails with NotFound when no record has that id.
pub struct RecordExists<R> {
    _resource: PhantomData<fn() -> R>,
}

impl<R> RecordExists<R> {
    pub fn new() -> Self {
        Self {
            _resource: PhantomData,
        }
    }
}

impl<R> Default for RecordExists<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R, S> Validator<R, S> for RecordExists<R>
where
    R: Resource,
    S: RecordStore<R::Record>,
{
    fn name(&self) -> &'static str {
        "record_exists"
    }

    async fn validate(
        &self,
        request: &Request<R::Payload>,
        context: &mut R::Context,
        store: &S,
    ) -> DispatchResult<()> {
        let id = route_id::<R>(request)?;
        match store.get(id).await.map_err(DispatchError::storage)? {
            Some(record) => {
                R::attach(context, record);
                Ok(())
            }
            None => Err(DispatchError::not_found(format!(
                "{} does not exist: {}",
                R::LABEL,
                id
            ))),
        }
    }
}

/// Rejects bodies whose id disagrees with the route id.
///
/// An absent or empty body id matches any route id.
pub struct RouteIdMatches<R> {
    _resource: PhantomData<fn() -> R>,
}

impl<R> RouteIdMatches<R> {
    pub fn new() -> Self {
        Self {
            _resource: PhantomData,
        }
    }
}

impl<R> Default for RouteIdMatches<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R, S> Validator<R, S> for RouteIdMatches<R>
where
    R: Resource,
    S: RecordStore<R::Record>,
{
    fn name(&self) -> &'static str {
        "route_id_matches"
    }

    async fn validate(
        &self,
        request: &Request<R::Payload>,
        _context: &mut R::Context,
        _store: &S,
    ) -> DispatchResult<()> {
        let route_id = route_id::<R>(request)?;
        match R::body_id(&request.payload).filter(|id| !id.is_empty()) {
            Some(body_id) if body_id != route_id => Err(ValidationError::IdMismatch {
                resource: R::LABEL,
                body_id: body_id.to_string(),
                route_id: route_id.to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }
}

/// The route id of a request, required for record-addressed operations.
pub fn route_id<R: Resource>(request: &Request<R::Payload>) -> DispatchResult<&str> {
    request
        .route_id
        .as_deref()
        .ok_or_else(|| ValidationError::MissingRouteId { resource: R::LABEL }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Dish, DishContext, DishPayload, Dishes};
    use crate::storage::InMemoryStore;

    fn pasta() -> Dish {
        Dish {
            id: "d1".to_string(),
            name: "Pasta".to_string(),
            description: "Tasty".to_string(),
            price: 12,
            image_url: "http://x".to_string(),
        }
    }

    fn request(route_id: Option<&str>, body_id: Option<&str>) -> Request<DishPayload> {
        Request::new(
            "req-1",
            route_id.map(str::to_string),
            DishPayload {
                id: body_id.map(str::to_string),
                ..DishPayload::default()
            },
        )
    }

    #[tokio::test]
    async fn test_record_exists_attaches_record() {
        let store = InMemoryStore::with_records(vec![pasta()]);
        let mut context = DishContext::default();

        let validator = RecordExists::<Dishes>::new();
        Validator::<Dishes, _>::validate(
            &validator,
            &request(Some("d1"), None),
            &mut context,
            &store,
        )
        .await
        .unwrap();

        assert_eq!(context.dish, Some(pasta()));
    }

    #[tokio::test]
    async fn test_record_exists_not_found_names_id() {
        let store = InMemoryStore::<Dish>::new();
        let mut context = DishContext::default();

        let validator = RecordExists::<Dishes>::new();
        let error = Validator::<Dishes, _>::validate(
            &validator,
            &request(Some("bogus"), None),
            &mut context,
            &store,
        )
        .await
        .unwrap_err();

        assert_eq!(error.status_code(), 404);
        assert_eq!(error.to_string(), "Dish does not exist: bogus");
        assert!(context.dish.is_none());
    }

    #[tokio::test]
    async fn test_route_id_matches() {
        let store = InMemoryStore::<Dish>::new();
        let validator = RouteIdMatches::<Dishes>::new();

        for body_id in [None, Some(""), Some("d1")] {
            let mut context = DishContext::default();
            let result = Validator::<Dishes, _>::validate(
                &validator,
                &request(Some("d1"), body_id),
                &mut context,
                &store,
            )
            .await;
            assert!(result.is_ok(), "body id {:?} should match", body_id);
        }

        let mut context = DishContext::default();
        let error = Validator::<Dishes, _>::validate(
            &validator,
            &request(Some("d1"), Some("d2")),
            &mut context,
            &store,
        )
        .await
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Dish id does not match route id. Dish: d2, Router : d1"
        );
    }

    #[tokio::test]
    async fn test_missing_route_id() {
        let store = InMemoryStore::<Dish>::new();
        let mut context = DishContext::default();
        let validator = RecordExists::<Dishes>::new();

        let error =
            Validator::<Dishes, _>::validate(&validator, &request(None, None), &mut context, &store)
                .await
                .unwrap_err();
        assert_eq!(error.status_code(), 400);
    }
}
