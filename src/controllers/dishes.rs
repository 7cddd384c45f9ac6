//! Dishes controller: validators, handlers and route table.
//!
//! | Operation | Validators | Handler |
//! |-----------|------------|---------|
//! | list      | none       | [`ListRecords`] |
//! | create    | name, description, price, price valid, image_url | [`CreateDish`] |
//! | read      | exists     | [`ReadAttached`] |
//! | update    | exists, route id, name, description, price, price valid, image_url | [`UpdateDish`] |
//!
//! Dishes cannot be deleted.

use crate::controllers::ResourceRoutes;
use crate::error::{DispatchError, DispatchResult, ValidationError};
use crate::id::IdGenerator;
use crate::pipeline::{
    Check, Handler, ListRecords, Operation, Pipeline, PipelineBuilder, ReadAttached,
    RecordExists, Reply, Request, RouteIdMatches, validated,
};
use crate::resource::payload::{is_truthy, positive_integer, present_text};
use crate::resource::{Dish, DishContext, DishPayload, Dishes};
use crate::storage::RecordStore;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

fn missing(field: &'static str) -> ValidationError {
    ValidationError::MissingField {
        resource: "Dish",
        field,
    }
}

pub fn require_name(
    request: &Request<DishPayload>,
    context: &mut DishContext,
) -> DispatchResult<()> {
    let name = present_text(&request.payload.name).ok_or(missing("name"))?;
    context.name = Some(name.to_string());
    Ok(())
}

pub fn require_description(
    request: &Request<DishPayload>,
    context: &mut DishContext,
) -> DispatchResult<()> {
    let description = present_text(&request.payload.description).ok_or(missing("description"))?;
    context.description = Some(description.to_string());
    Ok(())
}

pub fn require_price(
    request: &Request<DishPayload>,
    _context: &mut DishContext,
) -> DispatchResult<()> {
    match &request.payload.price {
        Some(price) if is_truthy(price) => Ok(()),
        _ => Err(missing("price").into()),
    }
}

/// Price must be a JSON integer greater than zero.
pub fn price_is_valid(
    request: &Request<DishPayload>,
    context: &mut DishContext,
) -> DispatchResult<()> {
    let price = request
        .payload
        .price
        .as_ref()
        .and_then(positive_integer)
        .ok_or(ValidationError::InvalidPrice)?;
    context.price = Some(price);
    Ok(())
}

pub fn require_image_url(
    request: &Request<DishPayload>,
    context: &mut DishContext,
) -> DispatchResult<()> {
    let image_url = present_text(&request.payload.image_url).ok_or(missing("image_url"))?;
    context.image_url = Some(image_url.to_string());
    Ok(())
}

/// Appends a dish built from the validated fields and a fresh id.
#[derive(Debug, Clone)]
pub struct CreateDish {
    ids: Arc<dyn IdGenerator>,
}

impl CreateDish {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

#[async_trait]
impl<S: RecordStore<Dish>> Handler<Dishes, S> for CreateDish {
    async fn handle(
        &self,
        request: Request<DishPayload>,
        context: DishContext,
        store: &S,
    ) -> DispatchResult<Reply<Dish>> {
        let dish = Dish {
            id: self.ids.next_id(),
            name: validated(context.name, "name")?,
            description: validated(context.description, "description")?,
            price: validated(context.price, "price")?,
            image_url: validated(context.image_url, "image_url")?,
        };

        let dish = store.insert(dish).await.map_err(DispatchError::storage)?;
        info!("Created dish {} (request: '{}')", dish.id, request.request_id);
        Ok(Reply::Created(dish))
    }
}

/// Overwrites every field of the dish with the validated request values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateDish;

#[async_trait]
impl<S: RecordStore<Dish>> Handler<Dishes, S> for UpdateDish {
    async fn handle(
        &self,
        request: Request<DishPayload>,
        context: DishContext,
        store: &S,
    ) -> DispatchResult<Reply<Dish>> {
        let attached = validated(context.dish, "dish")?;
        let current = store
            .get(&attached.id)
            .await
            .map_err(DispatchError::storage)?
            .ok_or_else(|| dish_not_found(&attached.id))?;

        let dish = Dish {
            id: current.id,
            name: validated(context.name, "name")?,
            description: validated(context.description, "description")?,
            price: validated(context.price, "price")?,
            image_url: validated(context.image_url, "image_url")?,
        };

        let dish = store
            .replace(dish)
            .await
            .map_err(DispatchError::storage)?
            .ok_or_else(|| dish_not_found(&attached.id))?;
        info!("Updated dish {} (request: '{}')", dish.id, request.request_id);
        Ok(Reply::Found(dish))
    }
}

fn dish_not_found(id: &str) -> DispatchError {
    DispatchError::not_found(format!("Dish does not exist: {}", id))
}

fn body_checks<S: RecordStore<Dish>>(
    pipeline: PipelineBuilder<Dishes, S>,
) -> PipelineBuilder<Dishes, S> {
    pipeline
        .validate(Check::<Dishes>::new("require_name", require_name))
        .validate(Check::<Dishes>::new("require_description", require_description))
        .validate(Check::<Dishes>::new("require_price", require_price))
        .validate(Check::<Dishes>::new("price_is_valid", price_is_valid))
        .validate(Check::<Dishes>::new("require_image_url", require_image_url))
}

/// Build the dishes route table over `store`.
pub fn routes<S: RecordStore<Dish> + 'static>(
    store: S,
    ids: Arc<dyn IdGenerator>,
) -> ResourceRoutes<Dishes, S> {
    ResourceRoutes::new(store)
        .register(Pipeline::builder(Operation::List).handle(ListRecords))
        .register(body_checks(Pipeline::builder(Operation::Create)).handle(CreateDish::new(ids)))
        .register(
            Pipeline::builder(Operation::Read)
                .validate(RecordExists::<Dishes>::new())
                .handle(ReadAttached),
        )
        .register(
            body_checks(
                Pipeline::builder(Operation::Update)
                    .validate(RecordExists::<Dishes>::new())
                    .validate(RouteIdMatches::<Dishes>::new()),
            )
            .handle(UpdateDish),
        )
}
