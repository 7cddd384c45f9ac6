//! Orders controller: validators, handlers and route table.
//!
//! Orders support every operation. Create and update require a delivery
//! address, a mobile number and a non-empty list of dishes with positive
//! quantities; update also requires a status. Only pending orders can be
//! deleted.

use crate::controllers::ResourceRoutes;
use crate::error::{DispatchError, DispatchResult, ValidationError};
use crate::id::IdGenerator;
use crate::pipeline::{
    Check, Handler, ListRecords, Operation, Pipeline, ReadAttached, RecordExists, Reply, Request,
    RouteIdMatches, route_id, validated,
};
use crate::resource::payload::present_text;
use crate::resource::{Order, OrderContext, OrderDish, OrderPayload, OrderStatus, Orders};
use crate::storage::RecordStore;
use async_trait::async_trait;
use log::{info, warn};
use serde_json::Value;
use std::sync::Arc;

fn missing(field: &'static str) -> ValidationError {
    ValidationError::MissingField {
        resource: "Order",
        field,
    }
}

pub fn require_deliver_to(
    request: &Request<OrderPayload>,
    context: &mut OrderContext,
) -> DispatchResult<()> {
    let deliver_to = present_text(&request.payload.deliver_to).ok_or(missing("deliverTo"))?;
    context.deliver_to = Some(deliver_to.to_string());
    Ok(())
}

pub fn require_mobile_number(
    request: &Request<OrderPayload>,
    context: &mut OrderContext,
) -> DispatchResult<()> {
    let mobile_number =
        present_text(&request.payload.mobile_number).ok_or(missing("mobileNumber"))?;
    context.mobile_number = Some(mobile_number.to_string());
    Ok(())
}

/// `dishes` must be a non-empty array.
pub fn require_dishes(
    request: &Request<OrderPayload>,
    context: &mut OrderContext,
) -> DispatchResult<()> {
    match &request.payload.dishes {
        Some(Value::Array(items)) if !items.is_empty() => {
            context.dish_items = Some(items.clone());
            Ok(())
        }
        _ => Err(missing("dish").into()),
    }
}

/// Every line item needs an integer quantity greater than zero.
///
/// The error names the first offending index.
pub fn quantity_is_valid(
    _request: &Request<OrderPayload>,
    context: &mut OrderContext,
) -> DispatchResult<()> {
    let items = context.dish_items.as_deref().unwrap_or_default();
    let dishes = items
        .iter()
        .enumerate()
        .map(|(index, item)| OrderDish::from_line_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;
    context.dishes = Some(dishes);
    Ok(())
}

/// Status must be one a client may set; `delivered` is refused.
pub fn status_is_valid(
    request: &Request<OrderPayload>,
    context: &mut OrderContext,
) -> DispatchResult<()> {
    let status = request
        .payload
        .status
        .as_deref()
        .and_then(|s| s.parse::<OrderStatus>().ok())
        .filter(OrderStatus::accepted_on_update)
        .ok_or(ValidationError::InvalidStatus)?;
    context.status = Some(status);
    Ok(())
}

/// Appends an order with the implicit initial status and a fresh id.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    ids: Arc<dyn IdGenerator>,
    initial_status: OrderStatus,
}

impl CreateOrder {
    pub fn new(ids: Arc<dyn IdGenerator>, initial_status: OrderStatus) -> Self {
        Self {
            ids,
            initial_status,
        }
    }
}

#[async_trait]
impl<S: RecordStore<Order>> Handler<Orders, S> for CreateOrder {
    async fn handle(
        &self,
        request: Request<OrderPayload>,
        context: OrderContext,
        store: &S,
    ) -> DispatchResult<Reply<Order>> {
        let order = Order {
            id: self.ids.next_id(),
            deliver_to: validated(context.deliver_to, "deliverTo")?,
            mobile_number: validated(context.mobile_number, "mobileNumber")?,
            status: self.initial_status,
            dishes: validated(context.dishes, "dishes")?,
        };

        let order = store.insert(order).await.map_err(DispatchError::storage)?;
        info!(
            "Created order {} with {} dishes (request: '{}')",
            order.id,
            order.dishes.len(),
            request.request_id
        );
        Ok(Reply::Created(order))
    }
}

/// Overwrites every mutable field of the order with the validated values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOrder;

#[async_trait]
impl<S: RecordStore<Order>> Handler<Orders, S> for UpdateOrder {
    async fn handle(
        &self,
        request: Request<OrderPayload>,
        context: OrderContext,
        store: &S,
    ) -> DispatchResult<Reply<Order>> {
        let attached = validated(context.order, "order")?;
        let current = locate(store, &attached.id).await?;

        let order = Order {
            id: current.id,
            deliver_to: validated(context.deliver_to, "deliverTo")?,
            mobile_number: validated(context.mobile_number, "mobileNumber")?,
            status: validated(context.status, "status")?,
            dishes: validated(context.dishes, "dishes")?,
        };

        let order = store
            .replace(order)
            .await
            .map_err(DispatchError::storage)?
            .ok_or_else(|| order_not_found(&attached.id))?;
        info!(
            "Updated order {} to status {} (request: '{}')",
            order.id, order.status, request.request_id
        );
        Ok(Reply::Found(order))
    }
}

/// Removes a pending order; any other status is a conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOrder;

#[async_trait]
impl<S: RecordStore<Order>> Handler<Orders, S> for DeleteOrder {
    async fn handle(
        &self,
        request: Request<OrderPayload>,
        _context: OrderContext,
        store: &S,
    ) -> DispatchResult<Reply<Order>> {
        let id = route_id::<Orders>(&request)?;
        let current = locate(store, id).await?;

        if current.status != OrderStatus::Pending {
            warn!(
                "Refusing to delete order {} with status {} (request: '{}')",
                id, current.status, request.request_id
            );
            return Err(DispatchError::conflict(
                "An order cannot be deleted unless it is pending.",
            ));
        }

        if !store.remove(id).await.map_err(DispatchError::storage)? {
            return Err(order_not_found(id));
        }
        info!("Deleted order {} (request: '{}')", id, request.request_id);
        Ok(Reply::NoContent)
    }
}

async fn locate<S: RecordStore<Order>>(store: &S, id: &str) -> DispatchResult<Order> {
    store
        .get(id)
        .await
        .map_err(DispatchError::storage)?
        .ok_or_else(|| order_not_found(id))
}

fn order_not_found(id: &str) -> DispatchError {
    DispatchError::not_found(format!("Order does not exist: {}", id))
}

/// Build the orders route table over `store`.
///
/// New orders start in `initial_status`.
pub fn routes<S: RecordStore<Order> + 'static>(
    store: S,
    ids: Arc<dyn IdGenerator>,
    initial_status: OrderStatus,
) -> ResourceRoutes<Orders, S> {
    ResourceRoutes::new(store)
        .register(Pipeline::builder(Operation::List).handle(ListRecords))
        .register(
            Pipeline::builder(Operation::Create)
                .validate(Check::<Orders>::new("require_deliver_to", require_deliver_to))
                .validate(Check::<Orders>::new("require_mobile_number", require_mobile_number))
                .validate(Check::<Orders>::new("require_dishes", require_dishes))
                .validate(Check::<Orders>::new("quantity_is_valid", quantity_is_valid))
                .handle(CreateOrder::new(ids, initial_status)),
        )
        .register(
            Pipeline::builder(Operation::Read)
                .validate(RecordExists::<Orders>::new())
                .handle(ReadAttached),
        )
        .register(
            Pipeline::builder(Operation::Update)
                .validate(RecordExists::<Orders>::new())
                .validate(RouteIdMatches::<Orders>::new())
                .validate(Check::<Orders>::new("require_deliver_to", require_deliver_to))
                .validate(Check::<Orders>::new("status_is_valid", status_is_valid))
                .validate(Check::<Orders>::new("require_mobile_number", require_mobile_number))
                .validate(Check::<Orders>::new("require_dishes", require_dishes))
                .validate(Check::<Orders>::new("quantity_is_valid", quantity_is_valid))
                .handle(UpdateOrder),
        )
        .register(
            Pipeline::builder(Operation::Delete)
                .validate(RecordExists::<Orders>::new())
                .handle(DeleteOrder),
        )
}
