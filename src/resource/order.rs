//! Order records, statuses and request payloads.

use crate::error::ValidationError;
use crate::resource::payload::{lenient_string, positive_integer};
use crate::resource::{Resource, ResourceType};
use crate::storage::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// Statuses a client may set through an update.
    ///
    /// `delivered` is not among them.
    pub const ACCEPTED_ON_UPDATE: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Whether an update may move an order into this status.
    pub fn accepted_on_update(&self) -> bool {
        Self::ACCEPTED_ON_UPDATE.contains(self)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "out-for-delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            _ => Err(ValidationError::InvalidStatus),
        }
    }
}

/// One line of an order.
///
/// Members other than `dishId` and `quantity` (a dish name or price copied
/// in by the client, for instance) are kept verbatim in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDish {
    #[serde(rename = "dishId", default, skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<String>,
    pub quantity: u32,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl OrderDish {
    /// Build a line item from the raw JSON at `index` in the order's dish list.
    ///
    /// Fails unless the item is an object whose `quantity` is an integer
    /// greater than zero.
    pub fn from_line_item(index: usize, item: &Value) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidQuantity { index };
        let object = item.as_object().ok_or_else(invalid)?;
        let quantity = object
            .get("quantity")
            .and_then(positive_integer)
            .ok_or_else(invalid)?;

        let mut details = object.clone();
        details.remove("quantity");
        let dish_id = match details.remove("dishId") {
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                details.insert("dishId".to_string(), other);
                None
            }
            None => None,
        };

        Ok(Self {
            dish_id,
            quantity,
            details,
        })
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    /// Never empty
    pub dishes: Vec<OrderDish>,
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Order fields as sent in a create or update body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub deliver_to: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub dishes: Option<Value>,
}

/// Values established by the order validators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderContext {
    /// Record found by the existence check
    pub order: Option<Order>,
    pub deliver_to: Option<String>,
    pub mobile_number: Option<String>,
    /// Raw line items, non-empty once set
    pub dish_items: Option<Vec<Value>>,
    /// Line items with validated quantities
    pub dishes: Option<Vec<OrderDish>>,
    pub status: Option<OrderStatus>,
}

/// Marker for the orders collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Orders;

impl Resource for Orders {
    type Record = Order;
    type Payload = OrderPayload;
    type Context = OrderContext;

    const LABEL: &'static str = "Order";
    const TYPE: ResourceType = ResourceType::Orders;

    fn body_id(payload: &OrderPayload) -> Option<&str> {
        payload.id.as_deref()
    }

    fn attach(context: &mut OrderContext, record: Order) {
        context.order = Some(record);
    }

    fn attached(context: &OrderContext) -> Option<&Order> {
        context.order.as_ref()
    }
}
