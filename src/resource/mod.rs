//! Resource types served by the dispatcher.
//!
//! Each resource is described by a marker type implementing [`Resource`],
//! which ties together the stored record, the request payload, and the
//! per-request context that validators fill in.

pub mod dish;
pub mod order;
pub mod payload;

pub use dish::{Dish, DishContext, DishPayload, Dishes};
pub use order::{Order, OrderContext, OrderDish, OrderPayload, OrderStatus, Orders};
pub use payload::{is_truthy, payload_from_body};

use crate::storage::Record;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The resource collections exposed by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Dishes,
    Orders,
}

impl ResourceType {
    /// Collection name as it appears in routes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Dishes => "dishes",
            ResourceType::Orders => "orders",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-level description of one resource collection.
///
/// Generic validators (existence, route id matching) and the pipeline
/// machinery are written against this trait.
pub trait Resource: Send + Sync + 'static {
    /// Stored record type.
    type Record: Record + Serialize + fmt::Debug;
    /// Typed request payload read from the body envelope.
    type Payload: DeserializeOwned + Default + Send + Sync + fmt::Debug;
    /// Per-request context populated by validators.
    type Context: Default + Send + Sync + fmt::Debug;

    /// Singular label used in error messages, e.g. `"Dish"`.
    const LABEL: &'static str;
    /// Collection this resource is served under.
    const TYPE: ResourceType;

    /// The id carried in the request body, if any.
    fn body_id(payload: &Self::Payload) -> Option<&str>;

    /// Store the record found by the existence check.
    fn attach(context: &mut Self::Context, record: Self::Record);

    /// The record stored by [`Resource::attach`].
    fn attached(context: &Self::Context) -> Option<&Self::Record>;
}
