//! Dish records and request payloads.

use crate::resource::payload::lenient_string;
use crate::resource::{Resource, ResourceType};
use crate::storage::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Whole currency units, always greater than zero
    pub price: u32,
    pub image_url: String,
}

impl Record for Dish {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Dish fields as sent in a create or update body.
///
/// Text fields read leniently (see [`crate::resource::payload`]); `price`
/// stays raw so validators can distinguish missing from invalid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DishPayload {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
}

/// Values established by the dish validators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DishContext {
    /// Record found by the existence check
    pub dish: Option<Dish>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u32>,
    pub image_url: Option<String>,
}

/// Marker for the dishes collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dishes;

impl Resource for Dishes {
    type Record = Dish;
    type Payload = DishPayload;
    type Context = DishContext;

    const LABEL: &'static str = "Dish";
    const TYPE: ResourceType = ResourceType::Dishes;

    fn body_id(payload: &DishPayload) -> Option<&str> {
        payload.id.as_deref()
    }

    fn attach(context: &mut DishContext, record: Dish) {
        context.dish = Some(record);
    }

    fn attached(context: &DishContext) -> Option<&Dish> {
        context.dish.as_ref()
    }
}
