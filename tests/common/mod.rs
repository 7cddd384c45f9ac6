//! Shared fixtures for the dispatch integration tests.

#![allow(dead_code)]

use grubdash::id::SequentialIdGenerator;
use grubdash::{Dish, InMemoryStore, OperationHandler, Order, OrderDish, OrderStatus};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Route test logs through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A valid dish create/update body.
pub fn dish_body() -> Value {
    json!({
        "data": {
            "name": "Pasta",
            "description": "Tasty",
            "price": 12,
            "image_url": "http://x"
        }
    })
}

/// `dish_body()` with `field` replaced by `value`, or removed when `value`
/// is `None`.
pub fn dish_body_with(field: &str, value: Option<Value>) -> Value {
    with_field(dish_body(), field, value)
}

/// A valid order create body with one line item.
pub fn order_body() -> Value {
    json!({
        "data": {
            "deliverTo": "308 Negra Arroyo Lane, Albuquerque, NM",
            "mobileNumber": "(505) 143-3369",
            "dishes": [
                {
                    "dishId": "d351",
                    "name": "Falafel and tahini bagel",
                    "price": 6,
                    "quantity": 2
                }
            ]
        }
    })
}

/// A valid order update body with the given status.
pub fn order_update_body(status: &str) -> Value {
    with_field(order_body(), "status", Some(json!(status)))
}

/// `order_body()` with `field` replaced by `value`, or removed when `value`
/// is `None`.
pub fn order_body_with(field: &str, value: Option<Value>) -> Value {
    with_field(order_body(), field, value)
}

fn with_field(mut body: Value, field: &str, value: Option<Value>) -> Value {
    if let Some(data) = body.get_mut("data").and_then(Value::as_object_mut) {
        match value {
            Some(v) => {
                data.insert(field.to_string(), v);
            }
            None => {
                data.remove(field);
            }
        }
    }
    body
}

pub fn dish(id: &str, name: &str, price: u32) -> Dish {
    Dish {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} description", name),
        price,
        image_url: format!("https://images.example.com/{}.jpg", id),
    }
}

pub fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.to_string(),
        deliver_to: "1600 Pennsylvania Avenue NW, Washington, DC".to_string(),
        mobile_number: "(202) 456-1111".to_string(),
        status,
        dishes: vec![OrderDish {
            dish_id: Some("d1".to_string()),
            quantity: 1,
            details: Map::new(),
        }],
    }
}

/// Handler over seeded stores with sequential ids (`id-1`, `id-2`, ...).
pub fn seeded_handler() -> OperationHandler {
    OperationHandler::builder()
        .with_dish_store(InMemoryStore::with_records(vec![
            dish("d1", "Pasta", 12),
            dish("d2", "Soup", 7),
        ]))
        .with_order_store(InMemoryStore::with_records(vec![
            order("o-pending", OrderStatus::Pending),
            order("o-preparing", OrderStatus::Preparing),
            order("o-delivered", OrderStatus::Delivered),
        ]))
        .with_id_generator(Arc::new(SequentialIdGenerator::new("id-")))
        .build()
}
