//! End-to-end tests for the orders pipelines.

mod common;

use common::{init_logging, order_body, order_body_with, order_update_body, seeded_handler};
use grubdash::{OperationHandler, OperationRequest, OrderStatus, RecordStore, ResourceType};
use serde_json::json;

async fn order_count(handler: &OperationHandler) -> usize {
    handler.orders().store().count().await.unwrap()
}

#[tokio::test]
async fn test_create_order() {
    init_logging();
    let handler = seeded_handler();

    let response = handler
        .handle_operation(OperationRequest::create(ResourceType::Orders, order_body()))
        .await;

    assert_eq!(response.status, 201);
    let data = response.data.unwrap();
    assert_eq!(data["id"], "id-1");
    assert_eq!(data["status"], "pending");
    assert_eq!(data["deliverTo"], "308 Negra Arroyo Lane, Albuquerque, NM");
    assert_eq!(
        data["dishes"],
        json!([{
            "dishId": "d351",
            "name": "Falafel and tahini bagel",
            "price": 6,
            "quantity": 2
        }])
    );
    assert_eq!(order_count(&handler).await, 4);
}

#[tokio::test]
async fn test_create_ignores_client_status() {
    init_logging();
    let handler = seeded_handler();

    let response = handler
        .handle_operation(OperationRequest::create(
            ResourceType::Orders,
            order_update_body("delivered"),
        ))
        .await;

    assert_eq!(response.status, 201);
    assert_eq!(response.data.unwrap()["status"], "pending");
}

#[tokio::test]
async fn test_create_missing_fields() {
    init_logging();
    let handler = seeded_handler();

    let cases = [
        ("deliverTo", "Order must include a deliverTo."),
        ("mobileNumber", "Order must include a mobileNumber."),
        ("dishes", "Order must include a dish."),
    ];
    for (field, message) in cases {
        let response = handler
            .handle_operation(OperationRequest::create(
                ResourceType::Orders,
                order_body_with(field, None),
            ))
            .await;

        assert_eq!(response.status, 400, "missing {}", field);
        assert_eq!(response.error_message(), Some(message));
    }
    assert_eq!(order_count(&handler).await, 3);
}

#[tokio::test]
async fn test_dishes_must_be_non_empty_array() {
    init_logging();
    let handler = seeded_handler();

    for dishes in [json!([]), json!({"dishId": "d1", "quantity": 1}), json!("d1")] {
        let response = handler
            .handle_operation(OperationRequest::create(
                ResourceType::Orders,
                order_body_with("dishes", Some(dishes.clone())),
            ))
            .await;

        assert_eq!(response.status, 400, "dishes {}", dishes);
        assert_eq!(response.error_message(), Some("Order must include a dish."));
    }
}

#[tokio::test]
async fn test_invalid_quantities_name_first_offending_index() {
    init_logging();
    let handler = seeded_handler();

    let cases = [
        json!({"dishId": "d2"}),
        json!({"dishId": "d2", "quantity": 0}),
        json!({"dishId": "d2", "quantity": -2}),
        json!({"dishId": "d2", "quantity": 1.5}),
        json!({"dishId": "d2", "quantity": "3"}),
    ];
    for bad in cases {
        let dishes = json!([
            {"dishId": "d1", "quantity": 1},
            bad,
            {"dishId": "d3"}
        ]);
        let response = handler
            .handle_operation(OperationRequest::create(
                ResourceType::Orders,
                order_body_with("dishes", Some(dishes)),
            ))
            .await;

        assert_eq!(response.status, 400, "line item {}", bad);
        assert_eq!(
            response.error_message(),
            Some("Dish 1 must have a quantity that is an integer greater than 0")
        );
    }
    assert_eq!(order_count(&handler).await, 3);
}

#[tokio::test]
async fn test_read_order() {
    init_logging();
    let handler = seeded_handler();

    let response = handler
        .handle_operation(OperationRequest::read(ResourceType::Orders, "o-preparing"))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.data.unwrap()["status"], "preparing");
}

#[tokio::test]
async fn test_read_unknown_order() {
    init_logging();
    let handler = seeded_handler();

    let response = handler
        .handle_operation(OperationRequest::read(ResourceType::Orders, "nope"))
        .await;

    assert_eq!(response.status, 404);
    assert_eq!(response.error_message(), Some("Order does not exist: nope"));
}

#[tokio::test]
async fn test_update_order() {
    init_logging();
    let handler = seeded_handler();

    let response = handler
        .handle_operation(OperationRequest::update(
            ResourceType::Orders,
            "o-pending",
            order_update_body("out-for-delivery"),
        ))
        .await;

    assert_eq!(response.status, 200);
    let stored = handler.orders().store().get("o-pending").await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::OutForDelivery);
    assert_eq!(stored.mobile_number, "(505) 143-3369");
    assert_eq!(stored.dishes[0].dish_id.as_deref(), Some("d351"));
    assert_eq!(stored.dishes[0].quantity, 2);
}

#[tokio::test]
async fn test_update_overwrites_every_field() {
    init_logging();
    let handler = seeded_handler();

    // A partial body is rejected rather than merged
    let partial = json!({"data": {"status": "preparing"}});
    let response = handler
        .handle_operation(OperationRequest::update(ResourceType::Orders, "o-pending", partial))
        .await;
    assert_eq!(response.status, 400);
    assert_eq!(response.error_message(), Some("Order must include a deliverTo."));

    // A full body replaces the stored values, line items included
    let body = json!({
        "data": {
            "deliverTo": "Elsewhere",
            "mobileNumber": "555-0100",
            "status": "preparing",
            "dishes": [{"dishId": "d9", "quantity": 4}, {"dishId": "d8", "quantity": 1}]
        }
    });
    let response = handler
        .handle_operation(OperationRequest::update(ResourceType::Orders, "o-pending", body))
        .await;
    assert_eq!(response.status, 200);

    let stored = handler.orders().store().get("o-pending").await.unwrap().unwrap();
    assert_eq!(stored.deliver_to, "Elsewhere");
    assert_eq!(stored.status, OrderStatus::Preparing);
    assert_eq!(stored.dishes.len(), 2);
    assert_eq!(stored.dishes[0].dish_id.as_deref(), Some("d9"));
}

#[tokio::test]
async fn test_update_status_checks() {
    init_logging();
    let handler = seeded_handler();

    for status in ["delivered", "cancelled", ""] {
        let response = handler
            .handle_operation(OperationRequest::update(
                ResourceType::Orders,
                "o-pending",
                order_update_body(status),
            ))
            .await;

        assert_eq!(response.status, 400, "status {:?}", status);
        assert_eq!(
            response.error_message(),
            Some("Order must have a status of pending, preparing, out-for-delivery, delivered.")
        );
    }

    let stored = handler.orders().store().get("o-pending").await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_update_missing_status() {
    init_logging();
    let handler = seeded_handler();

    let response = handler
        .handle_operation(OperationRequest::update(
            ResourceType::Orders,
            "o-pending",
            order_body(),
        ))
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(
        response.error_message(),
        Some("Order must have a status of pending, preparing, out-for-delivery, delivered.")
    );
}

#[tokio::test]
async fn test_update_id_mismatch() {
    init_logging();
    let handler = seeded_handler();

    let body = order_body_with("id", Some(json!("o-preparing")));
    let response = handler
        .handle_operation(OperationRequest::update(ResourceType::Orders, "o-pending", body))
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(
        response.error_message(),
        Some("Order id does not match route id. Order: o-preparing, Route: o-pending")
    );
}

#[tokio::test]
async fn test_update_unknown_order() {
    init_logging();
    let handler = seeded_handler();

    let response = handler
        .handle_operation(OperationRequest::update(
            ResourceType::Orders,
            "nope",
            order_update_body("pending"),
        ))
        .await;

    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_delete_pending_order() {
    init_logging();
    let handler = seeded_handler();

    let response = handler
        .handle_operation(OperationRequest::delete(ResourceType::Orders, "o-pending"))
        .await;

    assert!(response.success);
    assert_eq!(response.status, 204);
    assert_eq!(response.body(), None);
    assert_eq!(order_count(&handler).await, 2);
    assert!(
        handler
            .orders()
            .store()
            .get("o-pending")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_delete_non_pending_order_conflicts() {
    init_logging();
    let handler = seeded_handler();

    for id in ["o-preparing", "o-delivered"] {
        let response = handler
            .handle_operation(OperationRequest::delete(ResourceType::Orders, id))
            .await;

        assert_eq!(response.status, 400, "order {}", id);
        assert_eq!(response.error_code.as_deref(), Some("CONFLICT"));
        assert_eq!(
            response.error_message(),
            Some("An order cannot be deleted unless it is pending.")
        );
    }
    assert_eq!(order_count(&handler).await, 3);
}

#[tokio::test]
async fn test_delete_unknown_order() {
    init_logging();
    let handler = seeded_handler();

    let response = handler
        .handle_operation(OperationRequest::delete(ResourceType::Orders, "nope"))
        .await;

    assert_eq!(response.status, 404);
    assert_eq!(order_count(&handler).await, 3);
}

#[tokio::test]
async fn test_delete_twice() {
    init_logging();
    let handler = seeded_handler();

    let first = handler
        .handle_operation(OperationRequest::delete(ResourceType::Orders, "o-pending"))
        .await;
    let second = handler
        .handle_operation(OperationRequest::delete(ResourceType::Orders, "o-pending"))
        .await;

    assert_eq!(first.status, 204);
    assert_eq!(second.status, 404);
}

#[tokio::test]
async fn test_list_orders_is_stable() {
    init_logging();
    let handler = seeded_handler();

    let first = handler
        .handle_operation(OperationRequest::list(ResourceType::Orders))
        .await;
    let second = handler
        .handle_operation(OperationRequest::list(ResourceType::Orders))
        .await;

    assert_eq!(first.status, 200);
    assert_eq!(first.metadata.resource_count, Some(3));
    assert_eq!(first.data, second.data);
}
