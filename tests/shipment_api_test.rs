mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use food_expenses::errors::ServiceError;
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn shipment_lifecycle() {
    let app = TestApp::new().await;

    let response = app
        .create_shipment(
            "H100",
            json!({
                "shipment_status": "Заказ доставлен",
                "shipment_date": "2024-03-12",
                "shipping_address": "Москва, ул. Ленина, 1",
                "shipping_cost": 1234.5,
                "bonuses": 120,
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = response_json(response).await;
    assert_eq!(created["shipment_num"], "H100");
    assert_eq!(created["shipping_cost"], 1234.5);
    assert!(created["discount"].is_null());
    assert!(created["id"].as_str().is_some());

    let response = app
        .request(Method::GET, "/shipment?shipment_num=H100", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = response_json(response).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["bonuses"], 120);

    let response = app
        .request(
            Method::PATCH,
            "/shipment?shipment_num=H100",
            Some(json!({ "discount": 50.0 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({ "updated_shipment_num": "H100" })
    );

    let fetched = response_json(
        app.request(Method::GET, "/shipment?shipment_num=H100", None)
            .await,
    )
    .await;
    assert_eq!(fetched["discount"], 50.0);
    // untouched fields keep their values
    assert_eq!(fetched["shipping_address"], "Москва, ул. Ленина, 1");
    assert_eq!(fetched["bonuses"], 120);

    let response = app
        .request(Method::DELETE, "/shipment?shipment_num=H100", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({ "deleted_shipment_num": "H100" })
    );

    let response = app
        .request(Method::GET, "/shipment?shipment_num=H100", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn generated_ids_are_unique() {
    let app = TestApp::new().await;

    let first = response_json(
        app.create_shipment("H1", json!({ "shipping_cost": 1.0 }))
            .await,
    )
    .await;
    let second = response_json(
        app.create_shipment("H2", json!({ "shipping_cost": 2.0 }))
            .await,
    )
    .await;

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn duplicate_shipment_number_is_a_conflict() {
    let app = TestApp::new().await;

    let response = app
        .create_shipment("H200", json!({ "shipping_cost": 10.0 }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .create_shipment("H200", json!({ "shipping_cost": 20.0 }))
        .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("shipment H200 could not be stored"));

    // the first row is untouched
    let fetched = response_json(
        app.request(Method::GET, "/shipment?shipment_num=H200", None)
            .await,
    )
    .await;
    assert_eq!(fetched["shipping_cost"], 10.0);
}

#[tokio::test]
async fn empty_patch_is_rejected_before_lookup() {
    let app = TestApp::new().await;

    // unknown shipment, yet the empty body is what gets reported
    let response = app
        .request(
            Method::PATCH,
            "/shipment?shipment_num=H404",
            Some(json!({})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn patch_and_delete_of_unknown_shipment_are_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::PATCH,
            "/shipment?shipment_num=H404",
            Some(json!({ "shipment_status": "Заказ отменён" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(Method::DELETE, "/shipment?shipment_num=H404", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn shipment_with_products_cannot_be_deleted_until_they_are() {
    let app = TestApp::new().await;

    app.create_shipment("H300", json!({ "shipping_cost": 300.0 }))
        .await;
    assert_eq!(
        app.create_product("H300", "Молоко").await.status(),
        StatusCode::OK
    );

    let response = app
        .request(Method::DELETE, "/shipment?shipment_num=H300", None)
        .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("delete them first"));

    // the failed delete rolled back, the shipment is still there
    let response = app
        .request(Method::GET, "/shipment?shipment_num=H300", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(Method::DELETE, "/product?shipment_num=H300", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request(Method::DELETE, "/shipment?shipment_num=H300", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn invalid_create_payload_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .create_shipment("", json!({ "shipping_cost": 1.0 }))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn responses_echo_the_request_id() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/shipment?shipment_num=H404", None)
        .await;
    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("request id header");

    let body = response_json(response).await;
    assert_eq!(body["request_id"], header.as_str());
}

#[tokio::test]
async fn referenced_shipment_delete_is_a_conflict_not_a_database_error() {
    let app = TestApp::new().await;
    app.create_shipment("H301", json!({ "shipping_cost": 1.0 }))
        .await;
    app.create_product("H301", "Хлеб").await;

    let result = app.state.shipment_service().delete_shipment("H301").await;
    assert_matches!(result, Err(ServiceError::Conflict(cause)) if cause.contains("FOREIGN KEY"));
}
