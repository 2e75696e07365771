mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use food_expenses::errors::ServiceError;
use food_expenses::ingest::{IngestSummary, Ingester};
use serde_json::json;

use common::{response_json, TestApp};

const STAGING: &str = r#"{
    "H100": {
        "shipment_status": "Заказ доставлен",
        "shipment_date": "2024-03-12",
        "shipping_address": "Москва, ул. Ленина, 1",
        "shipping_cost": 100.0,
        "bonuses": 10,
        "assembly_and_delivery": 0,
        "discount": 0.0,
        "products": {
            "1": {"product_name": "Молоко", "quantity": "2 шт", "purchase_price": 89.9, "purchase_status": "Собран"},
            "2": {"product_name": "Хлеб", "quantity": "1 шт", "purchase_price": 45.0, "purchase_status": "Собран"}
        }
    },
    "H200": {
        "shipment_status": "Заказ отменён",
        "shipment_date": "2024-03-10",
        "shipping_cost": 50.0,
        "products": {}
    }
}"#;

async fn write_staging(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("json_shipments.json");
    tokio::fs::write(&path, contents)
        .await
        .expect("write staging file");
    (dir, path)
}

#[tokio::test]
async fn ingests_shipments_with_their_products() {
    let app = TestApp::new().await;
    let (_dir, path) = write_staging(STAGING).await;

    let summary = Ingester::new(&app.state.services)
        .ingest_file(&path)
        .await
        .expect("ingest");
    assert_eq!(
        summary,
        IngestSummary {
            shipments: 2,
            products: 2
        }
    );

    for num in ["H100", "H200"] {
        let response = app
            .request(Method::GET, &format!("/shipment?shipment_num={num}"), None)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let products = response_json(
        app.request(Method::GET, "/product?shipment_num=H100", None)
            .await,
    )
    .await;
    let products = products.as_array().expect("array");
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p["shipment_num"] == "H100"));

    let none = response_json(
        app.request(Method::GET, "/product?shipment_num=H200", None)
            .await,
    )
    .await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn second_run_stops_at_the_first_existing_shipment() {
    let app = TestApp::new().await;
    let (_dir, path) = write_staging(STAGING).await;
    let ingester = Ingester::new(&app.state.services);

    ingester.ingest_file(&path).await.expect("first run");
    let second = ingester.ingest_file(&path).await;
    assert_matches!(second, Err(ServiceError::Conflict(_)));

    // nothing was duplicated
    let products = response_json(
        app.request(Method::GET, "/product?shipment_num=H100", None)
            .await,
    )
    .await;
    assert_eq!(products.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn failure_midway_keeps_earlier_shipments() {
    let app = TestApp::new().await;
    let (_dir, path) = write_staging(
        r#"{
            "H1": {"shipping_cost": 10.0, "products": {"1": {"product_name": "Сыр"}}},
            "H2": {"shipment_status": "Заказ доставлен", "products": {}},
            "H3": {"shipping_cost": 30.0, "products": {}}
        }"#,
    )
    .await;

    let result = Ingester::new(&app.state.services).ingest_file(&path).await;
    assert_matches!(result, Err(ServiceError::StagingError(_)));

    let loaded = app
        .request(Method::GET, "/shipment?shipment_num=H1", None)
        .await;
    assert_eq!(loaded.status(), StatusCode::OK);
    let never_reached = app
        .request(Method::GET, "/shipment?shipment_num=H3", None)
        .await;
    assert_eq!(never_reached.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_staging_file_is_reported() {
    let app = TestApp::new().await;
    let (_dir, path) = write_staging("[1, 2, 3]").await;

    let result = Ingester::new(&app.state.services).ingest_file(&path).await;
    assert_matches!(result, Err(ServiceError::StagingError(_)));
}
