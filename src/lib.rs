//! Food Expenses library
//!
//! Grocery-delivery shipments and their products behind a small HTTP API, a
//! spending report over delivered shipments, and the offline tooling that
//! turns saved shipment pages into a staging document and loads it.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod ingest;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod repositories;
pub mod scrape;
pub mod services;
pub mod tracing;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone(), &config.delivered_status);
        Self {
            db,
            config,
            services,
        }
    }

    pub fn shipment_service(&self) -> Arc<services::ShipmentService> {
        self.services.shipments.clone()
    }

    pub fn product_service(&self) -> Arc<services::ProductService> {
        self.services.products.clone()
    }

    pub fn report_service(&self) -> Arc<services::ReportService> {
        self.services.reports.clone()
    }
}

/// Resource routes, mounted at the root
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shipment",
            get(handlers::shipments::get_shipment)
                .post(handlers::shipments::create_shipment)
                .patch(handlers::shipments::update_shipment)
                .delete(handlers::shipments::delete_shipment),
        )
        .route(
            "/product",
            get(handlers::products::get_products)
                .post(handlers::products::create_product)
                .patch(handlers::products::update_product)
                .delete(handlers::products::delete_products),
        )
        .route("/report", get(handlers::reports::get_spending_report))
}

/// Full application router: resources, health, Swagger UI, HTTP tracing and
/// request ids. CORS is left to the caller since it depends on deployment.
pub fn app_router(state: AppState) -> Router {
    let db = state.db.clone();
    api_routes()
        .with_state(state)
        .merge(health::health_routes_with_state(db))
        .merge(openapi::swagger_ui())
        .layer(tracing::configure_http_tracing())
        // Outermost so every log line and error body carries the id
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
}

pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::db::DbPool;
    pub use crate::errors::ServiceError;
    pub use crate::AppState;
}
