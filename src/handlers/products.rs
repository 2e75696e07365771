use crate::{
    dto::{
        CreateProduct, DeletedProductResponse, ShowProduct, UpdateProductRequest,
        UpdatedProductResponse,
    },
    errors::ServiceError,
    handlers::shipments::ShipmentNumQuery,
    AppState,
};
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductIdQuery {
    pub product_id: Uuid,
}

#[utoipa::path(
    get,
    path = "/product",
    params(ShipmentNumQuery),
    responses(
        (status = 200, description = "Products of the shipment, possibly none", body = [ShowProduct])
    ),
    tag = "product"
)]
pub async fn get_products(
    State(state): State<AppState>,
    Query(query): Query<ShipmentNumQuery>,
) -> Result<Json<Vec<ShowProduct>>, ServiceError> {
    let products = state
        .product_service()
        .get_products(&query.shipment_num)
        .await?;
    Ok(Json(products))
}

#[utoipa::path(
    post,
    path = "/product",
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product created", body = ShowProduct),
        (status = 503, description = "Shipment does not exist", body = crate::errors::ErrorResponse)
    ),
    tag = "product"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> Result<Json<ShowProduct>, ServiceError> {
    let product = state.product_service().create_product(payload).await?;
    Ok(Json(product))
}

#[utoipa::path(
    patch,
    path = "/product",
    params(ProductIdQuery),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = UpdatedProductResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "No field to update", body = crate::errors::ErrorResponse),
        (status = 503, description = "Target shipment does not exist", body = crate::errors::ErrorResponse)
    ),
    tag = "product"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Query(query): Query<ProductIdQuery>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<UpdatedProductResponse>, ServiceError> {
    let updated_product_id = state
        .product_service()
        .update_product(query.product_id, payload)
        .await?;
    Ok(Json(UpdatedProductResponse { updated_product_id }))
}

#[utoipa::path(
    delete,
    path = "/product",
    params(ShipmentNumQuery),
    responses(
        (status = 200, description = "Products deleted", body = [DeletedProductResponse]),
        (status = 404, description = "Shipment has no products", body = crate::errors::ErrorResponse)
    ),
    tag = "product"
)]
pub async fn delete_products(
    State(state): State<AppState>,
    Query(query): Query<ShipmentNumQuery>,
) -> Result<Json<Vec<DeletedProductResponse>>, ServiceError> {
    let deleted = state
        .product_service()
        .delete_products(&query.shipment_num)
        .await?;
    Ok(Json(deleted))
}
