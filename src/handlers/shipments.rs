use crate::{
    dto::{
        CreateShipment, DeletedShipmentResponse, ShowShipment, UpdateShipmentRequest,
        UpdatedShipmentResponse,
    },
    errors::ServiceError,
    services::shipments::shipment_not_found,
    AppState,
};
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShipmentNumQuery {
    /// External shipment number
    #[param(example = "H01234567890")]
    pub shipment_num: String,
}

#[utoipa::path(
    get,
    path = "/shipment",
    params(ShipmentNumQuery),
    responses(
        (status = 200, description = "Shipment fetched", body = ShowShipment),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse)
    ),
    tag = "shipment"
)]
pub async fn get_shipment(
    State(state): State<AppState>,
    Query(query): Query<ShipmentNumQuery>,
) -> Result<Json<ShowShipment>, ServiceError> {
    state
        .shipment_service()
        .get_shipment(&query.shipment_num)
        .await?
        .map(Json)
        .ok_or_else(|| shipment_not_found(&query.shipment_num))
}

#[utoipa::path(
    post,
    path = "/shipment",
    request_body = CreateShipment,
    responses(
        (status = 200, description = "Shipment created", body = ShowShipment),
        (status = 422, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 503, description = "Shipment number already exists", body = crate::errors::ErrorResponse)
    ),
    tag = "shipment"
)]
pub async fn create_shipment(
    State(state): State<AppState>,
    Json(payload): Json<CreateShipment>,
) -> Result<Json<ShowShipment>, ServiceError> {
    let shipment = state.shipment_service().create_shipment(payload).await?;
    Ok(Json(shipment))
}

#[utoipa::path(
    patch,
    path = "/shipment",
    params(ShipmentNumQuery),
    request_body = UpdateShipmentRequest,
    responses(
        (status = 200, description = "Shipment updated", body = UpdatedShipmentResponse),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "No field to update", body = crate::errors::ErrorResponse),
        (status = 503, description = "Update rejected by the database", body = crate::errors::ErrorResponse)
    ),
    tag = "shipment"
)]
pub async fn update_shipment(
    State(state): State<AppState>,
    Query(query): Query<ShipmentNumQuery>,
    Json(payload): Json<UpdateShipmentRequest>,
) -> Result<Json<UpdatedShipmentResponse>, ServiceError> {
    let updated_shipment_num = state
        .shipment_service()
        .update_shipment(&query.shipment_num, payload)
        .await?;
    Ok(Json(UpdatedShipmentResponse {
        updated_shipment_num,
    }))
}

#[utoipa::path(
    delete,
    path = "/shipment",
    params(ShipmentNumQuery),
    responses(
        (status = 200, description = "Shipment deleted", body = DeletedShipmentResponse),
        (status = 404, description = "Shipment not found", body = crate::errors::ErrorResponse),
        (status = 503, description = "Products still reference the shipment", body = crate::errors::ErrorResponse)
    ),
    tag = "shipment"
)]
pub async fn delete_shipment(
    State(state): State<AppState>,
    Query(query): Query<ShipmentNumQuery>,
) -> Result<Json<DeletedShipmentResponse>, ServiceError> {
    let deleted_shipment_num = state
        .shipment_service()
        .delete_shipment(&query.shipment_num)
        .await?;
    Ok(Json(DeletedShipmentResponse {
        deleted_shipment_num,
    }))
}
