use crate::models::shipment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "990e8400-e29b-41d4-a716-446655440000",
    "create_date": "2024-03-12T10:30:00Z",
    "last_updated": "2024-03-12T10:30:00Z",
    "shipment_num": "H01234567890",
    "shipment_status": "Заказ доставлен",
    "shipment_date": "2024-03-12",
    "shipping_address": "Москва, ул. Тверская, 1",
    "shipping_cost": 2450.5,
    "bonuses": 120,
    "assembly_and_delivery": 0,
    "discount": 150.0
}))]
pub struct ShowShipment {
    pub id: Uuid,
    pub create_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub shipment_num: String,
    pub shipment_status: Option<String>,
    /// Delivery date, `YYYY-MM-DD`
    pub shipment_date: Option<String>,
    pub shipping_address: Option<String>,
    pub shipping_cost: f64,
    /// Loyalty bonuses spent on the order
    pub bonuses: Option<i32>,
    /// Assembly and delivery fee
    pub assembly_and_delivery: Option<i32>,
    pub discount: Option<f64>,
}

impl From<shipment::Model> for ShowShipment {
    fn from(model: shipment::Model) -> Self {
        Self {
            id: model.id,
            create_date: model.create_date,
            last_updated: model.last_updated,
            shipment_num: model.shipment_num,
            shipment_status: model.shipment_status,
            shipment_date: model.shipment_date,
            shipping_address: model.shipping_address,
            shipping_cost: model.shipping_cost,
            bonuses: model.bonuses,
            assembly_and_delivery: model.assembly_and_delivery,
            discount: model.discount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateShipment {
    #[validate(length(min = 1, message = "Shipment number must not be empty"))]
    pub shipment_num: String,
    #[serde(default)]
    pub shipment_status: Option<String>,
    #[serde(default)]
    pub shipment_date: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    pub shipping_cost: f64,
    #[serde(default)]
    pub bonuses: Option<i32>,
    #[serde(default)]
    pub assembly_and_delivery: Option<i32>,
    #[serde(default)]
    pub discount: Option<f64>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateShipmentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonuses: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_and_delivery: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl UpdateShipmentRequest {
    pub fn is_empty(&self) -> bool {
        self.shipment_status.is_none()
            && self.shipment_date.is_none()
            && self.shipping_address.is_none()
            && self.shipping_cost.is_none()
            && self.bonuses.is_none()
            && self.assembly_and_delivery.is_none()
            && self.discount.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedShipmentResponse {
    pub updated_shipment_num: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletedShipmentResponse {
    pub deleted_shipment_num: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_detected() {
        let patch: UpdateShipmentRequest = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());

        let patch: UpdateShipmentRequest =
            serde_json::from_str(r#"{"shipment_status": null, "bonuses": 5}"#).unwrap();
        assert!(!patch.is_empty());
    }

    #[test]
    fn blank_shipment_number_fails_validation() {
        let body = CreateShipment {
            shipment_num: String::new(),
            shipment_status: None,
            shipment_date: None,
            shipping_address: None,
            shipping_cost: 10.0,
            bonuses: None,
            assembly_and_delivery: None,
            discount: None,
        };
        assert!(body.validate().is_err());
    }
}
