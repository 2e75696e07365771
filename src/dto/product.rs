use crate::models::product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShowProduct {
    pub id: Uuid,
    pub create_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub product_name: Option<String>,
    /// Free text quantity, may include units
    pub quantity: Option<String>,
    pub purchase_price: Option<f64>,
    pub purchase_status: Option<String>,
    pub shipment_num: String,
}

impl From<product::Model> for ShowProduct {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            create_date: model.create_date,
            last_updated: model.last_updated,
            product_name: model.product_name,
            quantity: model.quantity,
            purchase_price: model.purchase_price,
            purchase_status: model.purchase_status,
            shipment_num: model.shipment_num,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "product_name": "Молоко 3,2%",
    "quantity": "2 шт",
    "purchase_price": 89.99,
    "purchase_status": "Собран",
    "shipment_num": "H01234567890"
}))]
pub struct CreateProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub purchase_status: Option<String>,
    #[validate(length(min = 1, message = "Shipment number is required"))]
    pub shipment_num: String,
}

/// Partial update; `shipment_num` may move the product to another shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_num: Option<String>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.quantity.is_none()
            && self.purchase_price.is_none()
            && self.purchase_status.is_none()
            && self.shipment_num.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdatedProductResponse {
    pub updated_product_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeletedProductResponse {
    pub deleted_products_id: Uuid,
}
