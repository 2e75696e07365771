use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One purchased line item of a shipment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub product_name: Option<String>,

    /// Free text, may carry units ("2 шт", "0.5 кг")
    pub quantity: Option<String>,

    #[sea_orm(column_type = "Double", nullable)]
    pub purchase_price: Option<f64>,

    pub purchase_status: Option<String>,

    pub shipment_num: String,

    pub create_date: DateTime<Utc>,

    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shipment::Entity",
        from = "Column::ShipmentNum",
        to = "super::shipment::Column::ShipmentNum",
        on_delete = "NoAction",
        on_update = "NoAction"
    )]
    Shipment,
}

impl Related<super::shipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shipment.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr> {
        let mut active_model = self;
        let now = Utc::now();
        if insert {
            active_model.id = Set(Uuid::new_v4());
            if let ActiveValue::NotSet = active_model.create_date {
                active_model.create_date = Set(now);
            }
        }
        active_model.last_updated = Set(now);
        Ok(active_model)
    }
}
