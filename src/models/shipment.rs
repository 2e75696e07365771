use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One delivery order. `shipment_num` is the external key; `id` stays internal.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shipments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub shipment_num: String,

    pub shipment_status: Option<String>,

    /// `YYYY-MM-DD`, compared as text by the spending report
    pub shipment_date: Option<String>,

    pub shipping_address: Option<String>,

    #[sea_orm(column_type = "Double")]
    pub shipping_cost: f64,

    /// Loyalty bonuses spent on the order
    pub bonuses: Option<i32>,

    pub assembly_and_delivery: Option<i32>,

    #[sea_orm(column_type = "Double", nullable)]
    pub discount: Option<f64>,

    pub create_date: DateTime<Utc>,

    pub last_updated: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Assigns the identifier and timestamps; callers never supply them.
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
