use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::dto::{CreateShipment, UpdateShipmentRequest};
use crate::models::shipment::{ActiveModel, Column, Entity as Shipment, Model};

/// Shipment rows, addressed by their shipment number
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipmentRepository;

impl ShipmentRepository {
    /// Inserts a shipment. A duplicate shipment number surfaces as a unique
    /// constraint violation from the store.
    pub async fn create<C: ConnectionTrait>(db: &C, body: &CreateShipment) -> Result<Model, DbErr> {
        ActiveModel {
            shipment_num: Set(body.shipment_num.clone()),
            shipment_status: Set(body.shipment_status.clone()),
            shipment_date: Set(body.shipment_date.clone()),
            shipping_address: Set(body.shipping_address.clone()),
            shipping_cost: Set(body.shipping_cost),
            bonuses: Set(body.bonuses),
            assembly_and_delivery: Set(body.assembly_and_delivery),
            discount: Set(body.discount),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn find_by_num<C: ConnectionTrait>(
        db: &C,
        shipment_num: &str,
    ) -> Result<Option<Model>, DbErr> {
        Shipment::find()
            .filter(Column::ShipmentNum.eq(shipment_num))
            .one(db)
            .await
    }

    /// Applies only the supplied fields. Returns the shipment number when a
    /// row matched.
    pub async fn update_by_num<C: ConnectionTrait>(
        db: &C,
        shipment_num: &str,
        patch: &UpdateShipmentRequest,
    ) -> Result<Option<String>, DbErr> {
        let mut update = Shipment::update_many()
            .col_expr(Column::LastUpdated, Expr::value(Utc::now()))
            .filter(Column::ShipmentNum.eq(shipment_num));

        if let Some(status) = &patch.shipment_status {
            update = update.col_expr(Column::ShipmentStatus, Expr::value(status.clone()));
        }
        if let Some(date) = &patch.shipment_date {
            update = update.col_expr(Column::ShipmentDate, Expr::value(date.clone()));
        }
        if let Some(address) = &patch.shipping_address {
            update = update.col_expr(Column::ShippingAddress, Expr::value(address.clone()));
        }
        if let Some(cost) = patch.shipping_cost {
            update = update.col_expr(Column::ShippingCost, Expr::value(cost));
        }
        if let Some(bonuses) = patch.bonuses {
            update = update.col_expr(Column::Bonuses, Expr::value(bonuses));
        }
        if let Some(fee) = patch.assembly_and_delivery {
            update = update.col_expr(Column::AssemblyAndDelivery, Expr::value(fee));
        }
        if let Some(discount) = patch.discount {
            update = update.col_expr(Column::Discount, Expr::value(discount));
        }

        let result = update.exec(db).await?;
        Ok((result.rows_affected > 0).then(|| shipment_num.to_string()))
    }

    /// Deletes a shipment. Fails with a foreign key violation while products
    /// still reference it.
    pub async fn delete_by_num<C: ConnectionTrait>(
        db: &C,
        shipment_num: &str,
    ) -> Result<Option<String>, DbErr> {
        let result = Shipment::delete_many()
            .filter(Column::ShipmentNum.eq(shipment_num))
            .exec(db)
            .await?;
        Ok((result.rows_affected > 0).then(|| shipment_num.to_string()))
    }
}
