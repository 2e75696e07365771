use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::dto::{CreateProduct, UpdateProductRequest};
use crate::models::product::{ActiveModel, Column, Entity as Product, Model};

/// Product rows, addressed by id or by their owning shipment number
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductRepository;

impl ProductRepository {
    /// Inserts a product. An unknown shipment number surfaces as a foreign
    /// key violation from the store.
    pub async fn create<C: ConnectionTrait>(db: &C, body: &CreateProduct) -> Result<Model, DbErr> {
        ActiveModel {
            product_name: Set(body.product_name.clone()),
            quantity: Set(body.quantity.clone()),
            purchase_price: Set(body.purchase_price),
            purchase_status: Set(body.purchase_status.clone()),
            shipment_num: Set(body.shipment_num.clone()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// All products of a shipment in insertion order; empty when there are none.
    pub async fn find_by_shipment_num<C: ConnectionTrait>(
        db: &C,
        shipment_num: &str,
    ) -> Result<Vec<Model>, DbErr> {
        Product::find()
            .filter(Column::ShipmentNum.eq(shipment_num))
            .order_by_asc(Column::CreateDate)
            .all(db)
            .await
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        product_id: Uuid,
        patch: &UpdateProductRequest,
    ) -> Result<Option<Uuid>, DbErr> {
        let mut update = Product::update_many()
            .col_expr(Column::LastUpdated, Expr::value(Utc::now()))
            .filter(Column::Id.eq(product_id));

        if let Some(name) = &patch.product_name {
            update = update.col_expr(Column::ProductName, Expr::value(name.clone()));
        }
        if let Some(quantity) = &patch.quantity {
            update = update.col_expr(Column::Quantity, Expr::value(quantity.clone()));
        }
        if let Some(price) = patch.purchase_price {
            update = update.col_expr(Column::PurchasePrice, Expr::value(price));
        }
        if let Some(status) = &patch.purchase_status {
            update = update.col_expr(Column::PurchaseStatus, Expr::value(status.clone()));
        }
        if let Some(shipment_num) = &patch.shipment_num {
            update = update.col_expr(Column::ShipmentNum, Expr::value(shipment_num.clone()));
        }

        let result = update.exec(db).await?;
        Ok((result.rows_affected > 0).then_some(product_id))
    }

    /// Deletes every product of a shipment and returns the removed ids.
    pub async fn delete_by_shipment_num<C: ConnectionTrait>(
        db: &C,
        shipment_num: &str,
    ) -> Result<Vec<Uuid>, DbErr> {
        let ids: Vec<Uuid> = Product::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::ShipmentNum.eq(shipment_num))
            .order_by_asc(Column::CreateDate)
            .into_tuple()
            .all(db)
            .await?;

        if ids.is_empty() {
            return Ok(ids);
        }

        Product::delete_many()
            .filter(Column::Id.is_in(ids.clone()))
            .exec(db)
            .await?;

        Ok(ids)
    }
}
