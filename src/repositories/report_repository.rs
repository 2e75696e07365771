use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QueryFilter, QuerySelect,
};

use crate::dto::SpendingReport;
use crate::models::shipment::{Column, Entity as Shipment};

#[derive(Debug, FromQueryResult)]
struct ReportRow {
    count: i64,
    total_cost: Option<f64>,
    total_cost_with_bonuses: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRepository;

impl ReportRepository {
    /// Counts shipments with `delivered_status` whose date falls in the
    /// inclusive range and sums their cost, with and without spent bonuses.
    /// The sums stay `None` when nothing matched.
    pub async fn spending_report<C: ConnectionTrait>(
        db: &C,
        delivered_status: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<SpendingReport, DbErr> {
        let row = Shipment::find()
            .select_only()
            .column_as(Expr::col(Column::ShipmentNum).count(), "count")
            .column_as(Expr::col(Column::ShippingCost).sum(), "total_cost")
            .column_as(
                Expr::col(Column::ShippingCost)
                    .sum()
                    .add(Expr::col(Column::Bonuses).sum()),
                "total_cost_with_bonuses",
            )
            .filter(Column::ShipmentStatus.eq(delivered_status))
            .filter(Column::ShipmentDate.between(date_from, date_to))
            .into_model::<ReportRow>()
            .one(db)
            .await?;

        Ok(row.map_or(
            SpendingReport {
                count: 0,
                total_cost: None,
                total_cost_with_bonuses: None,
            },
            |row| SpendingReport {
                count: row.count,
                total_cost: row.total_cost,
                total_cost_with_bonuses: row.total_cost_with_bonuses,
            },
        ))
    }
}
