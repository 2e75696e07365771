use crate::{
    db::DatabaseAccess,
    dto::{ReportQuery, SpendingReport},
    errors::ServiceError,
    repositories::ReportRepository,
};
use tracing::{debug, instrument};

/// Spending report over delivered shipments
#[derive(Clone, Debug)]
pub struct ReportService {
    db: DatabaseAccess,
    delivered_status: String,
}

impl ReportService {
    pub fn new(db: DatabaseAccess, delivered_status: impl Into<String>) -> Self {
        Self {
            db,
            delivered_status: delivered_status.into(),
        }
    }

    /// Validates both dates, then aggregates inside a single transaction.
    #[instrument(skip(self))]
    pub async fn spending_report(&self, query: ReportQuery) -> Result<SpendingReport, ServiceError> {
        query.validate_dates()?;

        let status = self.delivered_status.clone();
        let report = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    ReportRepository::spending_report(
                        txn,
                        &status,
                        &query.date_from,
                        &query.date_to,
                    )
                    .await
                    .map_err(ServiceError::from)
                })
            })
            .await?;

        debug!(count = report.count, "spending report built");
        Ok(report)
    }
}
