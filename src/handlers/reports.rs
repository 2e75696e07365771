use crate::{
    dto::{ReportQuery, ReportResponse},
    errors::ServiceError,
    AppState,
};
use axum::{
    extract::{Query, State},
    response::Json,
};

/// Spending report over delivered shipments in an inclusive date range
#[utoipa::path(
    get,
    path = "/report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report sentence", body = ReportResponse),
        (status = 422, description = "Date is not YYYY-MM-DD", body = crate::errors::ErrorResponse)
    ),
    tag = "report"
)]
pub async fn get_spending_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResponse>, ServiceError> {
    let report = state.report_service().spending_report(query).await?;
    Ok(Json(report.into()))
}
