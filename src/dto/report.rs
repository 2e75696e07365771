use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::ServiceError;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

const REPORT_FAILURE: &str = "Failed to build the report.";

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Inclusive lower bound, `YYYY-MM-DD`
    #[param(example = "2024-03-01")]
    pub date_from: String,
    /// Inclusive upper bound, `YYYY-MM-DD`
    #[param(example = "2024-03-31")]
    pub date_to: String,
}

impl ReportQuery {
    /// Rejects anything that is not a real `YYYY-MM-DD` calendar date.
    pub fn validate_dates(&self) -> Result<(), ServiceError> {
        validate_report_date("date_from", &self.date_from)?;
        validate_report_date("date_to", &self.date_to)
    }
}

fn validate_report_date(field: &str, value: &str) -> Result<(), ServiceError> {
    let well_formed = DATE_PATTERN.is_match(value)
        && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok();
    if well_formed {
        Ok(())
    } else {
        Err(ServiceError::ValidationError(format!(
            "{field} must be a date in YYYY-MM-DD format, got '{value}'"
        )))
    }
}

/// Aggregates over delivered shipments. Sums are `None` when no row matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpendingReport {
    pub count: i64,
    pub total_cost: Option<f64>,
    pub total_cost_with_bonuses: Option<f64>,
}

impl SpendingReport {
    pub fn render(&self) -> String {
        match (self.total_cost, self.total_cost_with_bonuses) {
            (Some(total), Some(with_bonuses)) => format!(
                "Orders: {}. Total {:.2} ₽, {:.2} ₽ including spent bonuses.",
                self.count, total, with_bonuses
            ),
            _ => REPORT_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "report": "Orders: 3. Total 7350.00 ₽, 7620.00 ₽ including spent bonuses."
}))]
pub struct ReportResponse {
    pub report: String,
}

impl From<SpendingReport> for ReportResponse {
    fn from(report: SpendingReport) -> Self {
        Self {
            report: report.render(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(from: &str, to: &str) -> ReportQuery {
        ReportQuery {
            date_from: from.to_string(),
            date_to: to.to_string(),
        }
    }

    #[test]
    fn accepts_calendar_dates() {
        assert!(query("2024-01-01", "2024-12-31").validate_dates().is_ok());
        assert!(query("2024-02-29", "2024-02-29").validate_dates().is_ok());
    }

    #[test]
    fn rejects_impossible_month() {
        let err = query("2024-13-01", "2024-12-31").validate_dates().unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    #[test]
    fn rejects_unpadded_dates() {
        let err = query("2024-01-01", "2024-1-1").validate_dates().unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(msg) if msg.contains("date_to")));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(query("2024-01-01T00:00", "2024-01-02")
            .validate_dates()
            .is_err());
    }

    #[test]
    fn renders_totals_with_two_decimals() {
        let report = SpendingReport {
            count: 1,
            total_cost: Some(100.0),
            total_cost_with_bonuses: Some(110.0),
        };
        assert_eq!(
            report.render(),
            "Orders: 1. Total 100.00 ₽, 110.00 ₽ including spent bonuses."
        );
    }

    #[test]
    fn missing_sums_render_the_failure_sentence() {
        let report = SpendingReport {
            count: 0,
            total_cost: None,
            total_cost_with_bonuses: None,
        };
        assert_eq!(report.render(), REPORT_FAILURE);
    }
}
