pub mod products;
pub mod reports;
pub mod shipments;

use crate::db::{DatabaseAccess, DbPool};
use crate::services::{ProductService, ReportService, ShipmentService};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone, Debug)]
pub struct AppServices {
    pub shipments: Arc<ShipmentService>,
    pub products: Arc<ProductService>,
    pub reports: Arc<ReportService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, delivered_status: &str) -> Self {
        let db = DatabaseAccess::new(db_pool);
        Self {
            shipments: Arc::new(ShipmentService::new(db.clone())),
            products: Arc::new(ProductService::new(db.clone())),
            reports: Arc::new(ReportService::new(db, delivered_status)),
        }
    }
}
