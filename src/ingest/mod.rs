//! Offline ingester: replays a staging document through the service layer.
//!
//! Shipments load in document order, each followed by its products. The run
//! stops at the first failure and keeps whatever was already committed, so a
//! second run over the same file fails on the first shipment number that
//! already exists.

pub mod staging;

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::handlers::AppServices;
use crate::services::{ProductService, ShipmentService};

pub use staging::{
    load_staging, save_staging, OrderedEntries, StagedProduct, StagedShipment, StagingDocument,
};

/// Counts of rows created by one ingest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub shipments: usize,
    pub products: usize,
}

#[derive(Clone, Debug)]
pub struct Ingester {
    shipments: Arc<ShipmentService>,
    products: Arc<ProductService>,
}

impl Ingester {
    pub fn new(services: &AppServices) -> Self {
        Self {
            shipments: services.shipments.clone(),
            products: services.products.clone(),
        }
    }

    /// Loads the staging file at `path` and ingests it.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn ingest_file(&self, path: &Path) -> Result<IngestSummary, ServiceError> {
        let document = load_staging(path).await?;
        info!(shipments = document.len(), "staging document loaded");
        self.ingest(&document).await
    }

    pub async fn ingest(&self, document: &StagingDocument) -> Result<IngestSummary, ServiceError> {
        let mut summary = IngestSummary::default();

        for (shipment_num, staged) in document.iter() {
            self.shipments
                .create_shipment(staged.to_create(shipment_num)?)
                .await?;
            summary.shipments += 1;

            for (_, product) in staged.products.iter() {
                self.products
                    .create_product(product.to_create(shipment_num))
                    .await?;
                summary.products += 1;
            }
        }

        info!(
            shipments = summary.shipments,
            products = summary.products,
            "staging document ingested"
        );
        Ok(summary)
    }
}
