//! Repository/transaction layer: each operation runs in its own transaction,
//! maps constraint violations to `Conflict` and shapes rows into responses.

pub mod products;
pub mod reports;
pub mod shipments;

pub use products::ProductService;
pub use reports::ReportService;
pub use shipments::ShipmentService;
