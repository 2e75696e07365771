//! Data access layer. Every operation takes the connection or transaction it
//! runs on, so the service layer decides where transaction boundaries sit.

pub mod product_repository;
pub mod report_repository;
pub mod shipment_repository;

pub use product_repository::ProductRepository;
pub use report_repository::ReportRepository;
pub use shipment_repository::ShipmentRepository;
