//! Request and response payloads shared by the HTTP handlers, the service
//! layer and the staging ingester.

pub mod product;
pub mod report;
pub mod shipment;

pub use product::{
    CreateProduct, DeletedProductResponse, ShowProduct, UpdateProductRequest,
    UpdatedProductResponse,
};
pub use report::{ReportQuery, ReportResponse, SpendingReport};
pub use shipment::{
    CreateShipment, DeletedShipmentResponse, ShowShipment, UpdateShipmentRequest,
    UpdatedShipmentResponse,
};
