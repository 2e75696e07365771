pub mod product;
pub mod shipment;

pub use product::Entity as Product;
pub use shipment::Entity as Shipment;
