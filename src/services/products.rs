use crate::{
    db::DatabaseAccess,
    dto::{CreateProduct, DeletedProductResponse, ShowProduct, UpdateProductRequest},
    errors::ServiceError,
    repositories::ProductRepository,
};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Transactional product operations on top of [`ProductRepository`]
#[derive(Clone, Debug)]
pub struct ProductService {
    db: DatabaseAccess,
}

impl ProductService {
    pub fn new(db: DatabaseAccess) -> Self {
        Self { db }
    }

    /// Creates a product under an existing shipment
    #[instrument(skip(self, body), fields(shipment_num = %body.shipment_num))]
    pub async fn create_product(&self, body: CreateProduct) -> Result<ShowProduct, ServiceError> {
        body.validate()?;

        let created = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    ProductRepository::create(txn, &body).await.map_err(|e| {
                        ServiceError::from_constraint(e, "create the shipment first")
                    })
                })
            })
            .await?;

        info!(product_id = %created.id, "product created");
        Ok(created.into())
    }

    /// Lists the products of a shipment. An empty list means the shipment has
    /// no products; it says nothing about whether the shipment exists.
    #[instrument(skip(self))]
    pub async fn get_products(&self, shipment_num: &str) -> Result<Vec<ShowProduct>, ServiceError> {
        let shipment_num = shipment_num.to_string();
        let products = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    ProductRepository::find_by_shipment_num(txn, &shipment_num)
                        .await
                        .map_err(ServiceError::from)
                })
            })
            .await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        product_id: Uuid,
        patch: UpdateProductRequest,
    ) -> Result<Uuid, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::ValidationError(
                "specify at least one field to update".to_string(),
            ));
        }

        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    ProductRepository::update(txn, product_id, &patch)
                        .await
                        .map_err(|e| {
                            ServiceError::from_constraint(e, "check that the shipment exists")
                        })?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("product {product_id} does not exist"))
                        })
                })
            })
            .await
    }

    /// Removes every product of a shipment. `NotFound` when there was nothing
    /// to delete.
    #[instrument(skip(self))]
    pub async fn delete_products(
        &self,
        shipment_num: &str,
    ) -> Result<Vec<DeletedProductResponse>, ServiceError> {
        let shipment_num = shipment_num.to_string();
        let deleted = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    let ids = ProductRepository::delete_by_shipment_num(txn, &shipment_num).await?;
                    if ids.is_empty() {
                        return Err(ServiceError::NotFound(format!(
                            "shipment {shipment_num} has no products"
                        )));
                    }
                    Ok(ids)
                })
            })
            .await?;

        info!(count = deleted.len(), "products deleted");
        Ok(deleted
            .into_iter()
            .map(|deleted_products_id| DeletedProductResponse { deleted_products_id })
            .collect())
    }
}
