use crate::{
    db::DatabaseAccess,
    dto::{CreateShipment, ShowShipment, UpdateShipmentRequest},
    errors::ServiceError,
    repositories::ShipmentRepository,
};
use tracing::{error, info, instrument};
use validator::Validate;

/// Transactional shipment operations on top of [`ShipmentRepository`]
#[derive(Clone, Debug)]
pub struct ShipmentService {
    db: DatabaseAccess,
}

impl ShipmentService {
    pub fn new(db: DatabaseAccess) -> Self {
        Self { db }
    }

    /// Creates a new shipment
    #[instrument(skip(self, body), fields(shipment_num = %body.shipment_num))]
    pub async fn create_shipment(&self, body: CreateShipment) -> Result<ShowShipment, ServiceError> {
        body.validate()?;

        let created = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    ShipmentRepository::create(txn, &body).await.map_err(|e| {
                        ServiceError::from_constraint(
                            e,
                            &format!("shipment {} could not be stored", body.shipment_num),
                        )
                    })
                })
            })
            .await?;

        info!(shipment_id = %created.id, "shipment created");
        Ok(created.into())
    }

    /// Looks a shipment up by number; `None` when it does not exist
    #[instrument(skip(self))]
    pub async fn get_shipment(&self, shipment_num: &str) -> Result<Option<ShowShipment>, ServiceError> {
        let shipment_num = shipment_num.to_string();
        let found = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    ShipmentRepository::find_by_num(txn, &shipment_num)
                        .await
                        .map_err(|e| {
                            error!(error = %e, "shipment lookup failed");
                            ServiceError::DatabaseError(e)
                        })
                })
            })
            .await?;
        Ok(found.map(Into::into))
    }

    /// Applies a partial update. An empty patch is rejected before the store is
    /// touched and an unknown shipment number yields `NotFound`.
    #[instrument(skip(self, patch))]
    pub async fn update_shipment(
        &self,
        shipment_num: &str,
        patch: UpdateShipmentRequest,
    ) -> Result<String, ServiceError> {
        if patch.is_empty() {
            return Err(ServiceError::ValidationError(
                "specify at least one field to update".to_string(),
            ));
        }

        let shipment_num = shipment_num.to_string();
        self.db
            .transaction(move |txn| {
                Box::pin(async move {
                    if ShipmentRepository::find_by_num(txn, &shipment_num)
                        .await?
                        .is_none()
                    {
                        return Err(shipment_not_found(&shipment_num));
                    }

                    ShipmentRepository::update_by_num(txn, &shipment_num, &patch)
                        .await
                        .map_err(|e| {
                            ServiceError::from_constraint(
                                e,
                                &format!("shipment {shipment_num} could not be updated"),
                            )
                        })?
                        .ok_or_else(|| shipment_not_found(&shipment_num))
                })
            })
            .await
    }

    /// Deletes a shipment. Fails with `Conflict` while products still reference it.
    #[instrument(skip(self))]
    pub async fn delete_shipment(&self, shipment_num: &str) -> Result<String, ServiceError> {
        let shipment_num = shipment_num.to_string();
        let deleted = self
            .db
            .transaction(move |txn| {
                Box::pin(async move {
                    if ShipmentRepository::find_by_num(txn, &shipment_num)
                        .await?
                        .is_none()
                    {
                        return Err(shipment_not_found(&shipment_num));
                    }

                    ShipmentRepository::delete_by_num(txn, &shipment_num)
                        .await
                        .map_err(|e| {
                            ServiceError::from_constraint(
                                e,
                                "products still reference this shipment, delete them first",
                            )
                        })?
                        .ok_or_else(|| shipment_not_found(&shipment_num))
                })
            })
            .await?;

        info!(shipment_num = %deleted, "shipment deleted");
        Ok(deleted)
    }
}

pub(crate) fn shipment_not_found(shipment_num: &str) -> ServiceError {
    ServiceError::NotFound(format!("shipment {shipment_num} does not exist"))
}
