use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_shipments_table::Migration),
            Box::new(m20240101_000002_create_products_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_shipments_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_shipments_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Shipments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Shipments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Shipments::ShipmentNum)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Shipments::ShipmentStatus).string().null())
                        .col(ColumnDef::new(Shipments::ShipmentDate).string().null())
                        .col(ColumnDef::new(Shipments::ShippingAddress).string().null())
                        .col(ColumnDef::new(Shipments::ShippingCost).double().not_null())
                        .col(ColumnDef::new(Shipments::Bonuses).integer().null())
                        .col(
                            ColumnDef::new(Shipments::AssemblyAndDelivery)
                                .integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Shipments::Discount).double().null())
                        .col(
                            ColumnDef::new(Shipments::CreateDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Shipments::LastUpdated)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // The spending report filters on the date range
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_shipments_shipment_date")
                        .table(Shipments::Table)
                        .col(Shipments::ShipmentDate)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Shipments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Shipments {
        Table,
        Id,
        ShipmentNum,
        ShipmentStatus,
        ShipmentDate,
        ShippingAddress,
        ShippingCost,
        Bonuses,
        AssemblyAndDelivery,
        Discount,
        CreateDate,
        LastUpdated,
    }
}

mod m20240101_000002_create_products_table {

    use super::m20240101_000001_create_shipments_table::Shipments;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::ProductName).string().null())
                        .col(ColumnDef::new(Products::Quantity).string().null())
                        .col(ColumnDef::new(Products::PurchasePrice).double().null())
                        .col(ColumnDef::new(Products::PurchaseStatus).string().null())
                        .col(ColumnDef::new(Products::ShipmentNum).string().not_null())
                        .col(
                            ColumnDef::new(Products::CreateDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::LastUpdated)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        // Products never outlive their shipment: deleting a
                        // referenced shipment must fail instead of cascading.
                        // NO ACTION rather than RESTRICT, since SQLite reports a
                        // RESTRICT violation with an extended code sea-orm does
                        // not classify as a foreign-key error.
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_products_shipment_num")
                                .from(Products::Table, Products::ShipmentNum)
                                .to(Shipments::Table, Shipments::ShipmentNum)
                                .on_delete(ForeignKeyAction::NoAction)
                                .on_update(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_products_shipment_num")
                        .table(Products::Table)
                        .col(Products::ShipmentNum)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
        ProductName,
        Quantity,
        PurchasePrice,
        PurchaseStatus,
        ShipmentNum,
        CreateDate,
        LastUpdated,
    }
}
