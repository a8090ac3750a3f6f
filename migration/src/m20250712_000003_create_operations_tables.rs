use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CartAssignments::Table)
                    .if_not_exists()
                    .col(pk_auto(CartAssignments::Id))
                    .col(integer(CartAssignments::EmployeeId))
                    .col(integer(CartAssignments::CartId))
                    .col(timestamp_with_time_zone(CartAssignments::StartedAt))
                    .col(timestamp_with_time_zone_null(CartAssignments::EndedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cart_assignments-employee_id")
                            .from(CartAssignments::Table, CartAssignments::EmployeeId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cart_assignments-cart_id")
                            .from(CartAssignments::Table, CartAssignments::CartId)
                            .to(Carts::Table, Carts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CartInventory::Table)
                    .if_not_exists()
                    .col(pk_auto(CartInventory::Id))
                    .col(integer(CartInventory::CartId))
                    .col(integer(CartInventory::ProductId))
                    .col(integer(CartInventory::QtyLoaded))
                    .col(integer(CartInventory::QtyRemaining))
                    .col(timestamp_with_time_zone(CartInventory::LoadedAt))
                    .col(timestamp_with_time_zone_null(CartInventory::ClosedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cart_inventory-cart_id")
                            .from(CartInventory::Table, CartInventory::CartId)
                            .to(Carts::Table, Carts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cart_inventory-product_id")
                            .from(CartInventory::Table, CartInventory::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(pk_auto(Sales::Id))
                    .col(integer(Sales::ClientId))
                    .col(integer(Sales::EmployeeId))
                    .col(integer_null(Sales::CartId))
                    .col(timestamp_with_time_zone(Sales::SoldAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales-client_id")
                            .from(Sales::Table, Sales::ClientId)
                            .to(Clients::Table, Clients::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales-employee_id")
                            .from(Sales::Table, Sales::EmployeeId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sales-cart_id")
                            .from(Sales::Table, Sales::CartId)
                            .to(Carts::Table, Carts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SaleLines::Table)
                    .if_not_exists()
                    .col(pk_auto(SaleLines::Id))
                    .col(integer(SaleLines::SaleId))
                    .col(integer(SaleLines::ProductId))
                    .col(integer(SaleLines::Quantity))
                    .col(decimal_len(SaleLines::UnitPrice, 10, 2))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sale_lines-sale_id")
                            .from(SaleLines::Table, SaleLines::SaleId)
                            .to(Sales::Table, Sales::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sale_lines-product_id")
                            .from(SaleLines::Table, SaleLines::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // The live ledger rows are always the closed_at IS NULL subset.
        manager
            .create_index(
                Index::create()
                    .name("idx-cart_inventory-cart-open")
                    .table(CartInventory::Table)
                    .col(CartInventory::CartId)
                    .col(CartInventory::ClosedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-cart_assignments-cart-open")
                    .table(CartAssignments::Table)
                    .col(CartAssignments::CartId)
                    .col(CartAssignments::EndedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SaleLines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CartInventory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CartAssignments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CartAssignments {
    Table,
    Id,
    EmployeeId,
    CartId,
    StartedAt,
    EndedAt,
}

#[derive(DeriveIden)]
enum CartInventory {
    Table,
    Id,
    CartId,
    ProductId,
    QtyLoaded,
    QtyRemaining,
    LoadedAt,
    ClosedAt,
}

#[derive(DeriveIden)]
enum Sales {
    Table,
    Id,
    ClientId,
    EmployeeId,
    CartId,
    SoldAt,
}

#[derive(DeriveIden)]
enum SaleLines {
    Table,
    Id,
    SaleId,
    ProductId,
    Quantity,
    UnitPrice,
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Carts {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
}
