use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk_auto(Products::Id))
                    .col(string(Products::Name))
                    .col(string_null(Products::Description))
                    .col(decimal_len(Products::Price, 10, 2))
                    .col(string(Products::Kind))
                    .col(integer(Products::CentralStock).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(pk_auto(Clients::Id))
                    .col(string(Clients::FirstName))
                    .col(string(Clients::LastName))
                    .col(string_null(Clients::Phone))
                    .col(string_null(Clients::Address))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Carts::Table)
                    .if_not_exists()
                    .col(pk_auto(Carts::Id))
                    .col(string_uniq(Carts::Code))
                    .col(string_null(Carts::Location))
                    .col(string_len(Carts::Status, 16).default("Available"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Carts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Price,
    Kind,
    CentralStock,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    FirstName,
    LastName,
    Phone,
    Address,
}

#[derive(DeriveIden)]
enum Carts {
    Table,
    Id,
    Code,
    Location,
    Status,
}
