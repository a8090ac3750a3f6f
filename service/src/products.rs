use entity::{cart_assignment, cart_inventory, prelude::*, product};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub central_stock: Option<i32>,
}

/// What a vendor sees on the POS screen: the products still on their cart.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorStock {
    pub product_id: i32,
    pub name: String,
    pub price: Decimal,
    pub kind: String,
    pub stock: i32,
}

pub struct Products;

impl Products {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
        Ok(Product::find()
            .order_by_asc(product::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<product::Model> {
        Product::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("product {id}")))
    }

    pub async fn create(db: &DatabaseConnection, input: ProductInput) -> Result<i32> {
        validate(&input)?;

        let created = product::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            kind: Set(input.kind.unwrap_or_else(|| "other".to_owned())),
            central_stock: Set(input.central_stock.unwrap_or(0)),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(created.id)
    }

    pub async fn update(db: &DatabaseConnection, id: i32, input: ProductInput) -> Result<()> {
        validate(&input)?;
        let existing = Self::get(db, id).await?;

        product::ActiveModel {
            id: Set(id),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            kind: Set(input.kind.unwrap_or(existing.kind)),
            central_stock: Set(input.central_stock.unwrap_or(existing.central_stock)),
        }
        .update(db)
        .await?;

        Ok(())
    }

    pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<()> {
        let deleted = Product::delete_by_id(id).exec(db).await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("product {id}")));
        }
        Ok(())
    }

    /// The open-cart stock of one employee: products on any cart currently
    /// assigned to them with something left to sell, ordered by name.
    pub async fn my_inventory(
        db: &DatabaseConnection,
        employee_id: i32,
    ) -> Result<Vec<VendorStock>> {
        let cart_ids: Vec<i32> = CartAssignment::find()
            .filter(cart_assignment::Column::EmployeeId.eq(employee_id))
            .filter(cart_assignment::Column::EndedAt.is_null())
            .all(db)
            .await?
            .into_iter()
            .map(|a| a.cart_id)
            .collect();

        if cart_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = CartInventory::find()
            .filter(cart_inventory::Column::CartId.is_in(cart_ids))
            .filter(cart_inventory::Column::ClosedAt.is_null())
            .filter(cart_inventory::Column::QtyRemaining.gt(0))
            .find_also_related(product::Entity)
            .all(db)
            .await?;

        let mut stock: Vec<VendorStock> = rows
            .into_iter()
            .filter_map(|(row, product)| {
                product.map(|p| VendorStock {
                    product_id: p.id,
                    name: p.name,
                    price: p.price,
                    kind: p.kind,
                    stock: row.qty_remaining,
                })
            })
            .collect();
        stock.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(stock)
    }
}

fn validate(input: &ProductInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("name is required".to_owned()));
    }
    if input.price <= Decimal::ZERO {
        return Err(ServiceError::InvalidInput(
            "price must be positive".to_owned(),
        ));
    }
    if matches!(input.central_stock, Some(stock) if stock < 0) {
        return Err(ServiceError::InvalidInput(
            "central stock cannot be negative".to_owned(),
        ));
    }
    Ok(())
}
