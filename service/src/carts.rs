use chrono::{DateTime, Utc};
use entity::{
    cart::{self, CartStatus},
    cart_assignment, employee,
    prelude::*,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;

use crate::{
    assignments::Assignments,
    error::{Result, ServiceError},
    inventory::{Inventory, LoadLine},
};

/// One cart as shown in the admin console, with its current operator.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOverview {
    pub id: i32,
    pub code: String,
    pub location: Option<String>,
    pub status: CartStatus,
    pub assigned_employee: Option<String>,
    pub assigned_since: Option<DateTime<Utc>>,
}

/// Drives the daily cart cycle: Available -> assign -> Active -> close -> Available.
pub struct Carts;

impl Carts {
    /// Hands a cart to an employee and marks it Active. Any previous
    /// assignment of the cart is ended in the same transaction.
    pub async fn assign_cart(
        db: &DatabaseConnection,
        cart_id: i32,
        employee_id: i32,
    ) -> Result<()> {
        if Cart::find_by_id(cart_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!("cart {cart_id}")));
        }
        if Employee::find_by_id(employee_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!("employee {employee_id}")));
        }

        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                Assignments::assign(txn, cart_id, employee_id).await?;

                cart::ActiveModel {
                    id: Set(cart_id),
                    status: Set(CartStatus::Active),
                    ..Default::default()
                }
                .update(txn)
                .await?;

                Ok(())
            })
        })
        .await
        .map_err(ServiceError::from)?;

        tracing::info!(cart_id, employee_id, "cart assigned");
        Ok(())
    }

    /// Loads stock onto the cart. Not gated on the cart being Active; the
    /// admin flow loads right after assigning, but the order is not enforced.
    pub async fn load_inventory(
        db: &DatabaseConnection,
        cart_id: i32,
        lines: Vec<LoadLine>,
    ) -> Result<()> {
        Inventory::load_cart(db, cart_id, lines).await?;
        tracing::info!(cart_id, "inventory loaded");
        Ok(())
    }

    /// End-of-day closure: return unsold stock to the warehouse, close the
    /// ledger rows, end the assignment and mark the cart Available — one
    /// transaction, so stock can never be returned while rows stay open.
    pub async fn close_cart(db: &DatabaseConnection, cart_id: i32) -> Result<()> {
        if Cart::find_by_id(cart_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!("cart {cart_id}")));
        }

        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                Inventory::close_and_reconcile(txn, cart_id).await?;
                Assignments::close(txn, cart_id).await?;

                cart::ActiveModel {
                    id: Set(cart_id),
                    status: Set(CartStatus::Available),
                    ..Default::default()
                }
                .update(txn)
                .await?;

                Ok(())
            })
        })
        .await
        .map_err(ServiceError::from)?;

        tracing::info!(cart_id, "cart closed");
        Ok(())
    }

    /// All carts ordered by code, each with its open assignment if one exists.
    pub async fn list_with_assignments(db: &DatabaseConnection) -> Result<Vec<CartOverview>> {
        let carts = Cart::find().order_by_asc(cart::Column::Code).all(db).await?;

        let open = CartAssignment::find()
            .filter(cart_assignment::Column::EndedAt.is_null())
            .find_also_related(employee::Entity)
            .all(db)
            .await?;

        Ok(carts
            .into_iter()
            .map(|c| {
                let current = open.iter().find(|(a, _)| a.cart_id == c.id);
                CartOverview {
                    id: c.id,
                    code: c.code,
                    location: c.location,
                    status: c.status,
                    assigned_employee: current
                        .and_then(|(_, e)| e.as_ref())
                        .map(employee::Model::full_name),
                    assigned_since: current.map(|(a, _)| a.started_at),
                }
            })
            .collect())
    }
}
