use chrono::Utc;
use entity::{cart, cart_inventory, product};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;

use crate::error::{Result, ServiceError};

/// One requested (product, quantity) pair for a cart load.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoadLine {
    pub product_id: i32,
    pub quantity: i32,
}

/// Per-cart inventory ledger. Every operation touches only the open rows of
/// a single cart.
pub struct Inventory;

impl Inventory {
    /// Starts a new loading period for a cart: closes whatever open rows the
    /// cart still has, inserts one open row per requested product and takes
    /// the requested quantity out of the product's central stock. The whole
    /// load is a single transaction.
    ///
    /// Central stock is not allowed to go negative; a load that exceeds it
    /// fails with `InsufficientStock` and leaves nothing behind.
    pub async fn load_cart(
        db: &DatabaseConnection,
        cart_id: i32,
        lines: Vec<LoadLine>,
    ) -> Result<()> {
        if lines.is_empty() {
            return Err(ServiceError::InvalidInput(
                "at least one product line is required".to_owned(),
            ));
        }
        for line in &lines {
            if line.quantity <= 0 {
                return Err(ServiceError::InvalidInput(format!(
                    "quantity for product {} must be positive",
                    line.product_id
                )));
            }
        }
        if cart::Entity::find_by_id(cart_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!("cart {cart_id}")));
        }

        db.transaction::<_, (), ServiceError>(move |txn| {
            Box::pin(async move {
                let now = Utc::now();

                // End the previous loading period. Remainders are returned to
                // central stock only by close_and_reconcile, not here.
                cart_inventory::Entity::update_many()
                    .col_expr(cart_inventory::Column::ClosedAt, Expr::value(now))
                    .filter(cart_inventory::Column::CartId.eq(cart_id))
                    .filter(cart_inventory::Column::ClosedAt.is_null())
                    .exec(txn)
                    .await?;

                for line in lines {
                    let taken = product::Entity::update_many()
                        .col_expr(
                            product::Column::CentralStock,
                            Expr::col(product::Column::CentralStock).sub(line.quantity),
                        )
                        .filter(product::Column::Id.eq(line.product_id))
                        .filter(product::Column::CentralStock.gte(line.quantity))
                        .exec(txn)
                        .await?;
                    if taken.rows_affected == 0 {
                        let exists = product::Entity::find_by_id(line.product_id)
                            .one(txn)
                            .await?
                            .is_some();
                        return Err(if exists {
                            ServiceError::InsufficientStock {
                                product_id: line.product_id,
                            }
                        } else {
                            ServiceError::NotFound(format!("product {}", line.product_id))
                        });
                    }

                    cart_inventory::ActiveModel {
                        cart_id: Set(cart_id),
                        product_id: Set(line.product_id),
                        qty_loaded: Set(line.quantity),
                        qty_remaining: Set(line.quantity),
                        loaded_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                }

                Ok(())
            })
        })
        .await
        .map_err(ServiceError::from)
    }

    /// Takes `quantity` off the open ledger row for (cart, product). The
    /// decrement and its stock guard are one conditional UPDATE, so competing
    /// callers are serialized by the store and can never both succeed against
    /// a stale remainder.
    ///
    /// Runs on the caller's connection so a sale can include it in its own
    /// transaction.
    pub async fn decrement_on_sale<C: ConnectionTrait>(
        conn: &C,
        cart_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<()> {
        let updated = cart_inventory::Entity::update_many()
            .col_expr(
                cart_inventory::Column::QtyRemaining,
                Expr::col(cart_inventory::Column::QtyRemaining).sub(quantity),
            )
            .filter(cart_inventory::Column::CartId.eq(cart_id))
            .filter(cart_inventory::Column::ProductId.eq(product_id))
            .filter(cart_inventory::Column::ClosedAt.is_null())
            .filter(cart_inventory::Column::QtyRemaining.gte(quantity))
            .exec(conn)
            .await?;

        if updated.rows_affected == 0 {
            let open_row = cart_inventory::Entity::find()
                .filter(cart_inventory::Column::CartId.eq(cart_id))
                .filter(cart_inventory::Column::ProductId.eq(product_id))
                .filter(cart_inventory::Column::ClosedAt.is_null())
                .one(conn)
                .await?;
            return Err(match open_row {
                Some(_) => ServiceError::InsufficientStock { product_id },
                None => ServiceError::NotFound(format!(
                    "open inventory for product {product_id} on cart {cart_id}"
                )),
            });
        }

        Ok(())
    }

    /// Returns every open row's remainder to central stock and stamps the
    /// rows closed. Callers wrap this together with the assignment closure in
    /// one transaction; stock must never be returned without the rows being
    /// marked closed, or a later load would double-count it.
    pub async fn close_and_reconcile<C: ConnectionTrait>(conn: &C, cart_id: i32) -> Result<()> {
        let open_rows = cart_inventory::Entity::find()
            .filter(cart_inventory::Column::CartId.eq(cart_id))
            .filter(cart_inventory::Column::ClosedAt.is_null())
            .all(conn)
            .await?;

        for row in &open_rows {
            if row.qty_remaining > 0 {
                product::Entity::update_many()
                    .col_expr(
                        product::Column::CentralStock,
                        Expr::col(product::Column::CentralStock).add(row.qty_remaining),
                    )
                    .filter(product::Column::Id.eq(row.product_id))
                    .exec(conn)
                    .await?;
            }
        }

        cart_inventory::Entity::update_many()
            .col_expr(cart_inventory::Column::ClosedAt, Expr::value(Utc::now()))
            .filter(cart_inventory::Column::CartId.eq(cart_id))
            .filter(cart_inventory::Column::ClosedAt.is_null())
            .exec(conn)
            .await?;

        Ok(())
    }

    /// Open ledger rows for a cart, oldest first.
    pub async fn open_loads(
        db: &DatabaseConnection,
        cart_id: i32,
    ) -> Result<Vec<cart_inventory::Model>> {
        Ok(cart_inventory::Entity::find()
            .filter(cart_inventory::Column::CartId.eq(cart_id))
            .filter(cart_inventory::Column::ClosedAt.is_null())
            .all(db)
            .await?)
    }
}
