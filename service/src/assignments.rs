use chrono::Utc;
use entity::cart_assignment;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, Set,
};

use crate::error::Result;

/// Time-boxed employee-to-cart bindings. Rows are closed, never deleted, so
/// the table doubles as the audit trail of who ran which cart when.
pub struct Assignments;

impl Assignments {
    /// Opens a new assignment for the cart, ending whatever assignment the
    /// cart had. The employee's other assignments are left untouched, so an
    /// employee can hold several carts at once; reassigning a *cart* is a
    /// one-step operation.
    pub async fn assign<C: ConnectionTrait>(
        conn: &C,
        cart_id: i32,
        employee_id: i32,
    ) -> Result<()> {
        let now = Utc::now();

        cart_assignment::Entity::update_many()
            .col_expr(cart_assignment::Column::EndedAt, Expr::value(now))
            .filter(cart_assignment::Column::CartId.eq(cart_id))
            .filter(cart_assignment::Column::EndedAt.is_null())
            .exec(conn)
            .await?;

        cart_assignment::ActiveModel {
            employee_id: Set(employee_id),
            cart_id: Set(cart_id),
            started_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(())
    }

    /// Ends the cart's open assignment, if any.
    pub async fn close<C: ConnectionTrait>(conn: &C, cart_id: i32) -> Result<()> {
        cart_assignment::Entity::update_many()
            .col_expr(cart_assignment::Column::EndedAt, Expr::value(Utc::now()))
            .filter(cart_assignment::Column::CartId.eq(cart_id))
            .filter(cart_assignment::Column::EndedAt.is_null())
            .exec(conn)
            .await?;

        Ok(())
    }

    pub async fn open_for_cart(
        db: &DatabaseConnection,
        cart_id: i32,
    ) -> Result<Option<cart_assignment::Model>> {
        Ok(cart_assignment::Entity::find()
            .filter(cart_assignment::Column::CartId.eq(cart_id))
            .filter(cart_assignment::Column::EndedAt.is_null())
            .one(db)
            .await?)
    }

    /// Carts the employee currently holds (open assignments only).
    pub async fn open_for_employee(
        db: &DatabaseConnection,
        employee_id: i32,
    ) -> Result<Vec<cart_assignment::Model>> {
        Ok(cart_assignment::Entity::find()
            .filter(cart_assignment::Column::EmployeeId.eq(employee_id))
            .filter(cart_assignment::Column::EndedAt.is_null())
            .all(db)
            .await?)
    }
}
