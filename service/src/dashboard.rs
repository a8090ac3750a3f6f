use chrono::{DateTime, NaiveTime, Utc};
use entity::{
    cart::{self, CartStatus},
    cart_assignment, employee,
    prelude::*,
    sale, user,
};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::Serialize;

use crate::error::Result;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_carts: u64,
    pub sales_today: u64,
    pub revenue_today: Decimal,
    pub products: u64,
    pub active_employees: u64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub id: i32,
    pub cart_code: Option<String>,
    pub sold_at: DateTime<Utc>,
    pub total: Decimal,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOnRoute {
    pub id: i32,
    pub code: String,
    pub location: Option<String>,
    pub employee: Option<String>,
}

/// Read-only projections for the admin console. Nothing here is
/// authoritative; it is all derived from the persistent records.
pub struct Dashboard;

impl Dashboard {
    pub async fn stats(db: &DatabaseConnection) -> Result<DashboardStats> {
        let today_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();

        let active_carts = Cart::find()
            .filter(cart::Column::Status.eq(CartStatus::Active))
            .count(db)
            .await?;

        let todays = Sale::find()
            .filter(sale::Column::SoldAt.gte(today_start))
            .find_with_related(SaleLine)
            .all(db)
            .await?;
        let sales_today = todays.len() as u64;
        let revenue_today = todays
            .iter()
            .flat_map(|(_, lines)| lines)
            .map(|l| Decimal::from(l.quantity) * l.unit_price)
            .sum();

        let products = Product::find().count(db).await?;

        let active_employees = User::find()
            .filter(user::Column::Active.eq(true))
            .filter(user::Column::EmployeeId.is_not_null())
            .count(db)
            .await?;

        Ok(DashboardStats {
            active_carts,
            sales_today,
            revenue_today,
            products,
            active_employees,
        })
    }

    /// The five most recent sales, with totals.
    pub async fn recent_sales(db: &DatabaseConnection) -> Result<Vec<RecentSale>> {
        let sales = Sale::find()
            .order_by_desc(sale::Column::SoldAt)
            .limit(5)
            .all(db)
            .await?;

        let mut recent = Vec::with_capacity(sales.len());
        for sale in sales {
            let lines = sale.find_related(SaleLine).all(db).await?;
            let cart_code = match sale.cart_id {
                Some(cart_id) => Cart::find_by_id(cart_id).one(db).await?.map(|c| c.code),
                None => None,
            };
            recent.push(RecentSale {
                id: sale.id,
                cart_code,
                sold_at: sale.sold_at,
                total: lines
                    .iter()
                    .map(|l| Decimal::from(l.quantity) * l.unit_price)
                    .sum(),
            });
        }

        Ok(recent)
    }

    /// Carts currently out selling, with the employee running each one.
    pub async fn active_carts(db: &DatabaseConnection) -> Result<Vec<CartOnRoute>> {
        let carts = Cart::find()
            .filter(cart::Column::Status.eq(CartStatus::Active))
            .all(db)
            .await?;

        let open = CartAssignment::find()
            .filter(cart_assignment::Column::EndedAt.is_null())
            .find_also_related(employee::Entity)
            .all(db)
            .await?;

        Ok(carts
            .into_iter()
            .map(|c| {
                let operator = open
                    .iter()
                    .find(|(a, _)| a.cart_id == c.id)
                    .and_then(|(_, e)| e.as_ref())
                    .map(employee::Model::full_name);
                CartOnRoute {
                    id: c.id,
                    code: c.code,
                    location: c.location,
                    employee: operator,
                }
            })
            .collect())
    }
}
