use chrono::{DateTime, NaiveTime, Utc};
use entity::{prelude::*, product, sale, sale_line};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ServiceError},
    inventory::Inventory,
};

/// One line of a sale request. The unit price is what the vendor charged,
/// captured as-is; it is never re-read from the product catalog.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SaleLineInput {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewSale {
    pub client_id: i32,
    pub employee_id: i32,
    pub cart_id: Option<i32>,
    pub items: Vec<SaleLineInput>,
}

/// A vendor's sale as listed in the day view.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub id: i32,
    pub sold_at: DateTime<Utc>,
    pub cart_code: Option<String>,
    pub client: String,
    pub total: Decimal,
    pub line_count: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetailLine {
    pub product: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

pub struct Sales;

impl Sales {
    /// Records a sale with its lines and, when the sale went through a cart,
    /// decrements that cart's open inventory. Everything happens in one
    /// transaction: if any line cannot be delivered, the sale and all of its
    /// lines are rolled back and nothing is visible afterwards.
    pub async fn record_sale(db: &DatabaseConnection, input: NewSale) -> Result<i32> {
        if input.items.is_empty() {
            return Err(ServiceError::InvalidInput(
                "a sale needs at least one item".to_owned(),
            ));
        }
        for item in &input.items {
            if item.quantity <= 0 {
                return Err(ServiceError::InvalidInput(format!(
                    "quantity for product {} must be positive",
                    item.product_id
                )));
            }
        }
        if Client::find_by_id(input.client_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!("client {}", input.client_id)));
        }
        if Employee::find_by_id(input.employee_id)
            .one(db)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!(
                "employee {}",
                input.employee_id
            )));
        }

        let sale_id = db
            .transaction::<_, i32, ServiceError>(move |txn| {
                Box::pin(async move {
                    let sale = sale::ActiveModel {
                        client_id: Set(input.client_id),
                        employee_id: Set(input.employee_id),
                        cart_id: Set(input.cart_id),
                        sold_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    for item in &input.items {
                        sale_line::ActiveModel {
                            sale_id: Set(sale.id),
                            product_id: Set(item.product_id),
                            quantity: Set(item.quantity),
                            unit_price: Set(item.unit_price),
                            ..Default::default()
                        }
                        .insert(txn)
                        .await?;

                        if let Some(cart_id) = input.cart_id {
                            Inventory::decrement_on_sale(
                                txn,
                                cart_id,
                                item.product_id,
                                item.quantity,
                            )
                            .await?;
                        }
                    }

                    Ok(sale.id)
                })
            })
            .await
            .map_err(ServiceError::from)?;

        tracing::info!(sale_id, "sale recorded");
        Ok(sale_id)
    }

    /// Today's sales for one employee, newest first, with computed totals.
    pub async fn sales_for_employee_today(
        db: &DatabaseConnection,
        employee_id: i32,
    ) -> Result<Vec<SaleSummary>> {
        let today_start = Utc::now()
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();

        let sales = Sale::find()
            .filter(sale::Column::EmployeeId.eq(employee_id))
            .filter(sale::Column::SoldAt.gte(today_start))
            .order_by_desc(sale::Column::SoldAt)
            .find_with_related(SaleLine)
            .all(db)
            .await?;

        let mut summaries = Vec::with_capacity(sales.len());
        for (sale, lines) in sales {
            let client = Client::find_by_id(sale.client_id)
                .one(db)
                .await?
                .map(|c| format!("{} {}", c.first_name, c.last_name))
                .unwrap_or_default();
            let cart_code = match sale.cart_id {
                Some(cart_id) => Cart::find_by_id(cart_id).one(db).await?.map(|c| c.code),
                None => None,
            };
            summaries.push(SaleSummary {
                id: sale.id,
                sold_at: sale.sold_at,
                cart_code,
                client,
                total: lines
                    .iter()
                    .map(|l| Decimal::from(l.quantity) * l.unit_price)
                    .sum(),
                line_count: lines.len(),
            });
        }

        Ok(summaries)
    }

    /// The line items of one sale, joined to product names.
    pub async fn sale_detail(db: &DatabaseConnection, sale_id: i32) -> Result<Vec<SaleDetailLine>> {
        if Sale::find_by_id(sale_id).one(db).await?.is_none() {
            return Err(ServiceError::NotFound(format!("sale {sale_id}")));
        }

        let lines = SaleLine::find()
            .filter(sale_line::Column::SaleId.eq(sale_id))
            .find_also_related(product::Entity)
            .all(db)
            .await?;

        Ok(lines
            .into_iter()
            .map(|(line, product)| SaleDetailLine {
                product: product.map(|p| p.name).unwrap_or_default(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: Decimal::from(line.quantity) * line.unit_price,
            })
            .collect())
    }
}
