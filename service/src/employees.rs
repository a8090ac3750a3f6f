use chrono::{DateTime, Utc};
use entity::{employee, position, prelude::*, role, user};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub document_id: String,
    pub phone: Option<String>,
    pub position_id: i32,
}

/// The one-time credentials handed to the admin when an employee is created.
/// The plain password is derived, shown once and stored only as a hash.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEmployee {
    pub employee_id: i32,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeOverview {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub document_id: String,
    pub phone: Option<String>,
    pub position: String,
    pub salary: Decimal,
    pub hired_at: DateTime<Utc>,
    pub username: Option<String>,
    pub active: bool,
}

pub struct Employees;

impl Employees {
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<EmployeeOverview>> {
        let employees = Employee::find()
            .order_by_asc(employee::Column::LastName)
            .order_by_asc(employee::Column::FirstName)
            .find_also_related(position::Entity)
            .all(db)
            .await?;

        let accounts = User::find()
            .filter(user::Column::EmployeeId.is_not_null())
            .all(db)
            .await?;

        Ok(employees
            .into_iter()
            .map(|(e, pos)| {
                let account = accounts.iter().find(|u| u.employee_id == Some(e.id));
                EmployeeOverview {
                    id: e.id,
                    first_name: e.first_name,
                    last_name: e.last_name,
                    document_id: e.document_id,
                    phone: e.phone,
                    position: pos.as_ref().map(|p| p.title.clone()).unwrap_or_default(),
                    salary: pos.map(|p| p.salary).unwrap_or_default(),
                    hired_at: e.hired_at,
                    username: account.map(|u| u.username.clone()),
                    active: account.map(|u| u.active).unwrap_or(false),
                }
            })
            .collect())
    }

    pub async fn get(db: &DatabaseConnection, id: i32) -> Result<employee::Model> {
        Employee::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("employee {id}")))
    }

    /// Creates the employee together with their login in one transaction.
    /// Username and initial password are derived from the name and document;
    /// a duplicate document or username aborts the whole thing.
    pub async fn create(db: &DatabaseConnection, input: NewEmployee) -> Result<CreatedEmployee> {
        if input.first_name.trim().is_empty()
            || input.last_name.trim().is_empty()
            || input.document_id.trim().is_empty()
        {
            return Err(ServiceError::InvalidInput(
                "first name, last name and document are required".to_owned(),
            ));
        }

        let username = format!(
            "{}{}",
            squash(&input.first_name),
            squash(&input.last_name)
        );
        let password = format!("{}.{}", squash(&input.last_name), input.document_id.trim());
        let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)
            .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))?;

        let created = db
            .transaction::<_, CreatedEmployee, ServiceError>(move |txn| {
                Box::pin(async move {
                    if Employee::find()
                        .filter(employee::Column::DocumentId.eq(input.document_id.trim()))
                        .one(txn)
                        .await?
                        .is_some()
                    {
                        return Err(ServiceError::Conflict(
                            "document is already registered".to_owned(),
                        ));
                    }
                    if Position::find_by_id(input.position_id)
                        .one(txn)
                        .await?
                        .is_none()
                    {
                        return Err(ServiceError::NotFound(format!(
                            "position {}",
                            input.position_id
                        )));
                    }
                    if User::find()
                        .filter(user::Column::Username.eq(username.as_str()))
                        .one(txn)
                        .await?
                        .is_some()
                    {
                        return Err(ServiceError::Conflict(format!(
                            "generated username {username} already exists"
                        )));
                    }

                    let vendor_role = Role::find()
                        .filter(role::Column::Name.eq(role::VENDOR))
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::Internal("vendor role is not seeded".to_owned())
                        })?;

                    let employee = employee::ActiveModel {
                        first_name: Set(input.first_name.trim().to_owned()),
                        last_name: Set(input.last_name.trim().to_owned()),
                        document_id: Set(input.document_id.trim().to_owned()),
                        phone: Set(input.phone),
                        position_id: Set(input.position_id),
                        hired_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    user::ActiveModel {
                        username: Set(username.clone()),
                        password_hash: Set(password_hash),
                        role_id: Set(vendor_role.id),
                        employee_id: Set(Some(employee.id)),
                        active: Set(true),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    Ok(CreatedEmployee {
                        employee_id: employee.id,
                        username,
                        password,
                    })
                })
            })
            .await
            .map_err(ServiceError::from)?;

        tracing::info!(employee_id = created.employee_id, "employee created");
        Ok(created)
    }

    pub async fn update(db: &DatabaseConnection, id: i32, input: NewEmployee) -> Result<()> {
        Self::get(db, id).await?;

        employee::ActiveModel {
            id: Set(id),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            document_id: Set(input.document_id),
            phone: Set(input.phone),
            position_id: Set(input.position_id),
            ..Default::default()
        }
        .update(db)
        .await?;

        Ok(())
    }

    /// Employees are never deleted; their login is switched off instead.
    pub async fn deactivate(db: &DatabaseConnection, id: i32) -> Result<()> {
        User::update_many()
            .col_expr(user::Column::Active, Expr::value(false))
            .filter(user::Column::EmployeeId.eq(id))
            .exec(db)
            .await?;

        Ok(())
    }

    pub async fn positions(db: &DatabaseConnection) -> Result<Vec<position::Model>> {
        Ok(Position::find()
            .order_by_asc(position::Column::Title)
            .all(db)
            .await?)
    }
}

/// "Juan Pablo" -> "juanpablo"
fn squash(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
