use chrono::Utc;
use entity::{prelude::*, role, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Serialize;

use crate::error::{Result, ServiceError};

/// A caller whose credentials checked out. This is what ends up inside the
/// bearer token.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub employee_id: Option<i32>,
    pub full_name: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == role::ADMIN
    }
}

pub struct Auth;

impl Auth {
    /// Resolves a username/password pair to a caller identity. Unknown
    /// usernames, inactive accounts and wrong passwords all collapse to the
    /// same `Unauthenticated` answer so the login form leaks nothing.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser> {
        let found = User::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::Active.eq(true))
            .find_also_related(role::Entity)
            .one(db)
            .await?;

        let (account, account_role) = match found {
            Some((account, Some(account_role))) => (account, account_role),
            _ => return Err(ServiceError::Unauthenticated),
        };

        let password_ok = bcrypt::verify(password, &account.password_hash)
            .map_err(|e| ServiceError::Internal(format!("password verification failed: {e}")))?;
        if !password_ok {
            return Err(ServiceError::Unauthenticated);
        }

        let full_name = match account.employee_id {
            Some(employee_id) => Employee::find_by_id(employee_id)
                .one(db)
                .await?
                .map(|e| e.full_name())
                .unwrap_or_else(|| account.username.clone()),
            None => "Administrator".to_owned(),
        };

        Ok(AuthenticatedUser {
            user_id: account.id,
            username: account.username,
            role: account_role.name,
            employee_id: account.employee_id,
            full_name,
        })
    }

    /// Startup bootstrap: makes sure an Admin login exists so a fresh
    /// deployment can be operated at all. Does nothing when the username is
    /// already taken.
    pub async fn ensure_admin_user(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<()> {
        if User::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?
            .is_some()
        {
            return Ok(());
        }

        let admin_role = Role::find()
            .filter(role::Column::Name.eq(role::ADMIN))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::Internal("admin role is not seeded".to_owned()))?;

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| ServiceError::Internal(format!("password hashing failed: {e}")))?;

        user::ActiveModel {
            username: Set(username.to_owned()),
            password_hash: Set(password_hash),
            role_id: Set(admin_role.id),
            employee_id: Set(None),
            active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(username, "admin user bootstrapped");
        Ok(())
    }
}
