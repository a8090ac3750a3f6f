use entity::{client, prelude::*};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Deserialize;

use crate::error::{Result, ServiceError};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub struct Clients;

impl Clients {
    /// The POS captures clients by name only, so a client is identified by
    /// (first name, last name): an existing match is reused, otherwise a new
    /// record is created. Returns the client id either way.
    pub async fn find_or_create(db: &DatabaseConnection, input: ClientInput) -> Result<i32> {
        if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "first and last name are required".to_owned(),
            ));
        }

        if let Some(existing) = Client::find()
            .filter(client::Column::FirstName.eq(input.first_name.trim()))
            .filter(client::Column::LastName.eq(input.last_name.trim()))
            .one(db)
            .await?
        {
            return Ok(existing.id);
        }

        let created = client::ActiveModel {
            first_name: Set(input.first_name.trim().to_owned()),
            last_name: Set(input.last_name.trim().to_owned()),
            phone: Set(input.phone),
            address: Set(input.address),
            ..Default::default()
        }
        .insert(db)
        .await?;

        Ok(created.id)
    }
}
