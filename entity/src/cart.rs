use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A mobile vending unit. Status is only ever changed by the assignment and
/// close operations in the service layer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub location: Option<String>,
    pub status: CartStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CartStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Active")]
    Active,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_assignment::Entity")]
    CartAssignment,
    #[sea_orm(has_many = "super::cart_inventory::Entity")]
    CartInventory,
    #[sea_orm(has_many = "super::sale::Entity")]
    Sale,
}

impl Related<super::cart_assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartAssignment.def()
    }
}

impl Related<super::cart_inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartInventory.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
