use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub kind: String,
    pub central_stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_inventory::Entity")]
    CartInventory,
    #[sea_orm(has_many = "super::sale_line::Entity")]
    SaleLine,
}

impl Related<super::cart_inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartInventory.def()
    }
}

impl Related<super::sale_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleLine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
