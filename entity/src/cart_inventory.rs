use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quantity of one product carried by one cart during a loading period.
/// `qty_remaining` starts equal to `qty_loaded` and is decremented by sales;
/// the invariant 0 <= qty_remaining <= qty_loaded holds at all times. A null
/// `closed_at` marks the row as the live ledger entry for its (cart, product)
/// pair; at most one open row may exist per pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub qty_loaded: i32,
    pub qty_remaining: i32,
    pub loaded_at: DateTimeUtc,
    pub closed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cart::Entity",
        from = "Column::CartId",
        to = "super::cart::Column::Id"
    )]
    Cart,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::cart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
