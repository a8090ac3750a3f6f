#![allow(dead_code)]

use chrono::Utc;
use creamcart_service::sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, Set,
};
use entity::{
    cart, cart_assignment, cart_inventory, client, employee, position, product, role, sale,
    sale_line, user,
};
use rust_decimal::Decimal;

/// Fresh in-memory database with the full schema and the seeded roles.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    db.execute(backend.build(&schema.create_table_from_entity(role::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(position::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(employee::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(user::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(product::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(client::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(cart::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(cart_assignment::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(cart_inventory::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(sale::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(sale_line::Entity)))
        .await
        .unwrap();

    for name in [role::ADMIN, role::VENDOR] {
        role::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
    }

    db
}

pub async fn seed_position(db: &DatabaseConnection) -> position::Model {
    position::ActiveModel {
        title: Set("Vendor".to_owned()),
        salary: Set(Decimal::new(2500_00, 2)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_employee(
    db: &DatabaseConnection,
    first: &str,
    last: &str,
    document: &str,
) -> employee::Model {
    let position = seed_position(db).await;
    employee::ActiveModel {
        first_name: Set(first.to_owned()),
        last_name: Set(last.to_owned()),
        document_id: Set(document.to_owned()),
        phone: Set(None),
        position_id: Set(position.id),
        hired_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_product(db: &DatabaseConnection, name: &str, stock: i32) -> product::Model {
    product::ActiveModel {
        name: Set(name.to_owned()),
        description: Set(None),
        price: Set(Decimal::new(3_50, 2)),
        kind: Set("paleta".to_owned()),
        central_stock: Set(stock),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_cart(db: &DatabaseConnection, code: &str) -> cart::Model {
    cart::ActiveModel {
        code: Set(code.to_owned()),
        location: Set(Some("Plaza Central".to_owned())),
        status: Set(cart::CartStatus::Available),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_client(db: &DatabaseConnection) -> client::Model {
    client::ActiveModel {
        first_name: Set("Maria".to_owned()),
        last_name: Set("Lopez".to_owned()),
        phone: Set(None),
        address: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn central_stock(db: &DatabaseConnection, product_id: i32) -> i32 {
    product::Entity::find_by_id(product_id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .central_stock
}
