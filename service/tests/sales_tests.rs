mod common;

use common::*;
use creamcart_service::clients::ClientInput;
use creamcart_service::sea_orm::{ActiveModelTrait, EntityTrait, Set};
use creamcart_service::{
    Carts, Clients, Dashboard, Inventory, LoadLine, NewSale, Products, SaleLineInput, Sales,
    ServiceError,
};
use entity::{client, product, sale, sale_line};
use rust_decimal::Decimal;

fn line(product_id: i32, quantity: i32) -> SaleLineInput {
    SaleLineInput {
        product_id,
        quantity,
        unit_price: Decimal::new(3_50, 2),
    }
}

#[tokio::test]
async fn a_full_day_cycle_accounts_for_every_unit() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let client = seed_client(&db).await;
    let product = seed_product(&db, "Vanilla", 100).await;
    let cart = seed_cart(&db, "CART-01").await;

    Carts::assign_cart(&db, cart.id, employee.id).await.unwrap();
    Carts::load_inventory(
        &db,
        cart.id,
        vec![LoadLine {
            product_id: product.id,
            quantity: 50,
        }],
    )
    .await
    .unwrap();
    assert_eq!(central_stock(&db, product.id).await, 50);

    let sale_id = Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: employee.id,
            cart_id: Some(cart.id),
            items: vec![line(product.id, 10)],
        },
    )
    .await
    .unwrap();

    let remaining = Inventory::open_loads(&db, cart.id).await.unwrap();
    assert_eq!(remaining[0].qty_remaining, 40);

    Carts::close_cart(&db, cart.id).await.unwrap();

    // 100 initial - 10 sold
    assert_eq!(central_stock(&db, product.id).await, 90);

    let lines = sale_line::Entity::find().all(&db).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].sale_id, sale_id);
    assert_eq!(lines[0].quantity, 10);
}

#[tokio::test]
async fn an_empty_sale_is_rejected_before_anything_is_written() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let client = seed_client(&db).await;

    let err = Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: employee.id,
            cart_id: None,
            items: vec![],
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert!(sale::Entity::find().all(&db).await.unwrap().is_empty());
    assert!(sale_line::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn competing_sales_cannot_both_drain_the_same_stock() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let client = seed_client(&db).await;
    let product = seed_product(&db, "Vanilla", 100).await;
    let cart = seed_cart(&db, "CART-01").await;

    Inventory::load_cart(
        &db,
        cart.id,
        vec![LoadLine {
            product_id: product.id,
            quantity: 40,
        }],
    )
    .await
    .unwrap();

    let first = Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: employee.id,
            cart_id: Some(cart.id),
            items: vec![line(product.id, 30)],
        },
    )
    .await;
    assert!(first.is_ok());

    // the second request sees the updated remainder, not the stale 40
    let second = Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: employee.id,
            cart_id: Some(cart.id),
            items: vec![line(product.id, 30)],
        },
    )
    .await;
    assert!(matches!(
        second.unwrap_err(),
        ServiceError::InsufficientStock { .. }
    ));

    let rows = Inventory::open_loads(&db, cart.id).await.unwrap();
    assert_eq!(rows[0].qty_remaining, 10);
    assert_eq!(sale::Entity::find().all(&db).await.unwrap().len(), 1);
    assert_eq!(sale_line::Entity::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn one_bad_line_rolls_back_the_whole_sale() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let client = seed_client(&db).await;
    let loaded = seed_product(&db, "Vanilla", 100).await;
    let unloaded = seed_product(&db, "Mango", 100).await;
    let cart = seed_cart(&db, "CART-01").await;

    Inventory::load_cart(
        &db,
        cart.id,
        vec![LoadLine {
            product_id: loaded.id,
            quantity: 50,
        }],
    )
    .await
    .unwrap();

    // second line has no open ledger row on this cart
    let err = Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: employee.id,
            cart_id: Some(cart.id),
            items: vec![line(loaded.id, 10), line(unloaded.id, 5)],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    assert!(sale::Entity::find().all(&db).await.unwrap().is_empty());
    assert!(sale_line::Entity::find().all(&db).await.unwrap().is_empty());

    // the good line's decrement was undone with it
    let rows = Inventory::open_loads(&db, cart.id).await.unwrap();
    assert_eq!(rows[0].qty_remaining, 50);
}

#[tokio::test]
async fn a_sale_outside_the_cart_flow_leaves_inventory_alone() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let client = seed_client(&db).await;
    let product = seed_product(&db, "Vanilla", 100).await;

    Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: employee.id,
            cart_id: None,
            items: vec![line(product.id, 3)],
        },
    )
    .await
    .unwrap();

    assert_eq!(central_stock(&db, product.id).await, 100);
    assert_eq!(sale::Entity::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_references_fail_before_any_write() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let client = seed_client(&db).await;
    let product = seed_product(&db, "Vanilla", 100).await;

    let err = Sales::record_sale(
        &db,
        NewSale {
            client_id: 999,
            employee_id: employee.id,
            cart_id: None,
            items: vec![line(product.id, 1)],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: 999,
            cart_id: None,
            items: vec![line(product.id, 1)],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    assert!(sale::Entity::find().all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn line_prices_are_snapshots() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let client = seed_client(&db).await;
    let product = seed_product(&db, "Vanilla", 100).await;

    Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: employee.id,
            cart_id: None,
            items: vec![line(product.id, 2)],
        },
    )
    .await
    .unwrap();

    // a later price change must not rewrite history
    product::ActiveModel {
        id: Set(product.id),
        price: Set(Decimal::new(9_99, 2)),
        ..Default::default()
    }
    .update(&db)
    .await
    .unwrap();

    let lines = sale_line::Entity::find().all(&db).await.unwrap();
    assert_eq!(lines[0].unit_price, Decimal::new(3_50, 2));
}

#[tokio::test]
async fn vendors_see_only_their_open_cart_stock() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let product = seed_product(&db, "Vanilla", 100).await;
    let cart = seed_cart(&db, "CART-01").await;

    assert!(Products::my_inventory(&db, employee.id)
        .await
        .unwrap()
        .is_empty());

    Carts::assign_cart(&db, cart.id, employee.id).await.unwrap();
    Carts::load_inventory(
        &db,
        cart.id,
        vec![LoadLine {
            product_id: product.id,
            quantity: 25,
        }],
    )
    .await
    .unwrap();

    let stock = Products::my_inventory(&db, employee.id).await.unwrap();
    assert_eq!(stock.len(), 1);
    assert_eq!(stock[0].stock, 25);

    Carts::close_cart(&db, cart.id).await.unwrap();
    assert!(Products::my_inventory(&db, employee.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn day_views_compute_totals_from_the_lines() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let client = seed_client(&db).await;
    let product = seed_product(&db, "Vanilla", 100).await;

    let sale_id = Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: employee.id,
            cart_id: None,
            items: vec![line(product.id, 4)],
        },
    )
    .await
    .unwrap();

    let today = Sales::sales_for_employee_today(&db, employee.id)
        .await
        .unwrap();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].id, sale_id);
    assert_eq!(today[0].client, "Maria Lopez");
    assert_eq!(today[0].total, Decimal::new(14_00, 2));

    let detail = Sales::sale_detail(&db, sale_id).await.unwrap();
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0].product, "Vanilla");
    assert_eq!(detail[0].subtotal, Decimal::new(14_00, 2));

    let err = Sales::sale_detail(&db, 999).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn repeat_clients_are_reused_not_duplicated() {
    let db = setup_db().await;

    let input = ClientInput {
        first_name: "Maria".to_owned(),
        last_name: "Lopez".to_owned(),
        phone: None,
        address: None,
    };

    let first = Clients::find_or_create(&db, input.clone()).await.unwrap();
    let second = Clients::find_or_create(&db, input).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(client::Entity::find().all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn the_dashboard_reflects_the_day() {
    let db = setup_db().await;
    let employee = seed_employee(&db, "Juan", "Arnez", "12446261").await;
    let client = seed_client(&db).await;
    let product = seed_product(&db, "Vanilla", 100).await;
    let cart = seed_cart(&db, "CART-01").await;

    Carts::assign_cart(&db, cart.id, employee.id).await.unwrap();
    Carts::load_inventory(
        &db,
        cart.id,
        vec![LoadLine {
            product_id: product.id,
            quantity: 20,
        }],
    )
    .await
    .unwrap();
    Sales::record_sale(
        &db,
        NewSale {
            client_id: client.id,
            employee_id: employee.id,
            cart_id: Some(cart.id),
            items: vec![line(product.id, 5)],
        },
    )
    .await
    .unwrap();

    let stats = Dashboard::stats(&db).await.unwrap();
    assert_eq!(stats.active_carts, 1);
    assert_eq!(stats.sales_today, 1);
    assert_eq!(stats.revenue_today, Decimal::new(17_50, 2));
    assert_eq!(stats.products, 1);

    let recent = Dashboard::recent_sales(&db).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].cart_code.as_deref(), Some("CART-01"));
    assert_eq!(recent[0].total, Decimal::new(17_50, 2));

    let on_route = Dashboard::active_carts(&db).await.unwrap();
    assert_eq!(on_route.len(), 1);
    assert_eq!(on_route[0].employee.as_deref(), Some("Juan Arnez"));

    Carts::close_cart(&db, cart.id).await.unwrap();
    let stats = Dashboard::stats(&db).await.unwrap();
    assert_eq!(stats.active_carts, 0);
}
