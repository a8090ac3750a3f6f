mod common;

use common::*;
use creamcart_service::sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use creamcart_service::{Inventory, LoadLine, ServiceError};
use entity::cart_inventory;

#[tokio::test]
async fn load_takes_stock_and_opens_rows() {
    let db = setup_db().await;
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

    assert_eq!(central_stock(&db, product.id).await, 60);

    let rows = Inventory::open_loads(&db, cart.id).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].qty_loaded, 40);
    assert_eq!(rows[0].qty_remaining, 40);
    assert!(rows[0].closed_at.is_none());
}

#[tokio::test]
async fn reload_closes_the_previous_period() {
    let db = setup_db().await;
    let product = seed_product(&db, "Vanilla", 100).await;
    let cart = seed_cart(&db, "CART-01").await;

    for qty in [30, 20] {
        Inventory::load_cart(
            &db,
            cart.id,
            vec![LoadLine {
                product_id: product.id,
                quantity: qty,
            }],
        )
        .await
        .unwrap();
    }

    // at most one open row per (cart, product)
    let open = Inventory::open_loads(&db, cart.id).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].qty_loaded, 20);

    let all = cart_inventory::Entity::find()
        .filter(cart_inventory::Column::CartId.eq(cart.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all.iter().filter(|r| r.closed_at.is_some()).count(), 1);

    // the first load's remainder is not returned by a reload
    assert_eq!(central_stock(&db, product.id).await, 50);
}

#[tokio::test]
async fn load_rejects_nonpositive_quantities() {
    let db = setup_db().await;
    let product = seed_product(&db, "Vanilla", 100).await;
    let cart = seed_cart(&db, "CART-01").await;

    let err = Inventory::load_cart(
        &db,
        cart.id,
        vec![LoadLine {
            product_id: product.id,
            quantity: 0,
        }],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(central_stock(&db, product.id).await, 100);
    assert!(Inventory::open_loads(&db, cart.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn load_cannot_exceed_central_stock() {
    let db = setup_db().await;
    let product = seed_product(&db, "Vanilla", 10).await;
    let cart = seed_cart(&db, "CART-01").await;

    let err = Inventory::load_cart(
        &db,
        cart.id,
        vec![LoadLine {
            product_id: product.id,
            quantity: 20,
        }],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientStock { .. }));
    assert_eq!(central_stock(&db, product.id).await, 10);
    assert!(Inventory::open_loads(&db, cart.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_line_rolls_back_the_whole_load() {
    let db = setup_db().await;
    let plenty = seed_product(&db, "Vanilla", 100).await;
    let scarce = seed_product(&db, "Mango", 5).await;
    let cart = seed_cart(&db, "CART-01").await;

    let err = Inventory::load_cart(
        &db,
        cart.id,
        vec![
            LoadLine {
                product_id: plenty.id,
                quantity: 40,
            },
            LoadLine {
                product_id: scarce.id,
                quantity: 10,
            },
        ],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientStock { product_id } if product_id == scarce.id));

    // the first line's decrement must have been undone
    assert_eq!(central_stock(&db, plenty.id).await, 100);
    assert_eq!(central_stock(&db, scarce.id).await, 5);
    assert!(Inventory::open_loads(&db, cart.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn load_unknown_product_is_not_found() {
    let db = setup_db().await;
    let cart = seed_cart(&db, "CART-01").await;

    let err = Inventory::load_cart(
        &db,
        cart.id,
        vec![LoadLine {
            product_id: 999,
            quantity: 5,
        }],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn load_unknown_cart_is_not_found() {
    let db = setup_db().await;
    let product = seed_product(&db, "Vanilla", 100).await;

    let err = Inventory::load_cart(
        &db,
        999,
        vec![LoadLine {
            product_id: product.id,
            quantity: 5,
        }],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn close_returns_exactly_the_remainder() {
    let db = setup_db().await;
    let product = seed_product(&db, "Vanilla", 100).await;
    let cart = seed_cart(&db, "CART-01").await;

    Inventory::load_cart(
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

    // no sales: closing restores central stock exactly
    Inventory::close_and_reconcile(&db, cart.id).await.unwrap();
    assert_eq!(central_stock(&db, product.id).await, 100);
    assert!(Inventory::open_loads(&db, cart.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn close_only_touches_the_one_cart() {
    let db = setup_db().await;
    let product = seed_product(&db, "Vanilla", 100).await;
    let cart_a = seed_cart(&db, "CART-01").await;
    let cart_b = seed_cart(&db, "CART-02").await;

    for cart_id in [cart_a.id, cart_b.id] {
        Inventory::load_cart(
            &db,
            cart_id,
            vec![LoadLine {
                product_id: product.id,
                quantity: 20,
            }],
        )
        .await
        .unwrap();
    }
    assert_eq!(central_stock(&db, product.id).await, 60);

    Inventory::close_and_reconcile(&db, cart_a.id).await.unwrap();

    assert_eq!(central_stock(&db, product.id).await, 80);
    assert_eq!(Inventory::open_loads(&db, cart_b.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn decrement_enforces_the_remaining_guard() {
    let db = setup_db().await;
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

    Inventory::decrement_on_sale(&db, cart.id, product.id, 30)
        .await
        .unwrap();

    let err = Inventory::decrement_on_sale(&db, cart.id, product.id, 30)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientStock { .. }));

    let rows = Inventory::open_loads(&db, cart.id).await.unwrap();
    assert_eq!(rows[0].qty_remaining, 10);
}

#[tokio::test]
async fn decrement_without_an_open_row_is_not_found() {
    let db = setup_db().await;
    let product = seed_product(&db, "Vanilla", 100).await;
    let cart = seed_cart(&db, "CART-01").await;

    let err = Inventory::decrement_on_sale(&db, cart.id, product.id, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
