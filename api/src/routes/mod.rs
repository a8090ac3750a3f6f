mod auth;
mod carts;
mod clients;
mod dashboard;
mod employees;
mod products;
mod sales;

use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth::router())
        .nest("/api/carts", carts::router())
        .nest("/api/clients", clients::router())
        .nest("/api/dashboard", dashboard::router())
        .nest("/api/employees", employees::router())
        .nest("/api/products", products::router())
        .nest("/api/sales", sales::router())
}
