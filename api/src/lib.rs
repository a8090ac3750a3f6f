mod auth;
mod error;
mod routes;

use std::env;

use creamcart_service::sea_orm::{Database, DatabaseConnection};
use creamcart_service::Auth;
use migration::{Migrator, MigratorTrait};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub use auth::{AdminUser, AuthConfig, AuthUser};
pub use error::{ApiError, ApiJson};

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub auth: AuthConfig,
}

#[tokio::main]
async fn start() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let secret = env::var("JWT_SECRET").expect("JWT_SECRET is not set in .env file");
    let server_url = format!("{host}:{port}");

    let conn = Database::connect(db_url)
        .await
        .expect("Database connection failed");
    Migrator::up(&conn, None).await?;

    // A fresh deployment has no logins at all; give it one.
    if let Ok(password) = env::var("ADMIN_PASSWORD") {
        let username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_owned());
        Auth::ensure_admin_user(&conn, &username, &password).await?;
    }

    let state = AppState {
        conn,
        auth: AuthConfig::new(secret),
    };

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    tracing::info!("listening on {server_url}");
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn main() {
    let result = start();

    if let Some(err) = result.err() {
        println!("Error: {err}");
    }
}
