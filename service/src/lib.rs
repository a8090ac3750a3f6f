pub mod assignments;
pub mod auth;
pub mod carts;
pub mod clients;
pub mod dashboard;
pub mod employees;
pub mod error;
pub mod inventory;
pub mod products;
pub mod sales;

pub use assignments::Assignments;
pub use auth::{Auth, AuthenticatedUser};
pub use carts::Carts;
pub use clients::Clients;
pub use dashboard::Dashboard;
pub use employees::Employees;
pub use error::{Result, ServiceError};
pub use inventory::{Inventory, LoadLine};
pub use products::Products;
pub use sales::{NewSale, SaleLineInput, Sales};

pub use sea_orm;
