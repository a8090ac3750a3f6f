pub mod prelude;

pub mod cart;
pub mod cart_assignment;
pub mod cart_inventory;
pub mod client;
pub mod employee;
pub mod position;
pub mod product;
pub mod role;
pub mod sale;
pub mod sale_line;
pub mod user;
