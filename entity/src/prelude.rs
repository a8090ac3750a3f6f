pub use super::cart::Entity as Cart;
pub use super::cart_assignment::Entity as CartAssignment;
pub use super::cart_inventory::Entity as CartInventory;
pub use super::client::Entity as Client;
pub use super::employee::Entity as Employee;
pub use super::position::Entity as Position;
pub use super::product::Entity as Product;
pub use super::role::Entity as Role;
pub use super::sale::Entity as Sale;
pub use super::sale_line::Entity as SaleLine;
pub use super::user::Entity as User;
