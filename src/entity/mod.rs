pub mod customers;
pub mod inventory;
pub mod orders;
pub mod users;

pub use customers::Entity as Customers;
pub use inventory::Entity as Inventory;
pub use orders::Entity as Orders;
pub use users::Entity as Users;
