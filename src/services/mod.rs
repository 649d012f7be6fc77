pub mod auth_service;
pub mod customer_service;
pub mod inventory_service;
pub mod order_service;
pub mod report_service;
pub mod system_service;
