pub mod auth;
pub mod business_service;
pub mod product_service;
pub mod rbac_service;
pub mod stock_service;
pub mod user_service;
pub mod warehouse_service;

pub use auth::AuthService;
pub use business_service::BusinessService;
pub use product_service::ProductService;
pub use stock_service::WarehouseProductService;
pub use user_service::UserService;
pub use warehouse_service::WarehouseService;
