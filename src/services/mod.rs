pub mod auth_service;
pub mod category_service;
pub mod credentials;
pub mod revocation;
pub mod storage;
pub mod vehicle_service;
pub mod worker;
