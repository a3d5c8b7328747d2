pub mod auth;
pub mod categories;
pub mod form;
pub mod health;
pub mod vehicles;
