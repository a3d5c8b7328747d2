pub mod prelude;

pub mod categories;
pub mod users;
pub mod vehicles;
