pub mod config;
pub mod fuel;
pub mod route;
pub mod surge;
