pub mod api;
pub mod generate;
pub mod health;
pub mod index;
