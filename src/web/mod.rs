pub mod app;
pub mod routes;
pub mod templates;

pub use app::{build_app, serve, AppState};
