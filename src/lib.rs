pub mod api;
pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod icons;
pub mod journey;
pub mod markdown;
pub mod models;
pub mod state;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Config;
pub use state::AppState;
