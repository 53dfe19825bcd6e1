pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod render;
pub mod routes;
pub mod seed;
pub mod sessions;
pub mod storage;
pub mod user_models;
pub mod user_storage;

pub use routes::{app, AppState};
