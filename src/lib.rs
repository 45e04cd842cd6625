pub mod api;
pub mod app;
pub mod config;
pub mod confirm;
pub mod contacts;
pub mod error;
pub mod export;
pub mod render;
pub mod state;
pub mod utils;

#[cfg(feature = "gui")]
pub mod ui;
