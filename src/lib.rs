pub mod api;
pub mod characters;
pub mod config;
pub mod error;
pub mod format;
pub mod http_client;
pub mod lookups;
pub mod model;
pub mod provider;
pub mod route;
pub mod stamp;
pub mod state;
pub mod views;
