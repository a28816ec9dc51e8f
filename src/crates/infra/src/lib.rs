pub mod repository;

pub mod event_bus;

pub mod config;
pub use config::{AppConfigImpl, ReconcileConfig};
