//! CLI library for testing purposes

pub mod config;
pub mod validation;
pub mod view;

pub use config::{FileConfig, ServiceOverrides, resolve_service_config};
pub use validation::{ValidationContext, validate_context};
