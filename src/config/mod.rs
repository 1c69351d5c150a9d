//! Project configuration.
//!
//! # Architecture
//!
//! - [`schema`] - Struct definitions mapping to the YAML format, plus validation
//! - [`loader`] - File discovery and loading

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file};
pub use schema::{IntegrationConfig, PacktrainConfig};
