//! Widget configuration loading and validation.

pub mod config;
pub mod paths;
pub mod validate;

pub use config::{RemoteConfig, StorageConfig, SyncConfig, WidgetConfig};
pub use validate::validate_config;
