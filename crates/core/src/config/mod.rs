//! Configuration management for buildium

mod settings;

// Re-export main types
pub use settings::{
    CONFIG_FILE_NAMES, DEFAULT_ADAPTER_TIMEOUT_SECS, DEFAULT_NAMESPACE, ManagerConfig,
};
