//! buildium-core - Build target bookkeeping for multi-project workspaces
//!
//! This crate provides functionality to:
//! - Ask pluggable tool providers which builds they offer for each project path
//! - Normalize, de-duplicate and order the reported settings into targets
//! - Track the active target per path and keep it valid across refreshes
//! - Register trigger commands and keybindings with the embedding host
pub mod command;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod manager;
pub mod providers;
pub mod targets;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use command::{ResolvedCommand, expand};
pub use config::ManagerConfig;
pub use interfaces::{
    AdapterCapabilities, HostContext, MemoryHost, Notice, NoticeLevel, ToolAdapter, ToolFactory,
    tool_factory,
};
pub use manager::{ManagerEvent, PathTargetStore, TargetManager};
pub use providers::default_tools;
