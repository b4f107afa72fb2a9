//! Built-in tool providers

pub mod cargo;
pub mod custom_file;

pub use cargo::CargoProvider;
pub use custom_file::{BUILD_FILE_NAMES, CustomFileProvider};

use crate::interfaces::{ToolFactory, tool_factory};

/// The providers registered by default, highest priority first
pub fn default_tools() -> Vec<ToolFactory> {
    vec![
        tool_factory(CustomFileProvider::new),
        tool_factory(CargoProvider::new),
    ]
}
