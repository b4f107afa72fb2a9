pub mod setting;
pub mod target;

// Re-export commonly used types
pub use setting::{BuildHooks, PostBuildHook, PreBuildHook, RawSetting};
pub use target::{DEFAULT_KILL_SIGNALS, Target};
