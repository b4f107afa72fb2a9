//! Resolving targets into printable command lines

pub mod expand;
pub mod resolved;

pub use expand::{PROJECT_PATH_PLACEHOLDER, expand};
pub use resolved::ResolvedCommand;
