pub mod file;

pub use file::{resolve_project_path, resolve_project_paths};
