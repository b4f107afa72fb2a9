//! Turning provider settings into targets
//!
//! Settings reported by providers go through three steps before they are
//! stored: defaults are applied ([`normalize`]), names are made unique
//! ([`deduplicate`]), and keymapped targets get a trigger command
//! ([`synthesize_command_names`]).

pub mod dedupe;
pub mod normalize;

pub use dedupe::deduplicate;
pub use normalize::{normalize, synthesize_command_names, trigger_command_name};

use std::path::Path;

use crate::types::{RawSetting, Target};

/// Run the full settings-to-targets pipeline for one project path
pub fn resolve_targets(cwd: &Path, namespace: &str, settings: &[RawSetting]) -> Vec<Target> {
    let normalized = settings.iter().map(|s| normalize(cwd, s)).collect();
    let mut targets = deduplicate(normalized);
    synthesize_command_names(namespace, &mut targets);
    targets
}
