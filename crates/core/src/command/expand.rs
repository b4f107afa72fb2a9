//! Placeholder expansion for target commands

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\w+)").expect("Invalid env var regex"));

/// Placeholder replaced by the project path
pub const PROJECT_PATH_PLACEHOLDER: &str = "{PROJECT_PATH}";

/// Expand `$NAME` references and the `{PROJECT_PATH}` placeholder
///
/// Variables resolve against `env` first, then the process environment.
/// Unknown variables are left verbatim.
pub fn expand(value: &str, env: &BTreeMap<String, String>, project_path: &Path) -> String {
    let expanded = ENV_VAR_REGEX.replace_all(value, |caps: &Captures<'_>| {
        let name = &caps[1];
        env.get(name)
            .cloned()
            .or_else(|| std::env::var(name).ok())
            .unwrap_or_else(|| caps[0].to_string())
    });

    expanded.replace(
        PROJECT_PATH_PLACEHOLDER,
        &project_path.to_string_lossy(),
    )
}
