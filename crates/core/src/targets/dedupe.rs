use std::collections::HashSet;

use crate::types::Target;

/// Make target names unique, preserving order
///
/// The first target carrying a name keeps it. Every later collision is renamed
/// to `"<name> - k"` with the smallest `k >= 1` not already taken by a target
/// placed before it.
pub fn deduplicate(targets: Vec<Target>) -> Vec<Target> {
    let mut taken: HashSet<String> = HashSet::with_capacity(targets.len());
    let mut unique = Vec::with_capacity(targets.len());

    for mut target in targets {
        let mut candidate = target.name.clone();
        let mut index = 0;
        while taken.contains(&candidate) {
            index += 1;
            candidate = format!("{} - {}", target.name, index);
        }

        if candidate != target.name {
            tracing::debug!("Renamed duplicate target {:?} to {:?}", target.name, candidate);
            target.name = candidate.clone();
        }

        taken.insert(candidate);
        unique.push(target);
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targets::normalize;
    use crate::types::RawSetting;
    use std::path::Path;

    fn targets(names: &[&str]) -> Vec<Target> {
        names
            .iter()
            .map(|name| normalize(Path::new("/p"), &RawSetting::new(*name, "make")))
            .collect()
    }

    fn names(targets: &[Target]) -> Vec<&str> {
        targets.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_no_collisions_untouched() {
        let result = deduplicate(targets(&["build", "test", "lint"]));
        assert_eq!(names(&result), vec!["build", "test", "lint"]);
    }

    #[test]
    fn test_collisions_get_increasing_suffix() {
        let result = deduplicate(targets(&["build", "build", "test", "build"]));
        assert_eq!(names(&result), vec!["build", "build - 1", "test", "build - 2"]);
    }

    #[test]
    fn test_suffix_skips_names_already_taken() {
        let result = deduplicate(targets(&["a - 1", "a", "a"]));
        assert_eq!(names(&result), vec!["a - 1", "a", "a - 2"]);
    }

    #[test]
    fn test_result_names_unique_and_first_kept() {
        let input = ["x", "y", "x", "x - 1", "y", "x"];
        let result = deduplicate(targets(&input));

        let unique: HashSet<&str> = names(&result).into_iter().collect();
        assert_eq!(unique.len(), input.len());
        assert_eq!(result[0].name, "x");
        assert_eq!(result[1].name, "y");
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate(Vec::new()).is_empty());
    }
}
