use buildium_core::Target;
use std::fmt::Write;
use std::path::Path;

/// Render the targets of one project path, marking the active one
pub fn format_target_list(path: &Path, targets: &[Target], active: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📁 {}", path.display());

    if targets.is_empty() {
        let _ = writeln!(out, "   (no build targets)");
        return out;
    }

    for target in targets {
        let marker = if Some(target.name.as_str()) == active {
            "▶"
        } else {
            " "
        };
        let _ = write!(out, "   {} {}", marker, target.name);
        if let Some(keymap) = &target.keymap {
            let _ = write!(out, "  [{}]", keymap);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildium_core::{RawSetting, targets::normalize};

    #[test]
    fn test_active_target_is_marked() {
        let path = Path::new("/p");
        let targets = vec![
            normalize(path, &RawSetting::new("build", "make").with_keymap("ctrl-b")),
            normalize(path, &RawSetting::new("test", "make")),
        ];

        let out = format_target_list(path, &targets, Some("test"));

        assert_eq!(out, "📁 /p\n     build  [ctrl-b]\n   ▶ test\n");
    }

    #[test]
    fn test_empty_listing() {
        let out = format_target_list(Path::new("/p"), &[], None);
        assert_eq!(out, "📁 /p\n   (no build targets)\n");
    }
}
