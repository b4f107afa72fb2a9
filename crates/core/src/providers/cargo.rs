//! Provider offering the usual cargo commands for a Rust project

use async_trait::async_trait;
use cargo_toml::Manifest;
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    interfaces::ToolAdapter,
    types::RawSetting,
};

const MANIFEST_FILE: &str = "Cargo.toml";

/// Matches rustc diagnostics of the form `error[E0308]: ... --> src/main.rs:4:5`
pub const CARGO_ERROR_MATCH: &str =
    r"(?<message>error(\[E\d+\])?: .+)\n\s+--> (?<file>[^:\n]+):(?<line>\d+):(?<col>\d+)";

pub const CARGO_WARNING_MATCH: &str =
    r"(?<message>warning: .+)\n\s+--> (?<file>[^:\n]+):(?<line>\d+):(?<col>\d+)";

pub struct CargoProvider {
    cwd: PathBuf,
}

impl CargoProvider {
    pub fn new(cwd: &Path) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
        }
    }

    fn manifest_path(&self) -> PathBuf {
        self.cwd.join(MANIFEST_FILE)
    }

    fn setting(&self, label: &str, args: Vec<String>) -> RawSetting {
        let mut setting = RawSetting::new(format!("Cargo: {label}"), "cargo")
            .with_args(args)
            .with_sh(false);
        setting.error_match = Some(CARGO_ERROR_MATCH.to_string());
        setting.warning_match = Some(CARGO_WARNING_MATCH.to_string());
        setting
    }
}

#[async_trait]
impl ToolAdapter for CargoProvider {
    fn nice_name(&self) -> String {
        "Cargo".to_string()
    }

    fn is_eligible(&self) -> bool {
        self.manifest_path().is_file()
    }

    async fn settings(&self) -> Result<Vec<RawSetting>> {
        let manifest_path = self.manifest_path();
        let contents = tokio::fs::read(&manifest_path).await?;
        let manifest = Manifest::from_slice(&contents)
            .map_err(|e| Error::syntax(&manifest_path, e.to_string()))?;

        // A virtual manifest only builds through its members
        let scope: Vec<String> = if manifest.package.is_none() && manifest.workspace.is_some() {
            vec!["--workspace".to_string()]
        } else {
            Vec::new()
        };

        let mut settings: Vec<RawSetting> = ["build", "test", "check"]
            .into_iter()
            .map(|subcommand| {
                let mut args = vec![subcommand.to_string()];
                args.extend(scope.iter().cloned());
                self.setting(subcommand, args)
            })
            .collect();

        let bins: Vec<String> = manifest
            .bin
            .iter()
            .filter_map(|product| product.name.clone())
            .collect();

        if !bins.is_empty() {
            for bin in bins {
                let args = vec!["run".to_string(), "--bin".to_string(), bin.clone()];
                settings.push(self.setting(&format!("run {bin}"), args));
            }
        } else if manifest.package.is_some() && self.cwd.join("src").join("main.rs").is_file() {
            settings.push(self.setting("run", vec!["run".to_string()]));
        }

        tracing::debug!("Cargo manifest {:?} yields {} settings", manifest_path, settings.len());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(settings: &[RawSetting]) -> Vec<&str> {
        settings.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_eligible_only_with_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let provider = CargoProvider::new(temp_dir.path());
        assert!(!provider.is_eligible());

        fs::write(temp_dir.path().join("Cargo.toml"), "[package]\nname = \"demo\"").unwrap();
        assert!(provider.is_eligible());
    }

    #[tokio::test]
    async fn test_package_with_main() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("Cargo.toml"),
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        fs::create_dir(temp_dir.path().join("src")).unwrap();
        fs::write(temp_dir.path().join("src").join("main.rs"), "fn main() {}").unwrap();

        let settings = CargoProvider::new(temp_dir.path()).settings().await.unwrap();

        assert_eq!(&names(&settings)[..3], &["Cargo: build", "Cargo: test", "Cargo: check"]);
        assert!(names(&settings).iter().any(|n| n.starts_with("Cargo: run")));
        assert!(settings.iter().all(|s| s.exec == "cargo" && s.sh == Some(false)));
    }

    #[tokio::test]
    async fn test_explicit_bins() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("Cargo.toml"),
            r#"[package]
name = "demo"
version = "0.1.0"

[[bin]]
name = "server"
path = "src/server.rs"

[[bin]]
name = "client"
path = "src/client.rs"
"#,
        )
        .unwrap();

        let settings = CargoProvider::new(temp_dir.path()).settings().await.unwrap();
        let names = names(&settings);

        assert!(names.contains(&"Cargo: run server"));
        assert!(names.contains(&"Cargo: run client"));
        let server = settings.iter().find(|s| s.name == "Cargo: run server").unwrap();
        assert_eq!(
            server.args.as_deref(),
            Some(&["run".to_string(), "--bin".to_string(), "server".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_virtual_workspace_scopes_to_members() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("Cargo.toml"),
            "[workspace]\nmembers = [\"a\", \"b\"]\n",
        )
        .unwrap();

        let settings = CargoProvider::new(temp_dir.path()).settings().await.unwrap();

        assert_eq!(names(&settings), vec!["Cargo: build", "Cargo: test", "Cargo: check"]);
        assert_eq!(
            settings[0].args.as_deref(),
            Some(&["build".to_string(), "--workspace".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_broken_manifest_is_syntax_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Cargo.toml"), "[package\nname = ").unwrap();

        let err = CargoProvider::new(temp_dir.path())
            .settings()
            .await
            .unwrap_err();
        assert!(err.is_syntax_error());
    }
}
