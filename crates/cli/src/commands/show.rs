use anyhow::{Result, anyhow};
use buildium_core::ManagerConfig;
use std::path::Path;
use tracing::debug;

use super::Session;
use crate::display::format_command_breakdown;
use crate::utils::resolve_project_path;

pub async fn show_command(path: &Path, target: Option<&str>, config: ManagerConfig) -> Result<()> {
    let path = resolve_project_path(path)?;
    let session = Session::start(vec![path.clone()], config);

    let targets = session.manager.get_targets(&path, true).await;
    debug!("Found {} targets at {}", targets.len(), path.display());

    let selected = match target {
        Some(name) => targets
            .into_iter()
            .find(|t| t.name == name)
            .ok_or_else(|| anyhow!("No target named {:?} at {}", name, path.display()))?,
        None => session
            .manager
            .get_active_target(&path)
            .ok_or_else(|| anyhow!("No build targets found at {}", path.display()))?,
    };

    let command = selected.resolve(&path);
    print!("{}", format_command_breakdown(&selected, &command));
    Ok(())
}
