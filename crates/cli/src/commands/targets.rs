use anyhow::Result;
use buildium_core::{ManagerConfig, Target};
use serde::Serialize;
use std::path::PathBuf;

use super::Session;
use crate::display::format_target_list;
use crate::utils::resolve_project_paths;

#[derive(Serialize)]
struct PathTargets {
    path: PathBuf,
    active: Option<String>,
    targets: Vec<Target>,
}

pub async fn targets_command(paths: &[PathBuf], json: bool, config: ManagerConfig) -> Result<()> {
    let paths = resolve_project_paths(paths)?;
    let session = Session::start(paths, config);
    session.manager.refresh_targets(None).await;

    let mut listing = Vec::new();
    for path in session.paths() {
        let targets = session.manager.get_targets(&path, false).await;
        let active = session.manager.get_active_target(&path).map(|t| t.name);
        listing.push(PathTargets {
            path,
            active,
            targets,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for entry in &listing {
            print!(
                "{}",
                format_target_list(&entry.path, &entry.targets, entry.active.as_deref())
            );
        }
    }

    Ok(())
}
