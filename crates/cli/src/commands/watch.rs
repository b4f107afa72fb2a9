use anyhow::{Context, Result};
use buildium_core::{ManagerConfig, ManagerEvent};
use std::path::PathBuf;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use super::Session;
use crate::display::format_target_list;
use crate::utils::resolve_project_paths;

async fn print_targets(session: &Session) {
    for path in session.paths() {
        let targets = session.manager.get_targets(&path, false).await;
        let active = session.manager.get_active_target(&path).map(|t| t.name);
        print!("{}", format_target_list(&path, &targets, active.as_deref()));
    }
}

pub async fn watch_command(paths: &[PathBuf], config: ManagerConfig) -> Result<()> {
    let paths = resolve_project_paths(paths)?;
    let session = Session::start(paths, config);
    let mut events = session.manager.subscribe();

    session.manager.refresh_targets(None).await;
    // Drain the initial refresh; it is printed below
    while events.try_recv().is_ok() {}
    print_targets(&session).await;
    println!("👀 Watching for build file changes (Ctrl-C to stop)");

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                debug!("Interrupted, stopping watch");
                break;
            }
            event = events.recv() => match event {
                Ok(ManagerEvent::RefreshComplete) => {
                    println!("🔄 Targets refreshed");
                    print_targets(&session).await;
                }
                Ok(ManagerEvent::NewActiveTarget { path, target }) => {
                    let name = target.map(|t| t.name).unwrap_or_else(|| "none".to_string());
                    println!("▶ Active target at {}: {}", path.display(), name);
                }
                Ok(ManagerEvent::Trigger { command_name }) => {
                    println!("⚡ Triggered {}", command_name);
                }
                Err(RecvError::Lagged(skipped)) => warn!("Missed {} manager events", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    }

    Ok(())
}
