use std::path::PathBuf;

use crate::types::Target;

/// Events broadcast by the target manager
#[derive(Debug, Clone)]
pub enum ManagerEvent {
    /// A call to `refresh_targets` finished
    RefreshComplete,

    /// The active target of `path` was changed explicitly
    NewActiveTarget {
        path: PathBuf,
        target: Option<Target>,
    },

    /// A target's trigger command was invoked through the host
    Trigger { command_name: String },
}

/// Number of events buffered per subscriber before old ones are dropped
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
