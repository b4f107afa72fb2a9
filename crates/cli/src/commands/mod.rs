pub mod session;
pub mod show;
pub mod targets;
pub mod watch;

pub use session::{Session, load_config};
pub use show::show_command;
pub use targets::targets_command;
pub use watch::watch_command;
