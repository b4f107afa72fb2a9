pub mod command_breakdown;
pub mod formatter;
pub mod notices;

pub use command_breakdown::format_command_breakdown;
pub use formatter::format_target_list;
pub use notices::ConsoleNotifier;
