use buildium_core::{Notice, NoticeLevel, interfaces::NotificationSink};

/// Prints manager notices to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

pub fn format_notice(notice: &Notice) -> String {
    let icon = match notice.level {
        NoticeLevel::Info => "ℹ️ ",
        NoticeLevel::Warning => "⚠️ ",
        NoticeLevel::Error => "❌",
    };
    let mut out = format!("{} {}", icon, notice.title);
    for line in notice.detail.lines() {
        out.push_str("\n   ");
        out.push_str(line);
    }
    out
}

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", format_notice(&notice));
    }
}
