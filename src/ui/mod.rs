use std::time::Duration;

pub mod buttons;
pub mod embeds;
pub mod pagination;
pub mod reply;

pub use reply::Reply;

/// Accent color shared by every embed the bot sends.
pub const ACCENT_COLOR: u32 = 0x3498db;

/// Format a duration into a human-readable string (e.g., "3:45" or "1:23:45")
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Duration string for display, with a placeholder when the source
/// reported none.
pub fn format_duration_opt(duration: Option<Duration>) -> String {
    duration
        .map(format_duration)
        .unwrap_or_else(|| "?:??".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_duration(Duration::from_secs(225)), "3:45");
        assert_eq!(format_duration(Duration::from_secs(5025)), "1:23:45");
        assert_eq!(format_duration(Duration::from_secs(59)), "0:59");
    }

    #[test]
    fn missing_duration_gets_placeholder() {
        assert_eq!(format_duration_opt(None), "?:??");
    }
}
