use chrono::{DateTime, Local, Utc};

/// Get the current UTC time
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Function to format timestamp as readable date
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Convert UTC timestamp to local time string
pub fn utc_to_local(timestamp: &DateTime<Utc>) -> String {
    let local_time: DateTime<Local> = DateTime::from(*timestamp);
    local_time.format("%Y-%m-%d %H:%M:%S %Z").to_string()
}

/// Format a posting age in days to a human readable label
pub fn format_days_ago(days: u32) -> String {
    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=13 => "1 week ago".to_string(),
        14..=29 => format!("{} weeks ago", days / 7),
        30..=59 => "1 month ago".to_string(),
        _ => format!("{} months ago", days / 30),
    }
}
