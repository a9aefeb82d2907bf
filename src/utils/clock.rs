use chrono::{Local, NaiveTime, Timelike};

/// Current local wall-clock time as `HH:MM`.
pub fn current_time_string() -> String {
    format_hour_minute(Local::now().time())
}

pub fn format_hour_minute(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
