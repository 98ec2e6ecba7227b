use crate::error::{config_error, EditorResult};
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Utc, Weekday};

/// Step between selectable times of day, in minutes
pub const TIME_STEP_MINUTES: u32 = 15;

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Parse an HH:MM string into a time of day
pub fn parse_time_of_day(time_str: &str) -> Option<NaiveTime> {
    let (hour, minute) = parse_time(time_str)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Format a time of day as HH:MM
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Last selectable time of a day. Lets a shift end at the close of the day
/// without touching the next day's 00:00.
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

/// Every time of day a shift boundary may be set to: each quarter hour from
/// 00:00 to 23:45, then 23:59.
pub fn time_options() -> Vec<NaiveTime> {
    let steps_per_day = 24 * 60 / TIME_STEP_MINUTES;
    let mut options: Vec<NaiveTime> = (0..steps_per_day)
        .filter_map(|step| {
            let minutes = step * TIME_STEP_MINUTES;
            NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        })
        .collect();
    options.push(end_of_day());
    options
}

/// Check whether a time of day is one of the offered options
pub fn is_selectable_time(time: NaiveTime) -> bool {
    time == end_of_day()
        || (time.second() == 0 && time.minute() % TIME_STEP_MINUTES == 0 && time.nanosecond() == 0)
}

/// Parse an HH:MM string, accepting only offered options
pub fn parse_selectable_time(time_str: &str) -> Result<NaiveTime, String> {
    let time = parse_time_of_day(time_str)
        .ok_or_else(|| format!("'{}' is not a time in HH:MM format", time_str))?;

    if !is_selectable_time(time) {
        return Err(format!(
            "'{}' is not on a {} minute boundary (23:59 is also allowed)",
            time_str, TIME_STEP_MINUTES
        ));
    }

    Ok(time)
}

/// Date of the next occurrence of `weekday`, today included
pub fn next_weekday_date(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let days_until = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;

    today
        .checked_add_signed(Duration::days(days_until as i64))
        .unwrap_or(today)
}

/// Lowercase English weekday name used in API paths
pub fn weekday_slug(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Format a minute count as H:MM
pub fn format_minutes(total_minutes: i64) -> String {
    let sign = if total_minutes < 0 { "-" } else { "" };
    let total_minutes = total_minutes.abs();
    format!("{}{}:{:02}", sign, total_minutes / 60, total_minutes % 60)
}

/// Current calendar date in the given IANA timezone
pub fn today_in(timezone: &str) -> EditorResult<NaiveDate> {
    let tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| config_error(&format!("Unknown timezone: {}", timezone)))?;

    Ok(Utc::now().with_timezone(&tz).date_naive())
}

/// Serde adapter storing a time of day as an HH:MM string
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid time of day: {}", raw)))
    }
}
