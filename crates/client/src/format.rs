//! Display formatting for timers, durations and timestamps.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use matreshka_shared::Server;

/// `HH:MM:SS` for the connection timer. Hours are not wrapped at 24.
pub fn clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Short duration: `45с`, `12м`, `1ч 5м`.
pub fn duration(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}с");
    }
    if seconds < 3600 {
        return format!("{}м", seconds / 60);
    }
    format!("{}ч {}м", seconds / 3600, (seconds % 3600) / 60)
}

/// `dd.mm.yyyy, HH:MM` in the local time zone.
///
/// Unparseable input is returned as is.
pub fn date(timestamp: &str) -> String {
    date_in(timestamp, &Local)
}

pub fn date_in<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match parse_timestamp(timestamp) {
        Some(utc) => utc.with_timezone(tz).format("%d.%m.%Y, %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

/// RFC 3339, or a naive ISO 8601 timestamp taken as UTC.
fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    let timestamp = timestamp.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Dashboard server label: the connected server wins over the selection.
pub fn server_tile(connected: Option<&Server>, selected: Option<&Server>) -> Option<String> {
    connected
        .or(selected)
        .map(|s| format!("{} {}", s.flag, s.name))
}
