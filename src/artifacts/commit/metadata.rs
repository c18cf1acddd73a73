//! Free-text commit metadata: `--author` and `--date` values

use crate::artifacts::core::errors::RepoError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

const AUTHOR_REGEX: &str = r"^\s*([^<>]+?)\s*<([^<>\s]+)>\s*$";

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse `Name <email>`; anything else is an invalid argument
pub fn parse_author(author: &str) -> anyhow::Result<(String, String)> {
    let re = regex::Regex::new(AUTHOR_REGEX)?;
    let caps = re.captures(author).ok_or_else(|| {
        RepoError::invalid_argument(format!(
            "Author not formatted correctly. Use 'Name <author@example.com>' format: {author}"
        ))
    })?;

    Ok((caps[1].to_string(), caps[2].to_string()))
}

/// Parse a commit date.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD HH:MM:SS ±hhmm`, and zone-less
/// `YYYY-MM-DD[ HH:MM[:SS]]` which is read as UTC. `/` and `.` are accepted
/// as date separators.
pub fn parse_date(date: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let trimmed = date.trim();
    let invalid = || RepoError::invalid_argument(format!("invalid date: {date}"));

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(parsed);
    }

    let normalized = normalize_separators(trimmed);
    if let Ok(parsed) = DateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S %z") {
        return Ok(parsed);
    }

    let utc = FixedOffset::east_opt(0).ok_or_else(invalid)?;
    for format in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return naive.and_local_timezone(utc).single().ok_or_else(|| invalid().into());
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
        return day
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| naive.and_local_timezone(utc).single())
            .ok_or_else(|| invalid().into());
    }

    Err(invalid().into())
}

/// Rewrite `2024/01/02` and `2024.01.02` as `2024-01-02`
fn normalize_separators(date: &str) -> String {
    match date.split_once(' ').or_else(|| date.split_once('T')) {
        Some((day, rest)) => {
            let separator = &date[day.len()..day.len() + 1];
            format!("{}{}{}", day.replace(['/', '.'], "-"), separator, rest)
        }
        None => date.replace(['/', '.'], "-"),
    }
}
