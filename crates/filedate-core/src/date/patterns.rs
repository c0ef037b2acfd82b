use chrono::{DateTime, Local, NaiveDate};
use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::validate::resolve_local;

/// A filename convention: a shape test plus the rule that turns its captures
/// into an instant. Wall-clock fields are read in the local time zone, epoch
/// values keep their exact instant.
///
/// Every named group of `regex` is echoed into the explanation of an accepted
/// match, so groups should hold the literal raw fields.
pub struct DatePattern {
    pub label: &'static str,
    regex: &'static LazyLock<Regex>,
    parse: fn(&Captures) -> Option<DateTime<Local>>,
}

impl DatePattern {
    /// Leftmost structural match of this pattern, if any.
    pub fn captures<'h>(&self, filename: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(filename)
    }

    /// Build the timestamp from a structural match. `None` when the captured
    /// fields do not form a real calendar date/time, or name a local time
    /// skipped by a DST change.
    pub fn parse(&self, caps: &Captures) -> Option<DateTime<Local>> {
        (self.parse)(caps)
    }

    /// `label: name=value ...` for every named group that participated.
    pub fn explain(&self, caps: &Captures) -> String {
        let fields: Vec<String> = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| caps.name(name).map(|m| format!("{}={}", name, m.as_str())))
            .collect();
        format!("{}: {}", self.label, fields.join(" "))
    }
}

static RE_DEVICE_MS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z])(?P<prefix>IMG|VID|PXL|MVIMG|PANO|BURST)_(?P<date>\d{8})_(?P<time>\d{6})(?P<millis>\d{3})(?:\D|$)").unwrap()
});
static RE_CAMERA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(?P<date>\d{8})_(?P<time>\d{6})").unwrap());
static RE_MESSAGING_EXPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(?P<date>\d{4}-\d{2}-\d{2})(?: at | )(?P<time>\d{2}[.:]\d{2}[.:]\d{2})(?:\D|$)").unwrap()
});
static RE_SCREEN_CAPTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(?P<date>\d{4}-\d{2}-\d{2})[-_ ](?P<time>\d{2}-?\d{2}-?\d{2})(?:\D|$)").unwrap()
});
static RE_APP_SHORT_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<app>[A-Za-z][\w.]*)_(?P<date>\d{2}-\d{2}-\d{2})_(?P<time>\d{2}-\d{2}-\d{2})-(?P<millis>\d{3})(?:\D|$)").unwrap()
});
static RE_DOCUMENT_SCAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(?P<date>\d{2}-\d{2}-\d{4}) (?P<time>\d{2}\.\d{2})(?:_(?P<copy>\d+))?(?:\D|$)").unwrap()
});
static RE_DASHED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\D)(?P<date>\d{4}-\d{2}-\d{2})(?:\D|$)").unwrap());
static RE_TIMESTAMP_UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<epoch>\d{13})-(?P<uuid>[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12})(?:[^0-9A-Fa-f]|$)").unwrap()
});
static RE_EPOCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:FB_IMG_|IMG_)(?P<prefixed>\d{9,13})(?:[._]|$)",
        r"|^(?P<standalone>\d{9,13})\.(?i:jpg|jpeg|png|mp4|mov|gif|bmp|tif|tiff|webm|avi|mkv)$",
        r"|^(?P<leading>\d{13})[-_.]",
    ))
    .unwrap()
});
static RE_SCREENSHOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Screenshot_(?P<date>\d{8})-(?P<time>\d{6})(?:_(?P<app>[^.]+))?").unwrap()
});
static RE_MESSAGING_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<kind>IMG|VID|AUD|PTT|DOC|STK)-(?P<date>\d{8})-WA(?P<seq>\d+)").unwrap()
});

/// All recognizers, most specific first. The first one whose captures parse
/// into a timestamp inside the validity window wins.
pub static PATTERNS: &[DatePattern] = &[
    DatePattern { label: "device-datetime-ms", regex: &RE_DEVICE_MS, parse: parse_compact_millis },
    DatePattern { label: "camera-datetime", regex: &RE_CAMERA, parse: parse_compact },
    DatePattern { label: "messaging-export", regex: &RE_MESSAGING_EXPORT, parse: parse_dashed_datetime },
    DatePattern { label: "screen-capture", regex: &RE_SCREEN_CAPTURE, parse: parse_dashed_datetime },
    DatePattern { label: "app-export-short-year", regex: &RE_APP_SHORT_YEAR, parse: parse_short_year },
    DatePattern { label: "document-scan", regex: &RE_DOCUMENT_SCAN, parse: parse_us_date_minutes },
    DatePattern { label: "dashed-date", regex: &RE_DASHED_DATE, parse: parse_dashed_date },
    DatePattern { label: "timestamp-uuid", regex: &RE_TIMESTAMP_UUID, parse: parse_epoch },
    DatePattern { label: "epoch", regex: &RE_EPOCH, parse: parse_epoch },
    DatePattern { label: "screenshot", regex: &RE_SCREENSHOT, parse: parse_compact },
    DatePattern { label: "messaging-id", regex: &RE_MESSAGING_ID, parse: parse_compact },
];

/// Look a recognizer up by label.
pub fn pattern(label: &str) -> Option<&'static DatePattern> {
    PATTERNS.iter().find(|p| p.label == label)
}

fn timestamp(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> Option<DateTime<Local>> {
    resolve_local(NaiveDate::from_ymd_opt(y, mo, d)?.and_hms_milli_opt(h, mi, s, ms)?)
}

/// Parse a fixed-width run of ASCII digits. Separators must be stripped first.
fn num<T: std::str::FromStr>(digits: &str) -> Option<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// `YYYYMMDD` + optional `HHMMSS` (midnight when the group is absent).
fn compact(date: &str, time: Option<&str>, ms: u32) -> Option<DateTime<Local>> {
    if date.len() != 8 {
        return None;
    }
    let time = time.unwrap_or("000000");
    if time.len() != 6 {
        return None;
    }
    timestamp(
        num(&date[0..4])?,
        num(&date[4..6])?,
        num(&date[6..8])?,
        num(&time[0..2])?,
        num(&time[2..4])?,
        num(&time[4..6])?,
        ms,
    )
}

fn parse_compact(caps: &Captures) -> Option<DateTime<Local>> {
    compact(&caps["date"], caps.name("time").map(|m| m.as_str()), 0)
}

fn parse_compact_millis(caps: &Captures) -> Option<DateTime<Local>> {
    compact(&caps["date"], Some(&caps["time"]), num(&caps["millis"])?)
}

fn parse_dashed_datetime(caps: &Captures) -> Option<DateTime<Local>> {
    compact(&digits_only(&caps["date"]), Some(digits_only(&caps["time"]).as_str()), 0)
}

fn parse_dashed_date(caps: &Captures) -> Option<DateTime<Local>> {
    compact(&digits_only(&caps["date"]), None, 0)
}

/// `YY-MM-DD` with `HH-MM-SS-mmm`; two-digit years are 20YY.
fn parse_short_year(caps: &Captures) -> Option<DateTime<Local>> {
    let date = digits_only(&caps["date"]);
    let time = digits_only(&caps["time"]);
    if date.len() != 6 || time.len() != 6 {
        return None;
    }
    let year: i32 = num(&date[0..2])?;
    timestamp(
        2000 + year,
        num(&date[2..4])?,
        num(&date[4..6])?,
        num(&time[0..2])?,
        num(&time[2..4])?,
        num(&time[4..6])?,
        num(&caps["millis"])?,
    )
}

/// `MM-DD-YYYY HH.MM`. The `_n` copy counter only tells duplicate captures
/// of the same minute apart and does not move the time.
fn parse_us_date_minutes(caps: &Captures) -> Option<DateTime<Local>> {
    let date = digits_only(&caps["date"]);
    let time = digits_only(&caps["time"]);
    if date.len() != 8 || time.len() != 4 {
        return None;
    }
    timestamp(
        num(&date[4..8])?,
        num(&date[0..2])?,
        num(&date[2..4])?,
        num(&time[0..2])?,
        num(&time[2..4])?,
        0,
        0,
    )
}

/// Epoch value in whichever group matched: 13 digits are milliseconds, 9-10
/// digits are seconds, 11-12 digits are not a timestamp.
fn parse_epoch(caps: &Captures) -> Option<DateTime<Local>> {
    let raw = ["epoch", "prefixed", "standalone", "leading"]
        .iter()
        .find_map(|name| caps.name(name))?
        .as_str();
    let value: i64 = num(raw)?;
    let utc = match raw.len() {
        13 => DateTime::from_timestamp_millis(value)?,
        9 | 10 => DateTime::from_timestamp(value, 0)?,
        _ => return None,
    };
    Some(utc.with_timezone(&Local))
}
