use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use std::sync::LazyLock;

/// Earliest timestamp accepted from a filename: 1990-01-01 00:00:00 local.
///
/// Anything older is treated as a corrupt or degenerate capture (all-zero
/// fields, small epoch values taken from unrelated counters).
pub static MIN_VALID_TIMESTAMP: LazyLock<NaiveDateTime> = LazyLock::new(|| {
    NaiveDate::from_ymd_opt(1990, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
});

/// Pick the first real instant a local wall-clock reading can mean.
///
/// A reading repeated by a DST fall-back yields the earlier of its two
/// instants whatever order the zone reports them in. A reading skipped by a
/// DST gap has no instant.
pub fn earliest_instant<Tz: TimeZone>(resolved: LocalResult<DateTime<Tz>>) -> Option<DateTime<Tz>> {
    match resolved {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(a, b) => Some(if a <= b { a } else { b }),
        LocalResult::None => None,
    }
}

/// Resolve a wall-clock reading in the local time zone.
pub fn resolve_local(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    earliest_instant(Local.from_local_datetime(&naive))
}

/// Closed range of plausible capture instants for one extraction run.
///
/// The upper bound is captured once, so every file of a batch is judged
/// against the same "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityWindow {
    min: DateTime<Local>,
    max: DateTime<Local>,
}

impl ValidityWindow {
    /// Window ending at the current time.
    pub fn now() -> Self {
        Self::new(Local::now())
    }

    /// Window ending at `max`, for batch runs with an injected clock.
    pub fn new(max: DateTime<Local>) -> Self {
        let floor = *MIN_VALID_TIMESTAMP;
        // No zone skips midnight of 1990-01-01; UTC is only a fallback.
        let min = resolve_local(floor).unwrap_or_else(|| Local.from_utc_datetime(&floor));
        Self { min, max }
    }

    pub fn min(&self) -> DateTime<Local> {
        self.min
    }

    /// The captured "now" (`MAX_VALID_TIMESTAMP` of this run).
    pub fn max(&self) -> DateTime<Local> {
        self.max
    }

    pub fn contains(&self, ts: DateTime<Local>) -> bool {
        self.min <= ts && ts <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap();
        resolve_local(naive).unwrap()
    }

    #[test]
    fn test_lower_bound_is_inclusive() {
        let window = ValidityWindow::new(at(2024, 6, 1, 12, 0, 0));
        let floor = resolve_local(*MIN_VALID_TIMESTAMP).unwrap();
        assert_eq!(window.min(), floor);
        assert!(window.contains(floor));
        assert!(!window.contains(floor - Duration::seconds(1)));
        assert!(!window.contains(floor - Duration::milliseconds(1)));
    }

    #[test]
    fn test_upper_bound_is_inclusive() {
        let now = at(2024, 6, 1, 12, 0, 0);
        let window = ValidityWindow::new(now);
        assert!(window.contains(now));
        assert!(!window.contains(now + Duration::seconds(1)));
        assert!(!window.contains(now + Duration::milliseconds(1)));
    }

    #[test]
    fn test_now_window_rejects_far_future() {
        let window = ValidityWindow::now();
        assert!(window.contains(at(2018, 11, 28, 11, 7, 55)));
        assert!(!window.contains(at(2100, 1, 1, 0, 0, 0)));
        assert_eq!(window.min().naive_local(), *MIN_VALID_TIMESTAMP);
    }

    #[test]
    fn test_repeated_hour_resolves_to_earlier_instant() {
        // 2019-11-03 01:30 happens twice in New York: first at -04:00, then at -05:00.
        let edt = FixedOffset::west_opt(4 * 3600).unwrap();
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let wall = NaiveDate::from_ymd_opt(2019, 11, 3)
            .unwrap()
            .and_hms_opt(1, 30, 0)
            .unwrap();
        let first = edt.from_local_datetime(&wall).unwrap();
        let second = est.from_local_datetime(&wall).unwrap();
        assert_eq!(first.timestamp(), 1572759000);

        let expected = Some(first);
        assert_eq!(earliest_instant(LocalResult::Ambiguous(second, first)), expected);
        assert_eq!(earliest_instant(LocalResult::Ambiguous(first, second)), expected);
    }

    #[test]
    fn test_skipped_hour_has_no_instant() {
        assert_eq!(earliest_instant::<FixedOffset>(LocalResult::None), None);
    }
}
