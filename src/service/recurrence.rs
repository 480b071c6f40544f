use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use chrono_tz::Tz;

use crate::models::event::{Event, Frequency};

// Default look-ahead for the conflict, suggest, and optimize scans.
pub const SCAN_DAYS: i64 = 7;

// Hard cap on generated occurrences per event, so a rule without an end date
// cannot loop past the scan window's worth of instances.
const MAX_OCCURRENCES: usize = 366;

fn step(start: DateTime<Utc>, frequency: Frequency, interval: u32) -> Option<DateTime<Utc>> {
    match frequency {
        Frequency::Daily => start.checked_add_signed(Duration::days(interval as i64)),
        Frequency::Weekly => start.checked_add_signed(Duration::weeks(interval as i64)),
        Frequency::Monthly => start.checked_add_months(Months::new(interval)),
        Frequency::Yearly => start.checked_add_months(Months::new(interval * 12)),
    }
}

// Concrete instances of a recurring event inside [window_start, window_end).
// The first occurrence keeps the event's own id; later ones get an ordinal
// suffix so conflict keys stay stable across re-runs. Non-recurring events
// pass through when they intersect the window.
pub fn expand_occurrences(
    event: &Event,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<Event> {
    let intersects =
        |start: DateTime<Utc>, end: DateTime<Utc>| start < window_end && end > window_start;

    let Some(rule) = event.recurring.clone() else {
        if intersects(event.start_time, event.end_time) {
            return vec![event.clone()];
        }
        return Vec::new();
    };
    if rule.interval == 0 {
        return Vec::new();
    }

    let duration = event.end_time - event.start_time;
    let mut occurrences = Vec::new();
    let mut start = event.start_time;
    for ordinal in 0..MAX_OCCURRENCES {
        if start >= window_end {
            break;
        }
        if let Some(end_date) = rule.end_date {
            if start > end_date {
                break;
            }
        }
        let end = start + duration;
        if intersects(start, end) {
            let mut occurrence = event.clone();
            if ordinal > 0 {
                occurrence.id = format!("{}#{}", event.id, ordinal);
            }
            occurrence.start_time = start;
            occurrence.end_time = end;
            occurrence.recurring = None;
            occurrences.push(occurrence);
        }
        match step(start, rule.frequency, rule.interval) {
            Some(next) => start = next,
            None => break,
        }
    }
    occurrences
}

// Snapshot the analyzer consumes: every event expanded into the window.
pub fn expand_all(
    events: &[Event],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<Event> {
    events
        .iter()
        .flat_map(|e| expand_occurrences(e, window_start, window_end))
        .collect()
}

// Scan bounds anchored at the start of `now`'s day in `tz`, so events that
// already happened earlier today still land in the snapshot.
pub fn scan_window(tz: Tz, now: DateTime<Utc>, days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.with_timezone(&tz).date_naive();
    let start = tz
        .from_local_datetime(&today.and_hms_opt(0, 0, 0).unwrap())
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(now);
    (start, start + Duration::days(days))
}
