use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::event::Event;
use crate::models::settings::WorkingHours;
use crate::models::suggestion::ConflictKey;

// Pure functions over event snapshots. Nothing here holds onto the store;
// callers pass a slice and get derived data back.

#[derive(Debug, Clone)]
pub struct ConflictPair {
    pub first: Event,
    pub second: Event,
    pub key: ConflictKey,
}

#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    pub has_conflict: bool,
    pub pairs: Vec<ConflictPair>,
}

// Strict half-open overlap. Touching boundaries (a ends exactly when b
// starts) do not conflict.
pub fn overlaps(a: &Event, b: &Event) -> bool {
    a.start_time < b.end_time && b.start_time < a.end_time
}

// Every unordered pair once, compared on raw intervals. No day bucketing
// here, so an event spanning midnight is checked against both days' events.
pub fn find_conflicts(events: &[Event]) -> ConflictReport {
    let mut pairs = Vec::new();
    for i in 0..events.len() {
        for j in (i + 1)..events.len() {
            if overlaps(&events[i], &events[j]) {
                pairs.push(ConflictPair {
                    first: events[i].clone(),
                    second: events[j].clone(),
                    key: ConflictKey::new(&events[i].id, &events[j].id),
                });
            }
        }
    }
    ConflictReport {
        has_conflict: !pairs.is_empty(),
        pairs,
    }
}

#[derive(Debug, Clone)]
pub struct SlotSuggestion {
    pub suggested_time: DateTime<Utc>,
    pub reason: String,
    pub confidence: f64,
}

const MIN_GAP_MINUTES: i64 = 60;

// Largest free gap between chronologically adjacent events on the target day.
// Target day is today in `tz`, or tomorrow once `now` is past the end of
// working hours. Gaps before the first and after the last event of the day
// are not considered; with no qualifying gap the suggestion defaults to the
// start of working hours.
pub fn suggest_slot(
    events: &[Event],
    working_hours: WorkingHours,
    now: DateTime<Utc>,
    tz: Tz,
) -> SlotSuggestion {
    let local_now = now.with_timezone(&tz);
    let mut target_day = local_now.date_naive();
    if local_now.hour() >= working_hours.end_hour {
        target_day = target_day.succ_opt().unwrap_or(target_day);
    }

    let day_start = tz
        .from_local_datetime(
            &target_day
                .and_hms_opt(working_hours.start_hour, 0, 0)
                .unwrap_or_else(|| target_day.and_hms_opt(0, 0, 0).unwrap()),
        )
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(now);

    let mut day_events: Vec<&Event> = events
        .iter()
        .filter(|e| e.start_time.with_timezone(&tz).date_naive() == target_day)
        .collect();
    day_events.sort_by_key(|e| e.start_time);

    let mut best_time = day_start;
    let mut best_gap = Duration::zero();
    for pair in day_events.windows(2) {
        let gap = pair[1].start_time - pair[0].end_time;
        if gap >= Duration::minutes(MIN_GAP_MINUTES) && gap > best_gap {
            best_gap = gap;
            best_time = pair[0].end_time;
        }
    }

    if best_gap > Duration::zero() {
        SlotSuggestion {
            suggested_time: best_time,
            reason: format!(
                "Found optimal {} hour gap in your schedule",
                best_gap.num_hours()
            ),
            confidence: 0.9,
        }
    } else {
        SlotSuggestion {
            suggested_time: day_start,
            reason: "Scheduled at start of working hours for maximum productivity".to_string(),
            confidence: 0.7,
        }
    }
}
