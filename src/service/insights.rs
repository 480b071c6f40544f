use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::models::event::{Event, Priority};
use crate::models::suggestion::{SuggestionDraft, SuggestionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    Focus,
    Meeting,
    Break,
    Optimization,
}

#[derive(Debug, Clone)]
pub struct Insight {
    pub kind: InsightKind,
    pub message: String,
    pub priority: Priority,
}

const BUFFER_MINUTES: i64 = 15;
const LONG_SESSION_MINUTES: i64 = 120;
const BUSY_MEETING_COUNT: usize = 4;

// Advisory findings over today's schedule: meeting density, missing buffers
// between adjacent events, and long uninterrupted work sessions.
pub fn productivity_insights(events: &[Event], now: DateTime<Utc>, tz: Tz) -> Vec<Insight> {
    let today = now.with_timezone(&tz).date_naive();
    let mut today_events: Vec<&Event> = events
        .iter()
        .filter(|e| e.start_time.with_timezone(&tz).date_naive() == today)
        .collect();
    today_events.sort_by_key(|e| e.start_time);

    let mut insights = Vec::new();

    let meetings = today_events
        .iter()
        .filter(|e| e.category == "Meeting")
        .count();
    if meetings > BUSY_MEETING_COUNT {
        insights.push(Insight {
            kind: InsightKind::Optimization,
            message: "You have many meetings today. Consider blocking focus time for deep work."
                .to_string(),
            priority: Priority::Medium,
        });
    }

    for pair in today_events.windows(2) {
        let gap = pair[1].start_time - pair[0].end_time;
        // A negative gap is an overlap; the conflict scan owns those, so
        // buffer advice only fires on genuinely tight but valid spacing.
        if gap >= Duration::zero() && gap < Duration::minutes(BUFFER_MINUTES) {
            insights.push(Insight {
                kind: InsightKind::Optimization,
                message: format!(
                    "Add buffer time between \"{}\" and \"{}\"",
                    pair[0].title, pair[1].title
                ),
                priority: Priority::High,
            });
        }
    }

    let has_long_session = today_events
        .iter()
        .any(|e| e.duration_minutes() > LONG_SESSION_MINUTES && e.category != "Meeting");
    if has_long_session {
        insights.push(Insight {
            kind: InsightKind::Break,
            message: "Consider adding short breaks during long work sessions for better focus"
                .to_string(),
            priority: Priority::Medium,
        });
    }

    insights
}

// Calendar-wide pattern advice, returned as suggestion drafts the caller can
// feed straight into the store.
pub fn pattern_suggestions(events: &[Event], tz: Tz) -> Vec<SuggestionDraft> {
    let mut suggestions = Vec::new();

    let work = events.iter().filter(|e| e.category == "Work").count();
    let personal = events.iter().filter(|e| e.category == "Personal").count();
    if work > personal * 2 && work > 0 {
        suggestions.push(SuggestionDraft::new(
            SuggestionType::Optimize,
            "Work-Life Balance Reminder",
            "Your calendar shows mostly work events. Consider adding personal time for better balance.",
            Priority::Medium,
        ));
    }

    let meetings: Vec<&Event> = events.iter().filter(|e| e.category == "Meeting").collect();
    if !meetings.is_empty() {
        let morning = meetings.iter().filter(|e| e.starts_in_morning(tz)).count();
        if (morning as f64) > (meetings.len() as f64) * 0.6 {
            suggestions.push(SuggestionDraft::new(
                SuggestionType::Optimize,
                "Meeting Time Optimization",
                "Most of your meetings are in the morning. Consider spreading them throughout the day for better focus.",
                Priority::Low,
            ));
        }
    }

    suggestions
}
