use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::models::event::{Event, EventDraft, Priority, ValidationError};
use crate::models::suggestion::{AISuggestion, ConflictKey, SuggestionDraft, SuggestionType};

// Single source of truth for events and suggestions within a session.
// Insertion order is display order; nothing here sorts chronologically.
// Overlap detection is the analyzer's job, not the store's.
#[derive(Debug, Clone)]
pub struct CalendarStore {
    events: Vec<Event>,
    suggestions: Vec<AISuggestion>,
    bucketing_tz: Tz,
}

impl CalendarStore {
    pub fn new(bucketing_tz: Tz) -> Self {
        Self {
            events: Vec::new(),
            suggestions: Vec::new(),
            bucketing_tz,
        }
    }

    pub fn timezone(&self) -> Tz {
        self.bucketing_tz
    }

    pub fn add_event(&mut self, mut draft: EventDraft) -> Result<Event, ValidationError> {
        draft.validate()?;
        draft.normalize_all_day(self.bucketing_tz);
        let event = Event {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: draft.description,
            start_time: draft.start_time,
            end_time: draft.end_time,
            color: draft.color,
            category: draft.category,
            is_all_day: draft.is_all_day,
            location: draft.location,
            attendees: draft.attendees,
            priority: draft.priority,
            recurring: draft.recurring,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    // Full replacement by id. Returns false and leaves the collection
    // untouched when no event carries that id.
    pub fn update_event(&mut self, event: Event) -> bool {
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => {
                *slot = event;
                true
            }
            None => false,
        }
    }

    pub fn delete_event(&mut self, id: &str) -> bool {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        self.events.len() != before
    }

    pub fn add_suggestion(&mut self, draft: SuggestionDraft) -> AISuggestion {
        let suggestion = AISuggestion {
            id: Uuid::new_v4().to_string(),
            suggestion_type: draft.suggestion_type,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            conflict_key: draft.conflict_key,
            timestamp: Utc::now(),
        };
        self.suggestions.push(suggestion.clone());
        suggestion
    }

    pub fn remove_suggestion(&mut self, id: &str) -> bool {
        let before = self.suggestions.len();
        self.suggestions.retain(|s| s.id != id);
        self.suggestions.len() != before
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn suggestions(&self) -> &[AISuggestion] {
        &self.suggestions
    }

    // Events whose start falls on the given calendar day in the bucketing
    // timezone. Start-day attribution only: an event crossing midnight is
    // listed under the day it starts.
    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.start_time.with_timezone(&self.bucketing_tz).date_naive() == date)
            .cloned()
            .collect()
    }

    // Events whose start time lies within [start, end], inclusive on both ends.
    pub fn events_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| e.start_time >= start && e.start_time <= end)
            .cloned()
            .collect()
    }

    pub fn has_conflict_suggestion(&self, key: &ConflictKey) -> bool {
        self.suggestions
            .iter()
            .any(|s| s.conflict_key.as_ref() == Some(key))
    }
}

// Fixed example data a fresh session starts from. State is never persisted,
// so every process start goes through here.
pub fn seed_store(now: DateTime<Utc>, tz: Tz) -> CalendarStore {
    let mut store = CalendarStore::new(tz);
    let today = now.with_timezone(&tz).date_naive();
    let at = |hour: u32, minute: u32| -> DateTime<Utc> {
        tz.from_local_datetime(&today.and_hms_opt(hour, minute, 0).unwrap())
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&today.and_hms_opt(hour, minute, 0).unwrap()))
            .with_timezone(&Utc)
    };

    let seeds = [
        (
            "Team Standup",
            "Daily team sync meeting",
            at(9, 0),
            at(9, 30),
            "#3b82f6",
            "Meeting",
            Priority::High,
        ),
        (
            "Focus Time",
            "Deep work session - no interruptions",
            at(10, 0),
            at(12, 0),
            "#8b5cf6",
            "Work",
            Priority::High,
        ),
        (
            "Lunch with Sarah",
            "Discuss new collaboration opportunities",
            at(12, 0),
            at(13, 0),
            "#f59e0b",
            "Social",
            Priority::Low,
        ),
        (
            "Project Review",
            "Review Q4 project progress",
            at(14, 0),
            at(15, 30),
            "#10b981",
            "Work",
            Priority::Medium,
        ),
    ];
    for (title, description, start, end, color, category, priority) in seeds {
        let mut draft = EventDraft::new(title, start, end);
        draft.description = Some(description.to_string());
        draft.color = color.to_string();
        draft.category = category.to_string();
        draft.priority = priority;
        // Seed drafts are well-formed by construction.
        let _ = store.add_event(draft);
    }

    store.add_suggestion(SuggestionDraft::new(
        SuggestionType::Optimize,
        "Schedule Optimization Suggestion",
        "You have back-to-back sessions this morning. Consider adding a 15-minute break between them for better productivity.",
        Priority::Medium,
    ));
    store.add_suggestion(SuggestionDraft::new(
        SuggestionType::Schedule,
        "Smart Scheduling Tip",
        "Your focus time is scheduled during peak productivity hours (10 AM - 12 PM). This is optimal for deep work!",
        Priority::Low,
    ));

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::UTC;

    fn draft_at(title: &str, hour: u32, end_hour: u32) -> EventDraft {
        EventDraft::new(
            title,
            Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, end_hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn add_event_rejects_empty_title() {
        let mut store = CalendarStore::new(UTC);
        let err = store.add_event(draft_at("   ", 9, 10)).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTitle);
        assert!(store.events().is_empty());
    }

    #[test]
    fn add_event_rejects_end_before_start() {
        let mut store = CalendarStore::new(UTC);
        let err = store.add_event(draft_at("standup", 10, 9)).unwrap_err();
        assert_eq!(err, ValidationError::EndBeforeStart);
    }

    #[test]
    fn all_day_event_normalizes_to_day_boundaries() {
        let mut store = CalendarStore::new(UTC);
        let mut draft = draft_at("offsite", 14, 15);
        draft.is_all_day = true;
        let event = store.add_event(draft).unwrap();
        assert_eq!(
            event.start_time,
            Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
        );
        assert_eq!(
            event.end_time,
            Utc.with_ymd_and_hms(2026, 3, 2, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn all_day_normalization_survives_a_missing_midnight() {
        use chrono::Timelike;
        // Cuba springs forward at midnight; 2026-03-08 00:00 does not exist
        // in America/Havana, so the start bound lands on the next valid hour.
        let tz = chrono_tz::America::Havana;
        let mut store = CalendarStore::new(tz);
        let mut draft = EventDraft::new(
            "offsite",
            Utc.with_ymd_and_hms(2026, 3, 8, 17, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 8, 18, 0, 0).unwrap(),
        );
        draft.is_all_day = true;
        let event = store.add_event(draft).unwrap();
        let local_start = event.start_time.with_timezone(&tz);
        assert_eq!(
            local_start.date_naive(),
            NaiveDate::from_ymd_opt(2026, 3, 8).unwrap()
        );
        assert_eq!(local_start.hour(), 1);
        assert!(event.start_time < event.end_time);
    }

    #[test]
    fn seed_store_populates_events_and_suggestions() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        let store = seed_store(now, UTC);
        assert_eq!(store.events().len(), 4);
        assert_eq!(store.suggestions().len(), 2);
        assert_eq!(store.events_on(now.date_naive()).len(), 4);
    }
}
