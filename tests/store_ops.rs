use calendarBot::models::event::EventDraft;
use calendarBot::models::suggestion::{SuggestionDraft, SuggestionType};
use calendarBot::models::event::Priority;
use calendarBot::store::CalendarStore;
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::UTC;

fn draft(title: &str, day: u32, hour: u32) -> EventDraft {
    EventDraft::new(
        title,
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, day, hour + 1, 0, 0).unwrap(),
    )
}

#[test]
fn added_event_appears_on_its_start_day() {
    let mut store = CalendarStore::new(UTC);
    let event = store.add_event(draft("standup", 2, 9)).unwrap();

    let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let events = store.events_on(day);
    assert!(events.iter().any(|e| e.id == event.id));

    let other_day = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
    assert!(store.events_on(other_day).is_empty());
}

#[test]
fn cross_midnight_event_is_attributed_to_start_day_only() {
    let mut store = CalendarStore::new(UTC);
    let mut d = draft("late shift", 2, 22);
    d.end_time = Utc.with_ymd_and_hms(2026, 3, 3, 2, 0, 0).unwrap();
    store.add_event(d).unwrap();

    assert_eq!(store.events_on(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()).len(), 1);
    assert!(store.events_on(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()).is_empty());
}

#[test]
fn delete_event_is_idempotent() {
    let mut store = CalendarStore::new(UTC);
    let event = store.add_event(draft("standup", 2, 9)).unwrap();

    assert!(store.delete_event(&event.id));
    assert!(store.events().iter().all(|e| e.id != event.id));

    // Second delete is a no-op, not an error.
    assert!(!store.delete_event(&event.id));
    assert!(store.events().is_empty());
}

#[test]
fn update_with_unknown_id_leaves_collection_unchanged() {
    let mut store = CalendarStore::new(UTC);
    store.add_event(draft("standup", 2, 9)).unwrap();
    let before = store.events().to_vec();

    let mut ghost = before[0].clone();
    ghost.id = "no-such-id".to_string();
    ghost.title = "ghost".to_string();
    assert!(!store.update_event(ghost));

    assert_eq!(store.events(), before.as_slice());
}

#[test]
fn update_replaces_matching_event_in_place() {
    let mut store = CalendarStore::new(UTC);
    let first = store.add_event(draft("standup", 2, 9)).unwrap();
    store.add_event(draft("review", 2, 14)).unwrap();

    let mut updated = first.clone();
    updated.title = "daily standup".to_string();
    assert!(store.update_event(updated));

    assert_eq!(store.events().len(), 2);
    assert_eq!(store.events()[0].title, "daily standup");
    assert_eq!(store.events()[0].id, first.id);
}

#[test]
fn suggestion_list_grows_and_shrinks_by_one() {
    let mut store = CalendarStore::new(UTC);
    let added = store.add_suggestion(SuggestionDraft::new(
        SuggestionType::Reminder,
        "Heads up",
        "Standup moved earlier this week.",
        Priority::Low,
    ));
    assert_eq!(store.suggestions().len(), 1);

    assert!(!store.remove_suggestion("absent-id"));
    assert_eq!(store.suggestions().len(), 1);

    assert!(store.remove_suggestion(&added.id));
    assert!(store.suggestions().is_empty());
}

#[test]
fn events_in_range_is_inclusive_on_both_ends() {
    let mut store = CalendarStore::new(UTC);
    let inside = store.add_event(draft("inside", 2, 9)).unwrap();
    store.add_event(draft("after", 5, 9)).unwrap();

    let start = inside.start_time;
    let end = Utc.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap();
    let events = store.events_in_range(start, end);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, inside.id);
}
