use chrono::{DateTime, Duration, Utc};

use crate::models::event::Event;
use crate::models::settings::{AiFeatures, CalendarSettings};
use crate::models::suggestion::{SuggestionDraft, SuggestionType};
use crate::service::analyzer::{self, ConflictReport, SlotSuggestion};
use crate::service::insights;
use crate::service::recurrence;
use crate::service::routing::{self, Intent, IntentRouter};
use crate::store::CalendarStore;

const GREETING: &str = "Hello! I'm your calendar assistant. I can help you schedule events, find optimal times, and optimize your calendar. Try something like \"Schedule a meeting with John tomorrow at 2 PM\" or \"Find free time for a focus session\".";

const HELP_TEXT: &str = "I can help you with many calendar tasks! Here are some examples:\n\n\
    - \"Schedule a meeting with John tomorrow at 2 PM\"\n\
    - \"Find free time for a 2-hour focus session\"\n\
    - \"Check for scheduling conflicts this week\"\n\
    - \"Optimize my schedule for better productivity\"\n\n\
    What would you like to do?";

const FALLBACK_TEXT: &str = "I understand you're asking about your calendar. I can help you schedule events, find optimal times, check for conflicts, and optimize your schedule. Could you be more specific about what you'd like me to help with?";

const SMART_SCHEDULING_OFF_TEXT: &str = "Smart scheduling is turned off in your preferences, so I can't search for time slots right now. You can still add events directly.";

const CONFLICT_DETECTION_OFF_TEXT: &str = "Conflict detection is turned off in your preferences, so I didn't scan your calendar for overlaps.";

const OPTIMIZATION_OFF_TEXT: &str = "Optimization suggestions are turned off in your preferences, so I left your schedule as it is.";

#[derive(Debug, Clone)]
pub enum AssistantAction {
    CreateEvent(Event),
    SuggestTime(SlotSuggestion),
    ShowConflicts(ConflictReport),
    OptimizeSchedule,
}

#[derive(Debug, Clone)]
pub struct AssistantReply {
    pub content: String,
    pub action: Option<AssistantAction>,
}

impl AssistantReply {
    fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            action: None,
        }
    }
}

// Swappable response strategy. The rule-based one below is the only
// implementation; a real backend can replace it without touching the store
// or analyzer contracts.
pub trait AssistantResponder: Send + Sync {
    fn respond(
        &self,
        text: &str,
        store: &mut CalendarStore,
        settings: &CalendarSettings,
        now: DateTime<Utc>,
    ) -> AssistantReply;

    fn greeting(&self) -> &str {
        GREETING
    }
}

pub struct RuleBasedAssistant {
    router: Box<dyn IntentRouter>,
    features: AiFeatures,
}

impl Default for RuleBasedAssistant {
    fn default() -> Self {
        Self {
            router: Box::new(routing::HeuristicRouter),
            features: AiFeatures::default(),
        }
    }
}

impl RuleBasedAssistant {
    pub fn new(router: Box<dyn IntentRouter>) -> Self {
        Self {
            router,
            features: AiFeatures::default(),
        }
    }

    pub fn with_features(mut self, features: AiFeatures) -> Self {
        self.features = features;
        self
    }

    fn scan_window(
        &self,
        settings: &CalendarSettings,
        now: DateTime<Utc>,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        recurrence::scan_window(settings.timezone, now, recurrence::SCAN_DAYS)
    }

    fn handle_schedule(
        &self,
        text: &str,
        store: &mut CalendarStore,
        settings: &CalendarSettings,
        now: DateTime<Utc>,
    ) -> AssistantReply {
        let Some(title) = routing::title_before_time_tokens(text) else {
            return AssistantReply::text(FALLBACK_TEXT);
        };

        let (window_start, window_end) = self.scan_window(settings, now);
        let snapshot = recurrence::expand_all(store.events(), window_start, window_end);
        let slot = analyzer::suggest_slot(
            &snapshot,
            settings.working_hours,
            now,
            settings.timezone,
        );

        let mut draft = crate::models::event::EventDraft::new(
            &title,
            slot.suggested_time,
            slot.suggested_time + Duration::minutes(settings.default_event_duration_minutes),
        );
        if let Some(category) = routing::category_from_keywords(text) {
            draft.category = category.to_string();
        }
        let event = match store.add_event(draft) {
            Ok(event) => event,
            Err(err) => {
                return AssistantReply::text(format!("I couldn't create that event: {}", err));
            }
        };

        store.add_suggestion(SuggestionDraft::new(
            SuggestionType::Schedule,
            "Event Created Successfully",
            &format!(
                "I've scheduled \"{}\" for you. The event has been added to your calendar.",
                event.title
            ),
            crate::models::event::Priority::Medium,
        ));

        let content = format!(
            "Perfect! I've scheduled \"{}\" for {}. Would you like me to adjust the time or add any details?",
            event.title,
            format_local(event.start_time, settings),
        );
        AssistantReply {
            content,
            action: Some(AssistantAction::CreateEvent(event)),
        }
    }

    fn handle_free_time(
        &self,
        store: &CalendarStore,
        settings: &CalendarSettings,
        now: DateTime<Utc>,
    ) -> AssistantReply {
        let (window_start, window_end) = self.scan_window(settings, now);
        let snapshot = recurrence::expand_all(store.events(), window_start, window_end);
        let slot = analyzer::suggest_slot(
            &snapshot,
            settings.working_hours,
            now,
            settings.timezone,
        );
        let content = format!(
            "I found some optimal time slots for you! {}. The best time would be {}. Would you like me to schedule something there?",
            slot.reason,
            format_local(slot.suggested_time, settings),
        );
        AssistantReply {
            content,
            action: Some(AssistantAction::SuggestTime(slot)),
        }
    }

    fn handle_conflicts(
        &self,
        store: &mut CalendarStore,
        settings: &CalendarSettings,
        now: DateTime<Utc>,
    ) -> AssistantReply {
        let (window_start, window_end) = self.scan_window(settings, now);
        let snapshot = recurrence::expand_all(store.events(), window_start, window_end);
        let report = analyzer::find_conflicts(&snapshot);

        if !report.has_conflict {
            return AssistantReply::text(
                "Great news! I don't see any scheduling conflicts in your calendar right now. Your schedule looks well-organized!",
            );
        }

        for pair in &report.pairs {
            if store.has_conflict_suggestion(&pair.key) {
                continue;
            }
            let draft = SuggestionDraft::new(
                SuggestionType::Conflict,
                "Scheduling Conflict Detected",
                &format!(
                    "\"{}\" overlaps with \"{}\". Consider rescheduling one of them.",
                    pair.first.title, pair.second.title
                ),
                crate::models::event::Priority::High,
            )
            .with_conflict_key(pair.key.clone());
            store.add_suggestion(draft);
        }

        let content = format!(
            "I found {} scheduling conflict{} in your calendar. Consider rescheduling one of the conflicting events. Would you like me to help you resolve them?",
            report.pairs.len(),
            if report.pairs.len() == 1 { "" } else { "s" },
        );
        AssistantReply {
            content,
            action: Some(AssistantAction::ShowConflicts(report)),
        }
    }

    fn handle_optimize(
        &self,
        store: &mut CalendarStore,
        settings: &CalendarSettings,
        now: DateTime<Utc>,
    ) -> AssistantReply {
        let (window_start, window_end) = self.scan_window(settings, now);
        let snapshot = recurrence::expand_all(store.events(), window_start, window_end);

        let mut drafts: Vec<SuggestionDraft> = insights::productivity_insights(
            &snapshot,
            now,
            settings.timezone,
        )
        .into_iter()
        .map(|insight| {
            SuggestionDraft::new(
                SuggestionType::Optimize,
                "Schedule Optimization Suggestion",
                &insight.message,
                insight.priority,
            )
        })
        .collect();
        drafts.extend(insights::pattern_suggestions(&snapshot, settings.timezone));

        let mut added = 0;
        let mut top_message = None;
        for draft in drafts {
            if top_message.is_none() {
                top_message = Some(draft.description.clone());
            }
            let already_present = store
                .suggestions()
                .iter()
                .any(|s| s.suggestion_type == draft.suggestion_type && s.description == draft.description);
            if !already_present {
                store.add_suggestion(draft);
                added += 1;
            }
        }

        let content = match top_message {
            Some(message) => format!(
                "I looked over your schedule and found {} new suggestion{}. Top finding: {}",
                added,
                if added == 1 { "" } else { "s" },
                message,
            ),
            None => "Your schedule already looks well-balanced. I don't have any optimization suggestions right now.".to_string(),
        };
        AssistantReply {
            content,
            action: Some(AssistantAction::OptimizeSchedule),
        }
    }
}

fn format_local(time: DateTime<Utc>, settings: &CalendarSettings) -> String {
    time.with_timezone(&settings.timezone)
        .format("%b %-d, %-I:%M %p")
        .to_string()
}

impl AssistantResponder for RuleBasedAssistant {
    fn respond(
        &self,
        text: &str,
        store: &mut CalendarStore,
        settings: &CalendarSettings,
        now: DateTime<Utc>,
    ) -> AssistantReply {
        let result = self.router.route(text);
        match result.intent {
            Intent::Schedule => {
                self.handle_schedule(&result.normalized_text, store, settings, now)
            }
            Intent::FreeTime => {
                if !self.features.smart_scheduling {
                    return AssistantReply::text(SMART_SCHEDULING_OFF_TEXT);
                }
                self.handle_free_time(store, settings, now)
            }
            Intent::Conflicts => {
                if !self.features.conflict_detection {
                    return AssistantReply::text(CONFLICT_DETECTION_OFF_TEXT);
                }
                self.handle_conflicts(store, settings, now)
            }
            Intent::Optimize => {
                if !self.features.optimization_suggestions {
                    return AssistantReply::text(OPTIMIZATION_OFF_TEXT);
                }
                self.handle_optimize(store, settings, now)
            }
            Intent::Help => AssistantReply::text(HELP_TEXT),
            Intent::Unknown => AssistantReply::text(FALLBACK_TEXT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::UTC;

    fn setup() -> (CalendarStore, CalendarSettings, DateTime<Utc>) {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
        (CalendarStore::new(UTC), CalendarSettings::default(), now)
    }

    #[test]
    fn schedule_intent_creates_event_and_suggestion() {
        let (mut store, settings, now) = setup();
        let assistant = RuleBasedAssistant::default();

        let reply = assistant.respond(
            "Schedule a team meeting tomorrow at 10 AM",
            &mut store,
            &settings,
            now,
        );

        assert!(matches!(reply.action, Some(AssistantAction::CreateEvent(_))));
        assert_eq!(store.events().len(), 1);
        assert_eq!(store.events()[0].category, "Meeting");
        assert_eq!(store.suggestions().len(), 1);
    }

    #[test]
    fn unknown_intent_mutates_nothing() {
        let (mut store, settings, now) = setup();
        let assistant = RuleBasedAssistant::default();

        let reply = assistant.respond("tell me a joke", &mut store, &settings, now);

        assert!(reply.action.is_none());
        assert!(store.events().is_empty());
        assert!(store.suggestions().is_empty());
    }

    #[test]
    fn disabled_conflict_detection_skips_the_scan() {
        let (mut store, settings, now) = setup();
        store.add_event(crate::models::event::EventDraft::new(
            "sync",
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap(),
        ))
        .unwrap();
        store.add_event(crate::models::event::EventDraft::new(
            "review",
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 2, 10, 30, 0).unwrap(),
        ))
        .unwrap();
        let assistant = RuleBasedAssistant::default().with_features(AiFeatures {
            conflict_detection: false,
            ..AiFeatures::default()
        });

        let reply = assistant.respond("any conflicts?", &mut store, &settings, now);

        assert!(reply.action.is_none());
        assert!(reply.content.contains("turned off"));
        assert!(store.suggestions().is_empty());
    }

    #[test]
    fn disabled_optimization_leaves_suggestions_alone() {
        let (mut store, settings, now) = setup();
        let assistant = RuleBasedAssistant::default().with_features(AiFeatures {
            optimization_suggestions: false,
            ..AiFeatures::default()
        });

        let reply = assistant.respond("optimize my schedule", &mut store, &settings, now);

        assert!(reply.action.is_none());
        assert!(store.suggestions().is_empty());
    }

    #[test]
    fn disabled_smart_scheduling_declines_free_time_search() {
        let (mut store, settings, now) = setup();
        let assistant = RuleBasedAssistant::default().with_features(AiFeatures {
            smart_scheduling: false,
            ..AiFeatures::default()
        });

        let reply = assistant.respond("find free time today", &mut store, &settings, now);

        assert!(reply.action.is_none());
        assert!(reply.content.contains("Smart scheduling"));
    }

    #[test]
    fn conflict_scan_reports_all_clear_on_clean_calendar() {
        let (mut store, settings, now) = setup();
        let assistant = RuleBasedAssistant::default();

        let reply = assistant.respond("any conflicts?", &mut store, &settings, now);

        assert!(reply.action.is_none());
        assert!(reply.content.contains("Great news"));
    }
}
