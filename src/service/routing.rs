#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Schedule,
    FreeTime,
    Conflicts,
    Optimize,
    Help,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct IntentResult {
    pub intent: Intent,
    pub normalized_text: String,
}

// Seam for swapping the keyword table out for a real language backend
// without touching the store or analyzer contracts.
pub trait IntentRouter: Send + Sync {
    fn route(&self, text: &str) -> IntentResult;
}

pub struct HeuristicRouter;

impl IntentRouter for HeuristicRouter {
    fn route(&self, text: &str) -> IntentResult {
        route_intent(text)
    }
}

// Ordered trigger-word table, first match wins. This is a rule table, not a
// parser; anything that misses every row falls through to Unknown. The
// schedule row sits last among the families because "schedule" shows up as a
// noun in most other queries ("optimize my schedule").
const INTENT_RULES: &[(Intent, &[&str])] = &[
    (Intent::FreeTime, &["free time", "available", "open slot"]),
    (Intent::Conflicts, &["conflict", "overlap", "busy"]),
    (Intent::Optimize, &["optimize", "improve", "better"]),
    (Intent::Help, &["help", "what can you do"]),
    (Intent::Schedule, &["schedule", "create", "add "]),
];

pub fn route_intent(text: &str) -> IntentResult {
    let normalized = text.trim().to_string();
    if normalized.is_empty() {
        return IntentResult {
            intent: Intent::Unknown,
            normalized_text: normalized,
        };
    }

    let lower = normalized.to_lowercase();
    for (intent, triggers) in INTENT_RULES {
        if triggers.iter().any(|t| lower.contains(t)) {
            return IntentResult {
                intent: *intent,
                normalized_text: normalized,
            };
        }
    }

    // No trigger word, but text carrying a time reference ("dentist tomorrow
    // 3pm") still reads as a scheduling request.
    if has_time_tokens(&normalized) {
        return IntentResult {
            intent: Intent::Schedule,
            normalized_text: normalized,
        };
    }

    IntentResult {
        intent: Intent::Unknown,
        normalized_text: normalized,
    }
}

// Everything before the first time token becomes the event title. Returns
// None when the text opens with a time token or contains nothing else.
pub fn title_before_time_tokens(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let mut cut = lower.len();
    for token in time_tokens() {
        if let Some(idx) = lower.find(token) {
            cut = cut.min(idx);
        }
    }
    if let Some(idx) = first_am_pm_index(&lower) {
        cut = cut.min(idx);
    }

    let title = text[..cut]
        .trim()
        .trim_end_matches(|c: char| c == ',' || c == '.')
        .trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

pub fn category_from_keywords(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    if lower.contains("meeting") || lower.contains("call") {
        Some("Meeting")
    } else if lower.contains("appointment") || lower.contains("doctor") {
        Some("Appointment")
    } else if lower.contains("lunch") || lower.contains("dinner") {
        Some("Social")
    } else {
        None
    }
}

fn time_tokens() -> &'static [&'static str] {
    &[
        "today",
        "tomorrow",
        "tonight",
        "morning",
        "afternoon",
        "evening",
        "next ",
        "this ",
        "at ",
        "in ",
        "on ",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ]
}

pub fn has_time_tokens(text: &str) -> bool {
    let lower = text.to_lowercase();
    if time_tokens().iter().any(|t| lower.contains(t)) {
        return true;
    }

    let months = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    if months.iter().any(|m| lower.contains(m)) {
        return true;
    }

    if lower.contains('/') || lower.contains(':') {
        return lower.chars().any(|c| c.is_ascii_digit());
    }

    first_am_pm_index(&lower).is_some()
}

fn first_am_pm_index(lower: &str) -> Option<usize> {
    let bytes = lower.as_bytes();
    for i in 0..bytes.len().saturating_sub(1) {
        let first = bytes[i];
        let second = bytes[i + 1];
        if (first == b'a' || first == b'p') && second == b'm' {
            let before = if i == 0 { None } else { Some(bytes[i - 1]) };
            let after = if i + 2 >= bytes.len() {
                None
            } else {
                Some(bytes[i + 2])
            };
            let boundary_before = before.map_or(true, |b| !b.is_ascii_alphabetic());
            let boundary_after = after.map_or(true, |b| !b.is_ascii_alphabetic());
            if boundary_before && boundary_after {
                return Some(i);
            }
        }
    }
    None
}
