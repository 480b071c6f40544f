use chrono::{DateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringRule {
    pub frequency: Frequency,
    pub interval: u32,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub color: String,
    pub category: String,
    pub is_all_day: bool,
    pub location: Option<String>,
    pub attendees: Option<Vec<String>>,
    pub priority: Priority,
    pub recurring: Option<RecurringRule>,
}

// Event minus the id. The store assigns ids; callers never pick them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub color: String,
    pub category: String,
    pub is_all_day: bool,
    pub location: Option<String>,
    pub attendees: Option<Vec<String>>,
    pub priority: Priority,
    pub recurring: Option<RecurringRule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyTitle,
    EndBeforeStart,
    ZeroInterval,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "event title must not be empty"),
            ValidationError::EndBeforeStart => {
                write!(f, "event end time must be after its start time")
            }
            ValidationError::ZeroInterval => {
                write!(f, "recurring interval must be at least 1")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl EventDraft {
    pub fn new(title: &str, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            title: title.to_string(),
            description: None,
            start_time,
            end_time,
            color: "#3b82f6".to_string(),
            category: "General".to_string(),
            is_all_day: false,
            location: None,
            attendees: None,
            priority: Priority::Medium,
            recurring: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if !self.is_all_day && self.start_time >= self.end_time {
            return Err(ValidationError::EndBeforeStart);
        }
        if let Some(rule) = &self.recurring {
            if rule.interval == 0 {
                return Err(ValidationError::ZeroInterval);
            }
        }
        Ok(())
    }

    // All-day events snap to the day boundaries of their start date in the
    // bucketing timezone, so start < end holds without the caller supplying times.
    // Midnight can fall inside a DST gap (some zones spring forward at 00:00);
    // when it does, the bound walks hour by hour to the nearest valid instant.
    pub fn normalize_all_day(&mut self, tz: Tz) {
        if !self.is_all_day {
            return;
        }
        let local_day = self.start_time.with_timezone(&tz).date_naive();
        let start = (0..3).find_map(|hour| {
            tz.from_local_datetime(&local_day.and_hms_opt(hour, 0, 0).unwrap())
                .earliest()
        });
        let end = (0..3).find_map(|back| {
            tz.from_local_datetime(&local_day.and_hms_opt(23 - back, 59, 59).unwrap())
                .latest()
        });
        if let (Some(start), Some(end)) = (start, end) {
            self.start_time = start.with_timezone(&Utc);
            self.end_time = end.with_timezone(&Utc);
        }
    }
}

impl Event {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn starts_in_morning(&self, tz: Tz) -> bool {
        let hour = self.start_time.with_timezone(&tz).hour();
        (9..=11).contains(&hour)
    }
}
