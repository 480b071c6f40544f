use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartOfWeek {
    Sunday,
    Monday,
}

// Daily window considered for slot suggestions, as whole hours [start, end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSettings {
    pub view: CalendarView,
    pub start_of_week: StartOfWeek,
    pub show_week_numbers: bool,
    pub default_event_duration_minutes: i64,
    pub working_hours: WorkingHours,
    #[serde(with = "tz_string")]
    pub timezone: Tz,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            view: CalendarView::Month,
            start_of_week: StartOfWeek::Sunday,
            show_week_numbers: false,
            default_event_duration_minutes: 60,
            working_hours: WorkingHours::default(),
            timezone: chrono_tz::UTC,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiFeatures {
    pub smart_scheduling: bool,
    pub conflict_detection: bool,
    pub optimization_suggestions: bool,
}

impl Default for AiFeatures {
    fn default() -> Self {
        Self {
            smart_scheduling: true,
            conflict_detection: true,
            optimization_suggestions: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannels {
    pub email: bool,
    pub push: bool,
    pub sms: bool,
}

impl Default for NotificationChannels {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            sms: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserPreferences {
    pub theme: Theme,
    pub notifications: NotificationChannels,
    pub ai_features: AiFeatures,
}

mod tz_string {
    use chrono_tz::Tz;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(tz.name())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Tz, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
