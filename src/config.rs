use std::collections::HashMap;
use std::fs;

use chrono_tz::Tz;

use crate::models::settings::{CalendarSettings, Theme, UserPreferences, WorkingHours};

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    // Calendar settings built from the config values, defaults for anything
    // unset. Bad values are errors rather than silent fallbacks.
    pub fn calendar_settings(&self) -> Result<CalendarSettings, String> {
        let mut settings = CalendarSettings::default();
        if let Some(tz) = self.get("TIMEZONE") {
            settings.timezone = tz
                .parse::<Tz>()
                .map_err(|_| format!("Invalid TIMEZONE: {}", tz))?;
        }
        let mut hours = WorkingHours::default();
        if let Some(start) = self.get("WORKING_HOURS_START") {
            hours.start_hour = parse_hour("WORKING_HOURS_START", &start)?;
        }
        if let Some(end) = self.get("WORKING_HOURS_END") {
            hours.end_hour = parse_hour("WORKING_HOURS_END", &end)?;
        }
        if hours.start_hour >= hours.end_hour {
            return Err(format!(
                "Working hours start ({}) must be before end ({})",
                hours.start_hour, hours.end_hour
            ));
        }
        settings.working_hours = hours;
        if let Some(duration) = self.get("DEFAULT_EVENT_DURATION_MINUTES") {
            settings.default_event_duration_minutes = duration
                .parse::<i64>()
                .map_err(|_| format!("Invalid DEFAULT_EVENT_DURATION_MINUTES: {}", duration))?;
        }
        Ok(settings)
    }

    // Display theme, notification channels, and the AI feature toggles.
    // The toggles gate the assistant's free-time, conflict, and optimize
    // handlers.
    pub fn user_preferences(&self) -> Result<UserPreferences, String> {
        let mut preferences = UserPreferences::default();
        if let Some(theme) = self.get("THEME") {
            preferences.theme = match theme.to_lowercase().as_str() {
                "light" => Theme::Light,
                "dark" => Theme::Dark,
                "auto" => Theme::Auto,
                _ => return Err(format!("Invalid THEME: {}", theme)),
            };
        }
        if let Some(value) = self.get("NOTIFY_EMAIL") {
            preferences.notifications.email = parse_bool("NOTIFY_EMAIL", &value)?;
        }
        if let Some(value) = self.get("NOTIFY_PUSH") {
            preferences.notifications.push = parse_bool("NOTIFY_PUSH", &value)?;
        }
        if let Some(value) = self.get("NOTIFY_SMS") {
            preferences.notifications.sms = parse_bool("NOTIFY_SMS", &value)?;
        }
        if let Some(value) = self.get("AI_SMART_SCHEDULING") {
            preferences.ai_features.smart_scheduling =
                parse_bool("AI_SMART_SCHEDULING", &value)?;
        }
        if let Some(value) = self.get("AI_CONFLICT_DETECTION") {
            preferences.ai_features.conflict_detection =
                parse_bool("AI_CONFLICT_DETECTION", &value)?;
        }
        if let Some(value) = self.get("AI_OPTIMIZATION_SUGGESTIONS") {
            preferences.ai_features.optimization_suggestions =
                parse_bool("AI_OPTIMIZATION_SUGGESTIONS", &value)?;
        }
        Ok(preferences)
    }

    // Artificial delay before the assistant's reply is shown. Display-only;
    // zero is fine.
    pub fn assistant_delay_ms(&self) -> Result<u64, String> {
        match self.get("ASSISTANT_DELAY_MS") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| format!("Invalid ASSISTANT_DELAY_MS: {}", value)),
            None => Ok(600),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(format!("Invalid {}: {}", key, value)),
    }
}

fn parse_hour(key: &str, value: &str) -> Result<u32, String> {
    let hour = value
        .parse::<u32>()
        .map_err(|_| format!("Invalid {}: {}", key, value))?;
    if hour > 24 {
        return Err(format!("Invalid {}: {} (expected 0-24)", key, value));
    }
    Ok(hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(pairs: &[(&str, &str)]) -> AppConfig {
        let mut values = HashMap::new();
        for (k, v) in pairs {
            values.insert(k.to_string(), v.to_string());
        }
        AppConfig { values }
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::default();
        let settings = config.calendar_settings().unwrap();
        assert_eq!(settings.working_hours.start_hour, 9);
        assert_eq!(settings.working_hours.end_hour, 17);
        assert_eq!(settings.timezone, chrono_tz::UTC);
        assert_eq!(config.assistant_delay_ms().unwrap(), 600);
    }

    #[test]
    fn parses_timezone_and_hours() {
        let config = config_with(&[
            ("TIMEZONE", "America/New_York"),
            ("WORKING_HOURS_START", "8"),
            ("WORKING_HOURS_END", "16"),
        ]);
        let settings = config.calendar_settings().unwrap();
        assert_eq!(settings.timezone, chrono_tz::America::New_York);
        assert_eq!(settings.working_hours.start_hour, 8);
        assert_eq!(settings.working_hours.end_hour, 16);
    }

    #[test]
    fn rejects_inverted_working_hours() {
        let config = config_with(&[
            ("WORKING_HOURS_START", "17"),
            ("WORKING_HOURS_END", "9"),
        ]);
        assert!(config.calendar_settings().is_err());
    }

    #[test]
    fn parses_user_preferences() {
        let config = config_with(&[
            ("THEME", "dark"),
            ("AI_CONFLICT_DETECTION", "false"),
            ("NOTIFY_SMS", "yes"),
        ]);
        let preferences = config.user_preferences().unwrap();
        assert_eq!(preferences.theme, Theme::Dark);
        assert!(!preferences.ai_features.conflict_detection);
        assert!(preferences.ai_features.smart_scheduling);
        assert!(preferences.notifications.sms);
    }

    #[test]
    fn default_preferences_enable_every_ai_feature() {
        let preferences = AppConfig::default().user_preferences().unwrap();
        assert!(preferences.ai_features.smart_scheduling);
        assert!(preferences.ai_features.conflict_detection);
        assert!(preferences.ai_features.optimization_suggestions);
    }

    #[test]
    fn rejects_bad_feature_toggle() {
        let config = config_with(&[("AI_SMART_SCHEDULING", "maybe")]);
        assert!(config.user_preferences().is_err());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let config = config_with(&[("TIMEZONE", "Mars/Olympus")]);
        assert!(config.calendar_settings().is_err());
    }
}
