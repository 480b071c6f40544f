use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use inquire::Text;
use serde_json::json;
use tokio::sync::Mutex;

use crate::models::event::EventDraft;
use crate::models::settings::{CalendarSettings, UserPreferences};
use crate::runtime::ChatSession;
use crate::service::analyzer;
use crate::service::assistant::RuleBasedAssistant;
use crate::service::recurrence;
use crate::store::CalendarStore;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive assistant chat
    Chat {},
    /// Add an event directly
    Add {
        title: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        #[arg(long)]
        category: Option<String>,
    },
    /// List events for a day (defaults to today)
    List {
        date: Option<NaiveDate>,
    },
    /// Scan the next week for conflicting events
    Conflicts {},
    /// Suggest a time slot within working hours
    Suggest {},
    /// Dump the session state as JSON
    Export {},
}

pub async fn cli(
    shared_store: Arc<Mutex<CalendarStore>>,
    settings: CalendarSettings,
    preferences: UserPreferences,
    typing_delay_ms: u64,
) {
    // Fine to panic here
    let cli = Cli::parse();
    match &cli.command {
        Commands::Chat {} => {
            let session = ChatSession::new(
                shared_store.clone(),
                settings.clone(),
                Arc::new(RuleBasedAssistant::default().with_features(preferences.ai_features)),
                std::time::Duration::from_millis(typing_delay_ms),
            );
            chat_loop(&session).await;
        }
        Commands::Add {
            title,
            start_time,
            end_time,
            category,
        } => {
            let mut store = shared_store.lock().await;
            let mut draft = EventDraft::new(title, *start_time, *end_time);
            if let Some(category) = category {
                draft.category = category.clone();
            }
            match store.add_event(draft) {
                Ok(event) => println!("Added \"{}\" ({})", event.title, event.id),
                Err(err) => println!("Failed to add event: {}", err),
            }
        }
        Commands::List { date } => {
            let store = shared_store.lock().await;
            let day = (*date)
                .unwrap_or_else(|| Utc::now().with_timezone(&settings.timezone).date_naive());
            let events = store.events_on(day);
            if events.is_empty() {
                println!("No events on {}", day);
            }
            for event in events {
                println!(
                    "{} - {}  {} [{}]",
                    event.start_time.with_timezone(&settings.timezone).format("%H:%M"),
                    event.end_time.with_timezone(&settings.timezone).format("%H:%M"),
                    event.title,
                    event.category,
                );
            }
        }
        Commands::Conflicts {} => {
            let store = shared_store.lock().await;
            let (window_start, window_end) =
                recurrence::scan_window(settings.timezone, Utc::now(), recurrence::SCAN_DAYS);
            let snapshot = recurrence::expand_all(store.events(), window_start, window_end);
            let report = analyzer::find_conflicts(&snapshot);
            if !report.has_conflict {
                println!("No conflicts found.");
            }
            for pair in report.pairs {
                println!(
                    "\"{}\" overlaps with \"{}\"",
                    pair.first.title, pair.second.title
                );
            }
        }
        Commands::Suggest {} => {
            let store = shared_store.lock().await;
            let now = Utc::now();
            let (window_start, window_end) =
                recurrence::scan_window(settings.timezone, now, recurrence::SCAN_DAYS);
            let snapshot = recurrence::expand_all(store.events(), window_start, window_end);
            let slot = analyzer::suggest_slot(&snapshot, settings.working_hours, now, settings.timezone);
            println!(
                "{} (confidence {:.0}%): {}",
                slot.suggested_time.with_timezone(&settings.timezone).format("%b %-d, %-I:%M %p"),
                slot.confidence * 100.0,
                slot.reason,
            );
        }
        Commands::Export {} => {
            let store = shared_store.lock().await;
            let payload = json!({
                "events": store.events(),
                "suggestions": store.suggestions(),
                "settings": settings,
                "preferences": preferences,
            });
            match serde_json::to_string_pretty(&payload) {
                Ok(body) => println!("{}", body),
                Err(err) => println!("Failed to serialize session: {}", err),
            }
        }
    }
}

async fn chat_loop(session: &ChatSession) {
    println!("{}", session.greeting());
    println!("(type \"exit\" to leave)");
    loop {
        let input = match Text::new("You:").prompt() {
            Ok(text) => text,
            Err(_) => break,
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }
        let reply = session.handle(trimmed).await;
        println!("Assistant: {}", reply.content);
    }
}
