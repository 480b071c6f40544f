#![allow(non_snake_case)]

mod cli;
mod config;
mod models;
mod runtime;
mod service;
mod store;

use std::env;
use std::sync::Arc;

use chrono::Utc;

use crate::config::AppConfig;

const DEFAULT_RUN_MODE: &str = "cli";

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let get_prop = |key: &str| -> Option<String> {
        config.get(key).or_else(|| env::var(key).ok())
    };

    let settings = match config.calendar_settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            return;
        }
    };
    let preferences = match config.user_preferences() {
        Ok(preferences) => preferences,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            return;
        }
    };
    let typing_delay_ms = match config.assistant_delay_ms() {
        Ok(delay) => delay,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            return;
        }
    };

    // Nothing is persisted; every session starts from the example data set.
    let store = store::seed_store(Utc::now(), settings.timezone);
    let shared_store = Arc::new(tokio::sync::Mutex::new(store));

    let run_mode = get_prop("RUN_MODE").unwrap_or(DEFAULT_RUN_MODE.to_string());
    if run_mode == "cli" {
        cli::cli(shared_store.clone(), settings, preferences, typing_delay_ms).await;
    } else {
        println!("Invalid run mode {}", run_mode);
    }
}
