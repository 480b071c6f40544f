use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::models::settings::CalendarSettings;
use crate::service::assistant::{AssistantReply, AssistantResponder};
use crate::store::CalendarStore;

// Owns the chat flow: one shared store, one responder strategy, and the
// artificial typing delay shown before each reply. The delay is display-only
// and carries no correctness semantics.
pub struct ChatSession {
    store: Arc<Mutex<CalendarStore>>,
    settings: CalendarSettings,
    responder: Arc<dyn AssistantResponder>,
    typing_delay: Duration,
}

impl ChatSession {
    pub fn new(
        store: Arc<Mutex<CalendarStore>>,
        settings: CalendarSettings,
        responder: Arc<dyn AssistantResponder>,
        typing_delay: Duration,
    ) -> Self {
        Self {
            store,
            settings,
            responder,
            typing_delay,
        }
    }

    pub fn greeting(&self) -> String {
        self.responder.greeting().to_string()
    }

    pub async fn handle(&self, text: &str) -> AssistantReply {
        if !self.typing_delay.is_zero() {
            tokio::time::sleep(self.typing_delay).await;
        }
        let mut store = self.store.lock().await;
        self.responder
            .respond(text, &mut store, &self.settings, Utc::now())
    }
}
