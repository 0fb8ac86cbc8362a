//! In-process stand-in for the Telegram Bot API, served with axum on a random local port.
//!
//! Every call is appended to an [`EventLog`] by lowercased method name (`getme`, `getupdates`, ...), so tests
//! can assert on which calls were made and in what order.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::Uri, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

pub const TOKEN: &str = "123:abc";

/// Shared, ordered record of API calls and test events.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| e.as_str() == event).count()
    }
}

#[derive(Clone)]
struct ApiState {
    log: EventLog,
    pending: Arc<Mutex<Vec<Value>>>,
    delete_webhook_ok: bool,
}

impl ApiState {
    fn take_pending(&self) -> Vec<Value> {
        std::mem::take(&mut *self.pending.lock().unwrap())
    }
}

pub struct FakeApi {
    pub url: Url,
    pub log: EventLog,
    server: JoinHandle<()>,
}

impl FakeApi {
    /// Serves `pending` on the first getUpdates call and empty batches afterwards.
    pub async fn start(pending: Vec<Value>) -> Self {
        Self::start_with(pending, true, EventLog::default()).await
    }

    pub async fn start_with(pending: Vec<Value>, delete_webhook_ok: bool, log: EventLog) -> Self {
        let state = ApiState {
            log: log.clone(),
            pending: Arc::new(Mutex::new(pending)),
            delete_webhook_ok,
        };
        let app = Router::new().fallback(api_call).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            url: Url::parse(&format!("http://{}/", addr)).unwrap(),
            log,
            server,
        }
    }

    /// teloxide client pointed at this server.
    pub fn bot(&self) -> teloxide::Bot {
        teloxide::Bot::new(TOKEN).set_api_url(self.url.clone())
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn api_call(State(state): State<ApiState>, uri: Uri) -> Json<Value> {
    let method = uri
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    state.log.push(method.clone());

    let body = match method.as_str() {
        "deletewebhook" if state.delete_webhook_ok => json!({"ok": true, "result": true}),
        "deletewebhook" => json!({"ok": false, "error_code": 401, "description": "Unauthorized"}),
        "getme" => json!({
            "ok": true,
            "result": {
                "id": 4242,
                "is_bot": true,
                "first_name": "UniShark",
                "username": "UniSharkBot",
                "can_join_groups": true,
                "can_read_all_group_messages": false,
                "supports_inline_queries": false,
                "can_connect_to_business": false,
                "has_main_web_app": false
            }
        }),
        "getupdates" => {
            let batch = state.take_pending();
            if batch.is_empty() {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            json!({"ok": true, "result": batch})
        }
        _ => json!({"ok": true, "result": true}),
    };
    Json(body)
}

/// A private-chat text message update.
pub fn text_update(update_id: u32, chat_id: i64, text: &str) -> Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "date": 1700000000,
            "chat": {"id": chat_id, "type": "private", "first_name": "Sara"},
            "from": {"id": chat_id, "is_bot": false, "first_name": "Sara"},
            "text": text
        }
    })
}

/// Resolves once `count` getUpdates calls have been seen.
pub async fn wait_for_polls(log: &EventLog, count: usize) {
    while log.count("getupdates") < count {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
