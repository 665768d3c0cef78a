//! Debloat RPC server — the message protocol over stdin/stdout for host
//! shell integration.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "msg":{"type":"PAUSE","durationMs":60000}, "tabId":7}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! The periodic engine tick (pause expiry, badge flashes, active-tab
//! refresh) runs on the same loop between requests.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::interval;

use debloat::app::{now_ms, App};
use debloat::catalog::BADGE_REFRESH_MS;
use debloat::database::connection::Database;
use debloat::message_handler::handle_message;
use debloat::services::badge::InMemoryBadge;
use debloat::services::rule_engine::InMemoryRuleEngine;
use debloat::services::script_registry::InMemoryScriptRegistry;
use debloat::types::message::Message;
use debloat::types::settings::BrowserType;

use serde_json::{json, Value};

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self {
            window_start: Instant::now(),
            request_count: 0,
            max_per_second,
        }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        let elapsed = self.window_start.elapsed();
        if elapsed.as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

fn handle_line(app: &Mutex<App>, line: &str, rate_limiter: &mut RateLimiter) -> Option<Value> {
    if line.trim().is_empty() {
        return None;
    }

    let req: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return Some(json!({"id": null, "error": format!("parse error: {}", e)})),
    };

    let id = req.get("id").cloned().unwrap_or(Value::Null);

    if !rate_limiter.check() {
        return Some(json!({"id": id, "error": "rate limit exceeded"}));
    }

    let message: Message = match req.get("msg").cloned().map(serde_json::from_value) {
        Some(Ok(m)) => m,
        Some(Err(e)) => return Some(json!({"id": id, "error": format!("bad message: {}", e)})),
        None => return Some(json!({"id": id, "error": "missing msg"})),
    };
    let sender_tab = req.get("tabId").and_then(Value::as_u64).map(|t| t as u32);

    match handle_message(app, &message, sender_tab) {
        Ok(response) => Some(json!({"id": id, "result": response})),
        Err(err) => Some(json!({"id": id, "error": err})),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let db_path = if let Ok(dir) = std::env::var("DEBLOAT_DATA_DIR") {
        std::path::PathBuf::from(dir).join("debloat.db")
    } else if let Ok(exe) = std::env::current_exe() {
        exe.parent()
            .unwrap_or(std::path::Path::new("."))
            .join("debloat.db")
    } else {
        std::path::PathBuf::from("debloat.db")
    };
    let storage = Arc::new(
        Database::open(db_path.to_str().unwrap_or("debloat.db"))
            .expect("Failed to open debloat database"),
    );

    let browser = std::env::var("DEBLOAT_USER_AGENT")
        .map(|ua| BrowserType::from_user_agent(&ua))
        .unwrap_or(BrowserType::Unknown);

    let app = Mutex::new(App::new(
        storage,
        Box::new(InMemoryRuleEngine::new()),
        Box::new(InMemoryScriptRegistry::new()),
        Box::new(InMemoryBadge::new()),
        browser,
    ));
    if let Ok(mut app) = app.lock() {
        app.startup(now_ms());
    }

    // Signal ready
    let ready = json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")});
    println!("{}", ready);

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = interval(Duration::from_millis(BADGE_REFRESH_MS));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Ok(mut app) = app.lock() {
                    app.tick(now_ms());
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(l)) => l,
                    _ => break,
                };
                if let Some(response) = handle_line(&app, &line, &mut rate_limiter) {
                    println!("{}", response);
                }
            }
        }
    }
}
