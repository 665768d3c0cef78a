//! Message handler: dispatches deserialized protocol messages against the
//! shared [`App`] state.
//!
//! Transport-level framing and request ids live in the caller; this layer
//! only sees already-typed messages plus the sender tab the transport
//! attributes to page-originated requests.

use std::sync::Mutex;

use crate::app::{now_ms, App};
use crate::types::activity::TabId;
use crate::types::message::{Message, MessageResponse};

/// Handles a single protocol message. Errors are strings for the transport
/// to wrap; a poisoned lock is unrecoverable and reported as such.
pub fn handle_message(
    app: &Mutex<App>,
    message: &Message,
    sender_tab: Option<TabId>,
) -> Result<MessageResponse, String> {
    let mut app = app.lock().map_err(|_| "app state poisoned".to_string())?;
    let now = now_ms();

    match message {
        Message::GetTabCount { tab_id } => Ok(MessageResponse::TabCount {
            count: app.telemetry().get_count(*tab_id),
        }),
        Message::GetActivity { tab_id } => Ok(MessageResponse::Activity {
            entries: app.telemetry().get_activity(*tab_id),
        }),
        Message::Pause { duration_ms } => {
            app.pause_blocking(*duration_ms, now)
                .map_err(|e| e.to_string())?;
            Ok(MessageResponse::Ok)
        }
        Message::Unpause => {
            app.unpause_blocking(now).map_err(|e| e.to_string())?;
            Ok(MessageResponse::Ok)
        }
        Message::WhitelistSite { domain, categories } => {
            app.whitelist_site(domain, categories, now)
                .map_err(|e| e.to_string())?;
            Ok(MessageResponse::Ok)
        }
        Message::UnwhitelistSite { domain } => {
            app.unwhitelist_site(domain, now).map_err(|e| e.to_string())?;
            Ok(MessageResponse::Ok)
        }
        Message::ReportCssHidden {
            domain,
            count,
            category,
        } => {
            // Only page contexts carry a sender tab; reports without one
            // cannot be attributed and are rejected.
            let tab = sender_tab.ok_or_else(|| "missing sender tab".to_string())?;
            app.record_hidden(tab, domain, *count, *category, now);
            Ok(MessageResponse::Ok)
        }
    }
}
