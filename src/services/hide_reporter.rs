//! Hide reporter: content-side accounting of elements hidden by CSS rules.
//!
//! Hides arrive in bursts during page load, so reports are debounced into a
//! single message per quiet window. Elements are deduplicated by an opaque
//! identity key for the lifetime of the page, matching the rule that an
//! element is only ever counted once no matter how often styles re-apply.

use std::collections::HashSet;

use crate::catalog::CSS_REPORT_DEBOUNCE_MS;
use crate::types::errors::MessageError;
use crate::types::message::Message;
use crate::types::settings::CategoryId;

/// Outbound message channel from a page context to the engine.
pub trait MessageSink {
    fn send(&mut self, message: &Message) -> Result<(), MessageError>;
}

/// Per-page hidden-element counter with a debounced flush.
pub struct HideReporter {
    category: CategoryId,
    domain: String,
    seen: HashSet<u64>,
    pending: u32,
    flush_at: Option<i64>,
}

impl HideReporter {
    pub fn new(category: CategoryId, domain: &str) -> Self {
        Self {
            category,
            domain: domain.to_string(),
            seen: HashSet::new(),
            pending: 0,
            flush_at: None,
        }
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    pub fn flush_at(&self) -> Option<i64> {
        self.flush_at
    }

    /// Counts a newly hidden element. `element_key` is an opaque identity
    /// (the host environment derives it from the DOM node); re-tracking a
    /// known key is a no-op. The first count in a window arms the flush;
    /// later counts ride on the already-armed deadline.
    pub fn track(&mut self, element_key: u64, now: i64) {
        if !self.seen.insert(element_key) {
            return;
        }
        self.pending += 1;
        if self.flush_at.is_none() {
            self.flush_at = Some(now + CSS_REPORT_DEBOUNCE_MS);
        }
    }

    /// Flushes pending counts once the debounce window has elapsed. Send
    /// failures are swallowed: the engine side may be gone during teardown
    /// and a lost count is acceptable.
    pub fn poll(&mut self, now: i64, sink: &mut dyn MessageSink) {
        match self.flush_at {
            Some(at) if at <= now => {}
            _ => return,
        }
        self.flush_at = None;
        let count = std::mem::take(&mut self.pending);
        if count == 0 {
            return;
        }
        let _ = sink.send(&Message::ReportCssHidden {
            domain: self.domain.clone(),
            count,
            category: self.category,
        });
    }
}
