//! Unit tests for the debounced CSS-hidden reporter.

use debloat::catalog::CSS_REPORT_DEBOUNCE_MS;
use debloat::services::hide_reporter::{HideReporter, MessageSink};
use debloat::types::errors::MessageError;
use debloat::types::message::Message;
use debloat::types::settings::CategoryId;

#[derive(Default)]
struct RecordingSink {
    sent: Vec<Message>,
    fail: bool,
}

impl MessageSink for RecordingSink {
    fn send(&mut self, message: &Message) -> Result<(), MessageError> {
        if self.fail {
            return Err(MessageError::SendFailed("channel closed".to_string()));
        }
        self.sent.push(message.clone());
        Ok(())
    }
}

fn count_of(message: &Message) -> u32 {
    match message {
        Message::ReportCssHidden { count, .. } => *count,
        other => panic!("unexpected message: {:?}", other),
    }
}

#[test]
fn burst_of_hides_yields_one_report() {
    let mut reporter = HideReporter::new(CategoryId::Sponsored, "news.example");
    let mut sink = RecordingSink::default();

    for key in 0..10 {
        reporter.track(key, key as i64 * 20);
    }
    // Debounce window anchored to the first hide, not the last.
    reporter.poll(CSS_REPORT_DEBOUNCE_MS - 1, &mut sink);
    assert!(sink.sent.is_empty());
    reporter.poll(CSS_REPORT_DEBOUNCE_MS, &mut sink);
    assert_eq!(sink.sent.len(), 1);
    assert_eq!(count_of(&sink.sent[0]), 10);
}

#[test]
fn report_carries_domain_and_category() {
    let mut reporter = HideReporter::new(CategoryId::Shopping, "shop.example");
    let mut sink = RecordingSink::default();
    reporter.track(1, 0);
    reporter.poll(10_000, &mut sink);
    assert_eq!(
        sink.sent[0],
        Message::ReportCssHidden {
            domain: "shop.example".to_string(),
            count: 1,
            category: CategoryId::Shopping,
        }
    );
}

#[test]
fn element_identity_deduplicates_for_page_lifetime() {
    let mut reporter = HideReporter::new(CategoryId::Ai, "example.com");
    let mut sink = RecordingSink::default();

    reporter.track(42, 0);
    reporter.track(42, 100);
    reporter.poll(1_000, &mut sink);
    assert_eq!(count_of(&sink.sent[0]), 1);

    // Re-applying styles to the same element after the flush stays silent.
    reporter.track(42, 2_000);
    reporter.poll(5_000, &mut sink);
    assert_eq!(sink.sent.len(), 1);
}

#[test]
fn consecutive_windows_report_separately() {
    let mut reporter = HideReporter::new(CategoryId::Annoyances, "example.com");
    let mut sink = RecordingSink::default();

    reporter.track(1, 0);
    reporter.poll(CSS_REPORT_DEBOUNCE_MS, &mut sink);
    reporter.track(2, 10_000);
    reporter.poll(10_000 + CSS_REPORT_DEBOUNCE_MS, &mut sink);

    assert_eq!(sink.sent.len(), 2);
    assert_eq!(count_of(&sink.sent[0]), 1);
    assert_eq!(count_of(&sink.sent[1]), 1);
}

#[test]
fn poll_without_pending_work_is_silent() {
    let mut reporter = HideReporter::new(CategoryId::Ai, "example.com");
    let mut sink = RecordingSink::default();
    reporter.poll(1_000_000, &mut sink);
    assert!(sink.sent.is_empty());
    assert_eq!(reporter.flush_at(), None);
}

#[test]
fn send_failure_is_swallowed() {
    let mut reporter = HideReporter::new(CategoryId::Ai, "example.com");
    let mut sink = RecordingSink {
        fail: true,
        ..Default::default()
    };
    reporter.track(1, 0);
    // Must not panic; pending is consumed either way.
    reporter.poll(CSS_REPORT_DEBOUNCE_MS, &mut sink);
    assert_eq!(reporter.pending(), 0);
}
