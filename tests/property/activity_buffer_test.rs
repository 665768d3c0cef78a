//! Property tests for the bounded per-tab activity log.

use proptest::prelude::*;

use debloat::catalog::ACTIVITY_BUFFER_SIZE;
use debloat::managers::tab_telemetry::TabTelemetry;
use debloat::services::badge::InMemoryBadge;
use debloat::services::rule_engine::InMemoryRuleEngine;
use debloat::types::settings::CategoryId;

const TAB: u32 = 1;

fn rule_group() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("ai_endpoints"),
        Just("sponsored"),
        Just("shopping"),
        Just("telemetry_chrome"),
        Just("unmapped_group"),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn activity_never_exceeds_the_cap(
        events in proptest::collection::vec((rule_group(), 0i64..100_000), 0..300)
    ) {
        let mut telemetry = TabTelemetry::new();
        telemetry.on_navigation_committed(TAB, "https://example.com/");
        let mut rules = InMemoryRuleEngine::new();
        let mut badge = InMemoryBadge::new();
        for (group, time) in &events {
            rules.push_match(TAB, group, *time);
        }

        telemetry.refresh(TAB, &rules, &mut badge, false, 200_000);
        prop_assert!(telemetry.get_activity(TAB).len() <= ACTIVITY_BUFFER_SIZE);
        // The blocked count reflects every match, capped log or not.
        prop_assert_eq!(telemetry.get_count(TAB), events.len() as u64);
    }

    #[test]
    fn overflow_drops_oldest_entries(extra in 1usize..80) {
        let mut telemetry = TabTelemetry::new();
        telemetry.on_navigation_committed(TAB, "https://example.com/");
        let mut rules = InMemoryRuleEngine::new();
        let mut badge = InMemoryBadge::new();
        let total = ACTIVITY_BUFFER_SIZE + extra;
        for i in 0..total {
            rules.push_match(TAB, "sponsored", i as i64);
        }

        telemetry.refresh(TAB, &rules, &mut badge, false, 1_000_000);
        let activity = telemetry.get_activity(TAB);
        prop_assert_eq!(activity.len(), ACTIVITY_BUFFER_SIZE);
        prop_assert_eq!(activity[0].time, extra as i64);
        prop_assert_eq!(activity.last().unwrap().time, total as i64 - 1);
    }

    #[test]
    fn css_reports_respect_the_cap_too(reports in 1usize..250) {
        let mut telemetry = TabTelemetry::new();
        telemetry.on_navigation_committed(TAB, "https://example.com/");
        for i in 0..reports {
            telemetry.record_hidden(TAB, "example.com", 1, CategoryId::Annoyances, i as i64);
        }
        prop_assert!(telemetry.get_activity(TAB).len() <= ACTIVITY_BUFFER_SIZE);
        prop_assert_eq!(
            telemetry.get_activity(TAB).len(),
            reports.min(ACTIVITY_BUFFER_SIZE)
        );
    }
}
