//! Unit tests for per-tab telemetry, the badge presentation, and the flash
//! behavior.

use debloat::catalog::{ACTIVITY_BUFFER_SIZE, BADGE_COLOR, BADGE_FLASH_COLOR, BADGE_FLASH_MS};
use debloat::managers::tab_telemetry::TabTelemetry;
use debloat::services::badge::InMemoryBadge;
use debloat::services::rule_engine::InMemoryRuleEngine;
use debloat::types::activity::MatchedRule;
use debloat::types::settings::CategoryId;

const TAB: u32 = 7;

fn setup() -> (TabTelemetry, InMemoryRuleEngine, InMemoryBadge) {
    let mut telemetry = TabTelemetry::new();
    telemetry.on_navigation_committed(TAB, "https://www.example.com/");
    (telemetry, InMemoryRuleEngine::new(), InMemoryBadge::new())
}

#[test]
fn badge_shows_count_and_overflow_text() {
    let (mut telemetry, mut rules, mut badge) = setup();
    for i in 0..12 {
        rules.push_match(TAB, "sponsored", i);
    }
    telemetry.refresh(TAB, &rules, &mut badge, false, 1_000);
    assert_eq!(badge.tab(TAB).unwrap().text, "12");

    for i in 12..1_200 {
        rules.push_match(TAB, "sponsored", i);
    }
    telemetry.refresh(TAB, &rules, &mut badge, false, 2_000);
    assert_eq!(badge.tab(TAB).unwrap().text, "1k+");
    assert_eq!(badge.tab(TAB).unwrap().title, "Debloat: 1200 blocked");
}

#[test]
fn zero_count_clears_badge_text() {
    let (mut telemetry, rules, mut badge) = setup();
    telemetry.refresh(TAB, &rules, &mut badge, false, 1_000);
    assert_eq!(badge.tab(TAB).unwrap().text, "");
    assert_eq!(badge.tab(TAB).unwrap().title, "Debloat");
}

#[test]
fn first_blocks_do_not_flash() {
    let (mut telemetry, mut rules, mut badge) = setup();
    for i in 0..5 {
        rules.push_match(TAB, "sponsored", i);
    }
    telemetry.refresh(TAB, &rules, &mut badge, false, 1_000);
    assert_eq!(badge.tab(TAB).unwrap().color, BADGE_COLOR);
}

#[test]
fn increase_flashes_then_reverts() {
    let (mut telemetry, mut rules, mut badge) = setup();
    for i in 0..5 {
        rules.push_match(TAB, "sponsored", i);
    }
    telemetry.refresh(TAB, &rules, &mut badge, false, 1_000);

    for i in 5..8 {
        rules.push_match(TAB, "sponsored", i);
    }
    telemetry.refresh(TAB, &rules, &mut badge, false, 2_000);
    assert_eq!(badge.tab(TAB).unwrap().color, BADGE_FLASH_COLOR);

    telemetry.poll_flashes(&mut badge, 2_000 + BADGE_FLASH_MS - 1);
    assert_eq!(badge.tab(TAB).unwrap().color, BADGE_FLASH_COLOR);
    telemetry.poll_flashes(&mut badge, 2_000 + BADGE_FLASH_MS);
    assert_eq!(badge.tab(TAB).unwrap().color, BADGE_COLOR);
}

#[test]
fn overlapping_increase_extends_the_flash() {
    let (mut telemetry, mut rules, mut badge) = setup();
    for i in 0..3 {
        rules.push_match(TAB, "sponsored", i);
    }
    telemetry.refresh(TAB, &rules, &mut badge, false, 1_000);
    rules.push_match(TAB, "sponsored", 3);
    telemetry.refresh(TAB, &rules, &mut badge, false, 2_000);
    rules.push_match(TAB, "sponsored", 4);
    telemetry.refresh(TAB, &rules, &mut badge, false, 2_300);

    // First deadline replaced by the second; still flashing at 2600.
    telemetry.poll_flashes(&mut badge, 2_000 + BADGE_FLASH_MS);
    assert_eq!(badge.tab(TAB).unwrap().color, BADGE_FLASH_COLOR);
    telemetry.poll_flashes(&mut badge, 2_300 + BADGE_FLASH_MS);
    assert_eq!(badge.tab(TAB).unwrap().color, BADGE_COLOR);
}

#[test]
fn activity_entries_deduplicate_across_refreshes() {
    let (mut telemetry, mut rules, mut badge) = setup();
    rules.push_match(TAB, "ai_endpoints", 100);
    telemetry.refresh(TAB, &rules, &mut badge, false, 1_000);
    telemetry.refresh(TAB, &rules, &mut badge, false, 3_000);
    telemetry.refresh(TAB, &rules, &mut badge, false, 5_000);

    let activity = telemetry.get_activity(TAB);
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0].category, CategoryId::Ai);
    assert_eq!(activity[0].domain, "example.com");
    assert_eq!(activity[0].count, None);
}

#[test]
fn buffer_keeps_newest_hundred() {
    let (mut telemetry, mut rules, mut badge) = setup();
    let total = ACTIVITY_BUFFER_SIZE as i64 + 50;
    for i in 0..total {
        rules.push_match(TAB, "telemetry_edge", i);
    }
    telemetry.refresh(TAB, &rules, &mut badge, false, 10_000);

    let activity = telemetry.get_activity(TAB);
    assert_eq!(activity.len(), ACTIVITY_BUFFER_SIZE);
    assert_eq!(activity[0].time, 50);
    assert_eq!(activity.last().unwrap().time, total - 1);
}

#[test]
fn css_hidden_reports_interleave_with_matches() {
    let (mut telemetry, mut rules, mut badge) = setup();
    rules.push_match(TAB, "sponsored", 100);
    telemetry.refresh(TAB, &rules, &mut badge, false, 1_000);
    telemetry.record_hidden(TAB, "example.com", 6, CategoryId::Annoyances, 1_500);

    let activity = telemetry.get_activity(TAB);
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[1].rule_group_id, "css");
    assert_eq!(activity[1].count, Some(6));
    // Hidden elements never count as blocked requests.
    assert_eq!(telemetry.get_count(TAB), 1);
}

#[test]
fn paused_refresh_leaves_badge_untouched() {
    let (mut telemetry, mut rules, mut badge) = setup();
    rules.push_match(TAB, "sponsored", 100);
    telemetry.refresh(TAB, &rules, &mut badge, true, 1_000);
    assert!(badge.tab(TAB).is_none());
    assert_eq!(telemetry.get_count(TAB), 0);
}

#[test]
fn stale_generation_commit_is_dropped() {
    let (mut telemetry, _, mut badge) = setup();
    let generation = telemetry.begin_refresh(TAB);
    let matched = vec![MatchedRule {
        rule_group_id: "sponsored".to_string(),
        time: 100,
    }];

    telemetry.on_navigation_committed(TAB, "https://fresh.example/");
    telemetry.commit_refresh(TAB, generation, &matched, &mut badge, 1_000);

    assert_eq!(telemetry.get_count(TAB), 0);
    assert!(telemetry.get_activity(TAB).is_empty());
    assert!(badge.tab(TAB).is_none());
}

#[test]
fn unknown_tab_queries_return_empty() {
    let telemetry = TabTelemetry::new();
    assert_eq!(telemetry.get_count(99), 0);
    assert!(telemetry.get_activity(99).is_empty());
}
