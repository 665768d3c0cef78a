//! Per-tab telemetry: blocked counts, the bounded activity log, and badge
//! presentation including the increase flash.
//!
//! Refresh is split into `begin_refresh`/`commit_refresh` around the engine
//! query so a result computed against an old navigation can be discarded:
//! each navigation bumps the tab's generation, and commits carrying a stale
//! generation are dropped.

use std::collections::{HashMap, VecDeque};

use crate::catalog::{
    category_for_rule_group, ACTIVITY_BUFFER_SIZE, BADGE_COLOR, BADGE_FLASH_COLOR, BADGE_FLASH_MS,
    BADGE_PAUSED_COLOR,
};
use crate::host::host_from_url;
use crate::services::badge::BadgeSurface;
use crate::services::rule_engine::RuleEngine;
use crate::types::activity::{ActivityEntry, MatchedRule, TabId};
use crate::types::settings::CategoryId;

#[derive(Debug, Default)]
struct TabState {
    count: u64,
    domain: String,
    activity: VecDeque<ActivityEntry>,
    flash_until: Option<i64>,
    generation: u64,
}

/// Tracks blocking telemetry for every open tab.
#[derive(Debug, Default)]
pub struct TabTelemetry {
    tabs: HashMap<TabId, TabState>,
}

impl TabTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets a tab's telemetry on a committed top-frame navigation. The
    /// generation bump invalidates any refresh already in flight.
    pub fn on_navigation_committed(&mut self, tab: TabId, url: &str) {
        let state = self.tabs.entry(tab).or_default();
        state.count = 0;
        state.activity.clear();
        state.flash_until = None;
        state.domain = host_from_url(url).unwrap_or_default();
        state.generation += 1;
    }

    pub fn on_tab_closed(&mut self, tab: TabId) {
        self.tabs.remove(&tab);
    }

    pub fn get_count(&self, tab: TabId) -> u64 {
        self.tabs.get(&tab).map_or(0, |s| s.count)
    }

    /// Activity entries oldest-first, capped at the buffer size.
    pub fn get_activity(&self, tab: TabId) -> Vec<ActivityEntry> {
        self.tabs
            .get(&tab)
            .map(|s| s.activity.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Queries the engine and folds the result into the tab's telemetry.
    /// Skipped entirely while paused so the badge keeps its paused state.
    pub fn refresh(
        &mut self,
        tab: TabId,
        rules: &dyn RuleEngine,
        badge: &mut dyn BadgeSurface,
        paused: bool,
        now: i64,
    ) {
        if paused {
            return;
        }
        let generation = self.begin_refresh(tab);
        let matched = match rules.matched_rules(tab) {
            Ok(matched) => matched,
            Err(_) => return,
        };
        self.commit_refresh(tab, generation, &matched, badge, now);
    }

    /// Snapshots the tab's generation before an engine query.
    pub fn begin_refresh(&mut self, tab: TabId) -> u64 {
        self.tabs.entry(tab).or_default().generation
    }

    /// Applies a query result taken at `generation`. Results from before a
    /// navigation (or for a closed tab) are discarded. Match events already
    /// in the log are deduplicated by (time, rule-group); events for unknown
    /// rule-groups are dropped.
    pub fn commit_refresh(
        &mut self,
        tab: TabId,
        generation: u64,
        matched: &[MatchedRule],
        badge: &mut dyn BadgeSurface,
        now: i64,
    ) {
        let state = match self.tabs.get_mut(&tab) {
            Some(state) if state.generation == generation => state,
            _ => return,
        };

        for rule in matched {
            let duplicate = state
                .activity
                .iter()
                .any(|e| e.time == rule.time && e.rule_group_id == rule.rule_group_id);
            if duplicate {
                continue;
            }
            let category = match category_for_rule_group(&rule.rule_group_id) {
                Some(category) => category,
                None => continue,
            };
            state.activity.push_back(ActivityEntry {
                time: rule.time,
                domain: state.domain.clone(),
                category,
                rule_group_id: rule.rule_group_id.clone(),
                count: None,
            });
            while state.activity.len() > ACTIVITY_BUFFER_SIZE {
                state.activity.pop_front();
            }
        }

        let previous = state.count;
        state.count = matched.len() as u64;

        let text = badge_text(state.count);
        let title = badge_title(state.count);
        let _ = badge.set_text(Some(tab), &text);
        let _ = badge.set_title(Some(tab), &title);

        if state.count > previous && previous > 0 {
            // Arm the flash only if the color actually changed; a replaced
            // deadline extends an in-progress flash.
            if badge.set_background_color(Some(tab), BADGE_FLASH_COLOR).is_ok() {
                state.flash_until = Some(now + BADGE_FLASH_MS);
            }
        } else if state.flash_until.is_none() {
            let _ = badge.set_background_color(Some(tab), BADGE_COLOR);
        }
    }

    /// Reverts expired flashes back to the steady badge color.
    pub fn poll_flashes(&mut self, badge: &mut dyn BadgeSurface, now: i64) {
        for (tab, state) in &mut self.tabs {
            if matches!(state.flash_until, Some(until) if until <= now) {
                state.flash_until = None;
                let _ = badge.set_background_color(Some(*tab), BADGE_COLOR);
            }
        }
    }

    /// Logs a CSS-hidden report from a page. These entries carry an explicit
    /// count and a fixed pseudo rule-group, since no engine rule matched.
    pub fn record_hidden(
        &mut self,
        tab: TabId,
        domain: &str,
        count: u32,
        category: CategoryId,
        now: i64,
    ) {
        let state = self.tabs.entry(tab).or_default();
        state.activity.push_back(ActivityEntry {
            time: now,
            domain: domain.to_string(),
            category,
            rule_group_id: "css".to_string(),
            count: Some(count),
        });
        while state.activity.len() > ACTIVITY_BUFFER_SIZE {
            state.activity.pop_front();
        }
    }

    /// Global paused presentation; per-tab badges are left alone and get
    /// refreshed after unpause. Badge failures are cosmetic and swallowed.
    pub fn show_paused_badge(badge: &mut dyn BadgeSurface) {
        let _ = badge.set_text(None, "⏸");
        let _ = badge.set_background_color(None, BADGE_PAUSED_COLOR);
        let _ = badge.set_title(None, "Debloat: paused");
    }

    pub fn clear_paused_badge(badge: &mut dyn BadgeSurface) {
        let _ = badge.set_text(None, "");
        let _ = badge.set_background_color(None, BADGE_COLOR);
        let _ = badge.set_title(None, "Debloat");
    }
}

fn badge_text(count: u64) -> String {
    match count {
        0 => String::new(),
        n if n > 999 => "1k+".to_string(),
        n => n.to_string(),
    }
}

fn badge_title(count: u64) -> String {
    if count == 0 {
        "Debloat".to_string()
    } else {
        format!("Debloat: {} blocked", count)
    }
}
