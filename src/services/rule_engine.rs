//! Rule-matching engine interface.
//!
//! The engine itself (URL patterns, request interception) is an external
//! collaborator — the core only decides which rule-groups are active and
//! queries per-tab match history. [`InMemoryRuleEngine`] is the reference
//! implementation used by the demo binary and tests.

use std::collections::{BTreeSet, HashMap};

use crate::types::activity::{MatchedRule, TabId};
use crate::types::errors::RuleEngineError;

/// Trait defining the rule engine operations the core consumes.
pub trait RuleEngine {
    /// Submits enable and disable sets in a single batched update. Both sets
    /// must be submitted together so a category flip is atomic from the
    /// engine's point of view.
    fn update_enabled_rule_groups(
        &mut self,
        enable: &[String],
        disable: &[String],
    ) -> Result<(), RuleEngineError>;

    /// Returns the ids of all currently enabled rule-groups.
    fn enabled_rule_groups(&self) -> Result<Vec<String>, RuleEngineError>;

    /// Returns the rules matched against a tab since its last navigation.
    /// A single match event may be reported more than once across calls.
    fn matched_rules(&self, tab_id: TabId) -> Result<Vec<MatchedRule>, RuleEngineError>;
}

/// In-memory rule engine keeping an enabled set and per-tab match logs.
#[derive(Debug, Default)]
pub struct InMemoryRuleEngine {
    enabled: BTreeSet<String>,
    matches: HashMap<TabId, Vec<MatchedRule>>,
}

impl InMemoryRuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a rule-group as enabled without going through an update call.
    pub fn with_enabled<I: IntoIterator<Item = String>>(groups: I) -> Self {
        Self {
            enabled: groups.into_iter().collect(),
            matches: HashMap::new(),
        }
    }

    /// Records a match event for a tab, as the real engine would when a
    /// request is blocked.
    pub fn push_match(&mut self, tab_id: TabId, rule_group_id: &str, time: i64) {
        self.matches.entry(tab_id).or_default().push(MatchedRule {
            rule_group_id: rule_group_id.to_string(),
            time,
        });
    }

    /// Clears a tab's match log, as the real engine does on navigation.
    pub fn clear_matches(&mut self, tab_id: TabId) {
        self.matches.remove(&tab_id);
    }

    pub fn is_enabled(&self, rule_group_id: &str) -> bool {
        self.enabled.contains(rule_group_id)
    }
}

impl RuleEngine for InMemoryRuleEngine {
    fn update_enabled_rule_groups(
        &mut self,
        enable: &[String],
        disable: &[String],
    ) -> Result<(), RuleEngineError> {
        for id in disable {
            self.enabled.remove(id);
        }
        for id in enable {
            self.enabled.insert(id.clone());
        }
        Ok(())
    }

    fn enabled_rule_groups(&self) -> Result<Vec<String>, RuleEngineError> {
        Ok(self.enabled.iter().cloned().collect())
    }

    fn matched_rules(&self, tab_id: TabId) -> Result<Vec<MatchedRule>, RuleEngineError> {
        Ok(self.matches.get(&tab_id).cloned().unwrap_or_default())
    }
}
