use serde::{Deserialize, Serialize};

use super::settings::CategoryId;

/// Browser-assigned numeric tab identifier.
pub type TabId = u32;

/// One suppression event resolved to a category, shown to the user in the
/// per-tab activity drawer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Epoch milliseconds of the match or hide event.
    pub time: i64,
    /// Normalized host the tab was on when the event occurred.
    pub domain: String,
    pub category: CategoryId,
    /// Rule-group that matched, or `"css"` for content-side hide reports.
    pub rule_group_id: String,
    /// Element count for content-side hide reports; absent for rule matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// One row of the rule engine's per-tab matched-rule query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedRule {
    pub rule_group_id: String,
    /// Epoch milliseconds the engine recorded the match at.
    pub time: i64,
}
