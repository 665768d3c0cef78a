use serde::{Deserialize, Serialize};

use super::activity::{ActivityEntry, TabId};
use super::settings::CategoryId;

/// Closed set of requests crossing the page/UI ↔ core boundary.
///
/// Payloads stay minimal — these cross a serialization boundary. Shapes not
/// in this set fail deserialization and get no response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    #[serde(rename = "GET_TAB_COUNT")]
    GetTabCount {
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
    #[serde(rename = "GET_ACTIVITY")]
    GetActivity {
        #[serde(rename = "tabId")]
        tab_id: TabId,
    },
    #[serde(rename = "PAUSE")]
    Pause {
        #[serde(rename = "durationMs")]
        duration_ms: i64,
    },
    #[serde(rename = "UNPAUSE")]
    Unpause,
    #[serde(rename = "WHITELIST_SITE")]
    WhitelistSite {
        domain: String,
        categories: Vec<CategoryId>,
    },
    #[serde(rename = "UNWHITELIST_SITE")]
    UnwhitelistSite { domain: String },
    #[serde(rename = "REPORT_CSS_HIDDEN")]
    ReportCssHidden {
        domain: String,
        count: u32,
        category: CategoryId,
    },
}

/// Responses matching the request set, or a bare acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MessageResponse {
    #[serde(rename = "TAB_COUNT")]
    TabCount { count: u64 },
    #[serde(rename = "ACTIVITY")]
    Activity { entries: Vec<ActivityEntry> },
    #[serde(rename = "OK")]
    Ok,
}
