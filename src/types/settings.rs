use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The fixed set of blockable behavior categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    Ai,
    Sponsored,
    Shopping,
    Telemetry,
    Annoyances,
}

impl CategoryId {
    pub const ALL: [CategoryId; 5] = [
        CategoryId::Ai,
        CategoryId::Sponsored,
        CategoryId::Shopping,
        CategoryId::Telemetry,
        CategoryId::Annoyances,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::Ai => "ai",
            CategoryId::Sponsored => "sponsored",
            CategoryId::Shopping => "shopping",
            CategoryId::Telemetry => "telemetry",
            CategoryId::Annoyances => "annoyances",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named bundles of category toggles, plus the derived "custom" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetId {
    Aggressive,
    Balanced,
    Minimal,
    Custom,
}

impl PresetId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetId::Aggressive => "aggressive",
            PresetId::Balanced => "balanced",
            PresetId::Minimal => "minimal",
            PresetId::Custom => "custom",
        }
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browser variant the engine is running inside.
///
/// Sub-toggles and dynamic scripts declare which variants they apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    Chrome,
    Edge,
    Firefox,
    Unknown,
}

impl BrowserType {
    /// Detects the browser variant from a user-agent string.
    ///
    /// Edge must be checked before Chrome: Edge UAs contain both `Edg/` and `Chrome/`.
    pub fn from_user_agent(ua: &str) -> Self {
        if ua.contains("Firefox/") {
            BrowserType::Firefox
        } else if ua.contains("Edg/") {
            BrowserType::Edge
        } else if ua.contains("Chrome/") {
            BrowserType::Chrome
        } else {
            BrowserType::Unknown
        }
    }
}

fn default_true() -> bool {
    true
}

/// Master switch per category. Always fully populated — a stored record
/// missing a category deserializes with that category enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryToggles {
    #[serde(default = "default_true")]
    pub ai: bool,
    #[serde(default = "default_true")]
    pub sponsored: bool,
    #[serde(default = "default_true")]
    pub shopping: bool,
    #[serde(default = "default_true")]
    pub telemetry: bool,
    #[serde(default = "default_true")]
    pub annoyances: bool,
}

impl Default for CategoryToggles {
    fn default() -> Self {
        Self {
            ai: true,
            sponsored: true,
            shopping: true,
            telemetry: true,
            annoyances: true,
        }
    }
}

impl CategoryToggles {
    pub fn get(&self, id: CategoryId) -> bool {
        match id {
            CategoryId::Ai => self.ai,
            CategoryId::Sponsored => self.sponsored,
            CategoryId::Shopping => self.shopping,
            CategoryId::Telemetry => self.telemetry,
            CategoryId::Annoyances => self.annoyances,
        }
    }

    pub fn set(&mut self, id: CategoryId, enabled: bool) {
        match id {
            CategoryId::Ai => self.ai = enabled,
            CategoryId::Sponsored => self.sponsored = enabled,
            CategoryId::Shopping => self.shopping = enabled,
            CategoryId::Telemetry => self.telemetry = enabled,
            CategoryId::Annoyances => self.annoyances = enabled,
        }
    }
}

/// The single persisted settings record, one per installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Master toggles per category.
    pub categories: CategoryToggles,
    /// Sparse sub-toggle overrides: absent means "use the catalog default".
    pub sub_toggles: HashMap<String, bool>,
    /// Active preset; any manual toggle forces this to `custom`.
    pub preset: PresetId,
    /// Per-site whitelist: canonical host → exempted category ids.
    pub site_whitelist: BTreeMap<String, Vec<CategoryId>>,
    /// Absolute epoch-ms deadline while blocking is globally paused.
    pub pause_until: Option<i64>,
    /// Persisted schema version, stamped on every save.
    pub schema_version: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            categories: CategoryToggles::default(),
            sub_toggles: HashMap::new(),
            preset: PresetId::Aggressive,
            site_whitelist: BTreeMap::new(),
            pause_until: None,
            schema_version: crate::services::settings_store::SCHEMA_VERSION,
        }
    }
}

/// Shallow patch over a settings record. `sub_toggles` and `site_whitelist`
/// merge by key union; the other fields replace when present.
///
/// `pause_until` is doubly optional: the outer `None` leaves the field
/// untouched, `Some(None)` clears an active pause.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub categories: Option<CategoryToggles>,
    pub sub_toggles: Option<HashMap<String, bool>>,
    pub preset: Option<PresetId>,
    pub site_whitelist: Option<BTreeMap<String, Vec<CategoryId>>>,
    pub pause_until: Option<Option<i64>>,
}
