//! Static configuration catalog: categories, sub-toggles, rule-group
//! mappings, presets, dynamic script descriptors, and tuning constants.
//!
//! Everything here is data, not mutable state. The rule-group ids refer to
//! externally-defined blocking rule sets; their contents are opaque to the
//! engine.

use crate::services::script_registry::{ExecutionWorld, RunAt, ScriptDescriptor};
use crate::types::settings::{BrowserType, CategoryId, CategoryToggles, PresetId, Settings};

pub const BADGE_COLOR: &str = "#10B981";
pub const BADGE_FLASH_COLOR: &str = "#FFB347";
pub const BADGE_FLASH_MS: i64 = 600;
pub const BADGE_PAUSED_COLOR: &str = "#6B7280";
pub const BADGE_REFRESH_MS: u64 = 2000;
pub const ACTIVITY_BUFFER_SIZE: usize = 100;
pub const CSS_REPORT_DEBOUNCE_MS: i64 = 500;
/// Default pause duration: one hour.
pub const PAUSE_DURATION_MS: i64 = 60 * 60 * 1000;

/// A finer-grained override within a category, optionally tied to specific
/// rule-groups and browser variants. Empty `rule_group_ids` means the
/// sub-toggle is CSS/DOM-only.
#[derive(Debug, Clone, Copy)]
pub struct SubToggle {
    pub id: &'static str,
    pub label: &'static str,
    pub browsers: &'static [BrowserType],
    pub rule_group_ids: &'static [&'static str],
    pub default_enabled: bool,
}

/// A user-facing grouping of related intrusive behaviors with one master
/// toggle.
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub id: CategoryId,
    pub sub_toggles: &'static [SubToggle],
}

const CHROME: &[BrowserType] = &[BrowserType::Chrome];
const EDGE: &[BrowserType] = &[BrowserType::Edge];
const FIREFOX: &[BrowserType] = &[BrowserType::Firefox];
const CHROME_EDGE: &[BrowserType] = &[BrowserType::Chrome, BrowserType::Edge];
const ALL_BROWSERS: &[BrowserType] =
    &[BrowserType::Chrome, BrowserType::Edge, BrowserType::Firefox];

const fn sub(
    id: &'static str,
    label: &'static str,
    browsers: &'static [BrowserType],
    rule_group_ids: &'static [&'static str],
) -> SubToggle {
    SubToggle {
        id,
        label,
        browsers,
        rule_group_ids,
        default_enabled: true,
    }
}

static CATEGORIES: [Category; 5] = [
    Category {
        id: CategoryId::Ai,
        sub_toggles: &[
            sub("ai_overview", "Google AI Overview", CHROME_EDGE, &[]),
            sub("ai_mode", "Google AI Mode", CHROME_EDGE, &[]),
            sub("gemini_suggestions", "Gemini suggestions", CHROME, &["ai_endpoints"]),
            sub("help_me_write", "Help Me Write / Rewrite with Copilot", EDGE, &[]),
            sub("copilot_sidebar", "Copilot sidebar & toolbar icon", EDGE, &["ai_endpoints"]),
            sub("copilot_context", "Copilot page context access", EDGE, &[]),
            sub("visual_search", "Visual Search overlay", EDGE, &[]),
            sub("ai_history", "AI History Search", CHROME_EDGE, &[]),
            sub("text_prediction", "Text Prediction (Turing)", EDGE, &["ai_endpoints"]),
            sub("ai_tabs", "AI Tab Compare / Organization", CHROME_EDGE, &[]),
            sub("window_ai", "Web AI APIs (window.ai)", EDGE, &[]),
            sub("ai_sidebar_ff", "AI sidebar & chatbots", FIREFOX, &[]),
            sub("ai_previews_ff", "AI link previews", FIREFOX, &[]),
            sub("ai_tabgroup_ff", "AI tab group suggestions", FIREFOX, &[]),
        ],
    },
    Category {
        id: CategoryId::Sponsored,
        sub_toggles: &[
            sub("msn_feed", "MSN / News feed on NTP", EDGE, &["sponsored"]),
            sub("sponsored_tiles", "Sponsored Top Sites on NTP", EDGE, &[]),
            sub("spotlight", "Spotlight experiences & recommendations", EDGE, &[]),
            sub("ff_sponsored_stories", "Sponsored Stories on Firefox Home", FIREFOX, &[]),
            sub("ff_sponsored_tiles", "Sponsored Top Sites on Firefox Home", FIREFOX, &[]),
            sub("ff_recommended", "Recommended Stories on Firefox Home", FIREFOX, &[]),
            sub("chrome_discover", "Google Discover-style cards", CHROME, &[]),
            sub("ff_perplexity", "Perplexity in search engines", FIREFOX, &[]),
        ],
    },
    Category {
        id: CategoryId::Shopping,
        sub_toggles: &[
            sub("shopping_assistant", "Shopping Assistant", EDGE, &["shopping"]),
            sub("price_compare", "Price comparison popups", EDGE, &[]),
            sub("coupons", "Coupons & rebates notifications", EDGE, &[]),
            sub("express_checkout", "Express checkout suggestions", EDGE, &[]),
        ],
    },
    Category {
        id: CategoryId::Telemetry,
        sub_toggles: &[
            sub("tele_chrome", "Google diagnostic endpoints", CHROME, &["telemetry_chrome"]),
            sub("tele_edge", "Microsoft diagnostic data", EDGE, &["telemetry_edge"]),
            sub("tele_firefox", "Mozilla telemetry", FIREFOX, &["telemetry_firefox"]),
            sub("ff_studies", "Firefox Studies (Shield)", FIREFOX, &["telemetry_firefox"]),
            sub("crash_reporting", "Usage/crash reporting endpoints", ALL_BROWSERS, &[]),
        ],
    },
    Category {
        id: CategoryId::Annoyances,
        sub_toggles: &[
            sub("rewards", "Microsoft Rewards prompts", EDGE, &[]),
            sub("feature_banners", "Feature recommendation banners", EDGE, &[]),
            sub("acrobat_button", "\"Edit with Acrobat\" button", EDGE, &[]),
            sub("default_prompt", "\"Set as default browser\" prompts", CHROME_EDGE, &[]),
            sub("dalle_themes", "DALL-E / AI theme suggestions", EDGE, &[]),
            sub("bing_redirect", "NTP search box redirect to Bing", EDGE, &[]),
            sub("auto_signin", "Auto browser sign-in prompt", EDGE, &[]),
        ],
    },
];

pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

/// Rule-groups governed by each category's master toggle. Annoyances has no
/// rule-groups — it is CSS/DOM-only.
pub fn rule_groups_for(category: CategoryId) -> &'static [&'static str] {
    match category {
        CategoryId::Ai => &["ai_endpoints"],
        CategoryId::Sponsored => &["sponsored"],
        CategoryId::Shopping => &["shopping"],
        CategoryId::Telemetry => &["telemetry_chrome", "telemetry_edge", "telemetry_firefox"],
        CategoryId::Annoyances => &[],
    }
}

/// Reverse lookup: rule-group id → category. Unknown groups resolve to
/// `None` and are not user-facing.
pub fn category_for_rule_group(rule_group_id: &str) -> Option<CategoryId> {
    CategoryId::ALL
        .into_iter()
        .find(|c| rule_groups_for(*c).contains(&rule_group_id))
}

/// Category toggles a preset expands to. `custom` is never applied as a
/// bundle; it reports the same shape as `aggressive` for completeness.
pub fn preset_categories(preset: PresetId) -> CategoryToggles {
    match preset {
        PresetId::Aggressive | PresetId::Custom => CategoryToggles {
            ai: true,
            sponsored: true,
            shopping: true,
            telemetry: true,
            annoyances: true,
        },
        PresetId::Balanced => CategoryToggles {
            ai: true,
            sponsored: false,
            shopping: false,
            telemetry: true,
            annoyances: false,
        },
        PresetId::Minimal => CategoryToggles {
            ai: false,
            sponsored: false,
            shopping: false,
            telemetry: true,
            annoyances: false,
        },
    }
}

/// Looks up a sub-toggle descriptor by id across all categories.
pub fn find_sub_toggle(id: &str) -> Option<&'static SubToggle> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.sub_toggles.iter())
        .find(|s| s.id == id)
}

/// Effective state of a sub-toggle: the sparse override when present,
/// otherwise the catalog default. Unknown ids are off.
pub fn sub_toggle_enabled(settings: &Settings, id: &str) -> bool {
    if let Some(enabled) = settings.sub_toggles.get(id) {
        return *enabled;
    }
    find_sub_toggle(id).map(|s| s.default_enabled).unwrap_or(false)
}

/// A page script registered and unregistered at runtime based on settings,
/// not declared in the static manifest.
#[derive(Debug, Clone, Copy)]
pub struct DynamicScript {
    pub id: &'static str,
    pub matches: &'static [&'static str],
    pub run_at: RunAt,
    pub world: ExecutionWorld,
    /// Browser variants the script targets.
    pub browsers: &'static [BrowserType],
    /// Whether registration needs the optional broad host permission.
    pub requires_host_permission: bool,
    /// Settings part of the activation predicate, evaluated fresh on every
    /// reconciliation pass.
    pub enabled_by: fn(&Settings) -> bool,
}

impl DynamicScript {
    pub fn descriptor(&self) -> ScriptDescriptor {
        ScriptDescriptor {
            id: self.id.to_string(),
            matches: self.matches.iter().map(|m| m.to_string()).collect(),
            run_at: self.run_at,
            world: self.world,
        }
    }
}

static DYNAMIC_SCRIPTS: [DynamicScript; 2] = [
    // Freezes window.ai / navigator.ai before page scripts run.
    DynamicScript {
        id: "ai_apis",
        matches: &["<all_urls>"],
        run_at: RunAt::DocumentStart,
        world: ExecutionWorld::Main,
        browsers: EDGE,
        requires_host_permission: true,
        enabled_by: |s| s.categories.ai && sub_toggle_enabled(s, "window_ai"),
    },
    // Hides Copilot / Shopping overlays injected into arbitrary pages.
    DynamicScript {
        id: "edge_ui",
        matches: &["<all_urls>"],
        run_at: RunAt::DocumentIdle,
        world: ExecutionWorld::Isolated,
        browsers: EDGE,
        requires_host_permission: true,
        enabled_by: |s| {
            (s.categories.ai && sub_toggle_enabled(s, "copilot_sidebar"))
                || (s.categories.shopping && sub_toggle_enabled(s, "shopping_assistant"))
        },
    },
];

pub fn dynamic_scripts() -> &'static [DynamicScript] {
    &DYNAMIC_SCRIPTS
}
