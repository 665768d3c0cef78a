//! Debloat — a content-filtering policy engine for de-cluttering browsers.
//!
//! Entry point: runs an interactive console demo walking every component.
//! The long-running protocol server lives in the `debloat-rpc` binary.

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                Debloat v{} — Demo Mode                     ║", env!("CARGO_PKG_VERSION"));
    println!("║     Content-filtering policy engine for cleaner browsing     ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_host_normalization();
    demo_settings_store();
    demo_policy_activator();
    demo_pause();
    demo_tab_telemetry();
    demo_hide_reporter();
    demo_app_core();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All 7 components demonstrated successfully!");
    println!("═══════════════════════════════════════════════════════════════");
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn demo_host_normalization() {
    use debloat::host::{host_from_url, normalize_host};
    section("Host Normalization");

    for raw in [
        "  WWW.Example.COM.  ",
        "https://Sub.Example.com/path?q=1",
        "example.com:8080",
        "münchen.de",
    ] {
        println!("  {:28} -> {}", format!("{:?}", raw), normalize_host(raw));
    }
    println!("  host_from_url: {:?}", host_from_url("https://www.example.com/a"));
    println!("  ✓ Host normalization OK");
    println!();
}

fn demo_settings_store() {
    use std::sync::Arc;
    use debloat::database::connection::Database;
    use debloat::services::settings_store::{SettingsStore, SettingsStoreTrait};
    use debloat::types::settings::CategoryId;
    section("Settings Store (migrating)");

    let db = Arc::new(Database::open_in_memory().expect("Failed to open database"));
    let store = SettingsStore::new(db);

    let settings = store.load().unwrap();
    println!("  Defaults: preset={}, schema v{}", settings.preset, settings.schema_version);

    store.toggle_category(CategoryId::Sponsored, false).unwrap();
    store
        .add_site_whitelist("https://WWW.Example.com/", &[CategoryId::Ai])
        .unwrap();
    store
        .add_site_whitelist("example.com", &[CategoryId::Sponsored])
        .unwrap();

    let settings = store.load().unwrap();
    println!("  After toggles: preset={}, sponsored={}", settings.preset, settings.categories.sponsored);
    println!("  Whitelist: {:?}", settings.site_whitelist);
    println!("  ✓ SettingsStore OK");
    println!();
}

fn demo_policy_activator() {
    use debloat::services::policy_activator::PolicyActivator;
    use debloat::services::rule_engine::{InMemoryRuleEngine, RuleEngine};
    use debloat::services::script_registry::InMemoryScriptRegistry;
    use debloat::types::settings::{BrowserType, Settings};
    section("Policy Activator");

    let settings = Settings::default();
    let mut rules = InMemoryRuleEngine::new();
    let mut scripts = InMemoryScriptRegistry::new();
    let mut activator = PolicyActivator::new(BrowserType::Edge);
    activator.set_host_permission(true);

    activator.reconcile(&settings, &mut rules, &mut scripts).unwrap();
    println!("  Enabled rule-groups: {:?}", rules.enabled_rule_groups().unwrap());
    println!("  Registered scripts: {:?}", scripts.registered_ids());

    let mut trimmed = settings.clone();
    trimmed.categories.ai = false;
    activator.reconcile(&trimmed, &mut rules, &mut scripts).unwrap();
    println!("  After disabling AI: {:?}", rules.enabled_rule_groups().unwrap());
    println!("  Scripts now: {:?}", scripts.registered_ids());
    println!("  ✓ PolicyActivator OK");
    println!();
}

fn demo_pause() {
    use std::sync::Arc;
    use debloat::database::connection::Database;
    use debloat::services::pause_controller::PauseController;
    use debloat::services::rule_engine::{InMemoryRuleEngine, RuleEngine};
    use debloat::services::settings_store::{SettingsStore, SettingsStoreTrait};
    section("Pause Controller");

    let db = Arc::new(Database::open_in_memory().unwrap());
    let store = SettingsStore::new(db);
    let mut rules = InMemoryRuleEngine::with_enabled(vec![
        "ai_endpoints".to_string(),
        "sponsored".to_string(),
    ]);
    let mut pause = PauseController::new();

    pause.pause(60_000, &store, &mut rules, 1_000).unwrap();
    println!("  Paused until {:?}; enabled groups: {:?}", pause.deadline(), rules.enabled_rule_groups().unwrap());
    println!("  pause_until persisted: {:?}", store.load().unwrap().pause_until);

    let fired = pause.poll(&store, 61_000).unwrap();
    println!("  Poll at deadline fired: {}; pause_until: {:?}", fired, store.load().unwrap().pause_until);
    println!("  ✓ PauseController OK");
    println!();
}

fn demo_tab_telemetry() {
    use debloat::managers::tab_telemetry::TabTelemetry;
    use debloat::services::badge::InMemoryBadge;
    use debloat::services::rule_engine::InMemoryRuleEngine;
    section("Tab Telemetry & Badge");

    let mut telemetry = TabTelemetry::new();
    let mut rules = InMemoryRuleEngine::new();
    let mut badge = InMemoryBadge::new();

    telemetry.on_navigation_committed(1, "https://www.example.com/");
    for i in 0..5 {
        rules.push_match(1, "sponsored", i);
    }
    telemetry.refresh(1, &rules, &mut badge, false, 1_000);
    println!("  After 5 blocks: count={}, badge={:?}", telemetry.get_count(1), badge.tab(1).unwrap());

    for i in 5..8 {
        rules.push_match(1, "ai_endpoints", i);
    }
    telemetry.refresh(1, &rules, &mut badge, false, 2_000);
    println!("  After 3 more: badge color {} (flash)", badge.tab(1).unwrap().color);

    telemetry.poll_flashes(&mut badge, 3_000);
    println!("  Flash reverted: {}", badge.tab(1).unwrap().color);
    println!("  Activity entries: {}", telemetry.get_activity(1).len());
    println!("  ✓ TabTelemetry OK");
    println!();
}

fn demo_hide_reporter() {
    use debloat::services::hide_reporter::{HideReporter, MessageSink};
    use debloat::types::errors::MessageError;
    use debloat::types::message::Message;
    use debloat::types::settings::CategoryId;
    section("Hide Reporter (debounced)");

    struct PrintSink;
    impl MessageSink for PrintSink {
        fn send(&mut self, message: &Message) -> Result<(), MessageError> {
            println!("  -> sent: {:?}", message);
            Ok(())
        }
    }

    let mut reporter = HideReporter::new(CategoryId::Annoyances, "example.com");
    let mut sink = PrintSink;
    reporter.track(1, 0);
    reporter.track(2, 100);
    reporter.track(2, 150); // duplicate element, not counted
    println!("  Tracked 3 events, {} pending", reporter.pending());
    reporter.poll(600, &mut sink);
    println!("  ✓ HideReporter OK");
    println!();
}

fn demo_app_core() {
    use std::sync::Arc;
    use debloat::app::App;
    use debloat::catalog::PAUSE_DURATION_MS;
    use debloat::database::connection::Database;
    use debloat::services::badge::InMemoryBadge;
    use debloat::services::rule_engine::InMemoryRuleEngine;
    use debloat::services::script_registry::InMemoryScriptRegistry;
    use debloat::types::settings::{BrowserType, PresetId};
    section("App Core (full lifecycle)");

    let mut app = App::new(
        Arc::new(Database::open_in_memory().unwrap()),
        Box::new(InMemoryRuleEngine::new()),
        Box::new(InMemoryScriptRegistry::new()),
        Box::new(InMemoryBadge::new()),
        BrowserType::Edge,
    );
    app.startup(0);
    println!("  Startup: restored pause state, reconciled to stored settings");

    app.apply_preset(PresetId::Balanced, 10).unwrap();
    println!("  Applied preset: balanced");

    app.handle_navigation(1, "https://www.example.com/", true, 20);
    app.set_active_tab(1, 20);
    println!("  Tab 1 navigated; count = {}", app.telemetry().get_count(1));

    app.pause_blocking(PAUSE_DURATION_MS, 100).unwrap();
    println!("  Paused for 1 hour");
    app.tick(100 + PAUSE_DURATION_MS);
    println!("  Tick past deadline: blocking restored");
    println!("  ✓ App Core OK");
}
