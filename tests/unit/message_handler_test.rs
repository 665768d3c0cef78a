//! Unit tests for the message protocol end to end against a full `App`.

use std::sync::{Arc, Mutex};

use debloat::app::App;
use debloat::database::connection::Database;
use debloat::message_handler::handle_message;
use debloat::services::badge::InMemoryBadge;
use debloat::services::rule_engine::InMemoryRuleEngine;
use debloat::services::script_registry::InMemoryScriptRegistry;
use debloat::services::settings_store::SettingsStoreTrait;
use debloat::types::message::{Message, MessageResponse};
use debloat::types::settings::{BrowserType, CategoryId};

fn started_app() -> Mutex<App> {
    let mut app = App::new(
        Arc::new(Database::open_in_memory().unwrap()),
        Box::new(InMemoryRuleEngine::new()),
        Box::new(InMemoryScriptRegistry::new()),
        Box::new(InMemoryBadge::new()),
        BrowserType::Edge,
    );
    app.startup(0);
    Mutex::new(app)
}

#[test]
fn tab_count_for_fresh_tab_is_zero() {
    let app = started_app();
    let response = handle_message(&app, &Message::GetTabCount { tab_id: 1 }, None).unwrap();
    assert_eq!(response, MessageResponse::TabCount { count: 0 });
}

#[test]
fn activity_reflects_css_hidden_reports() {
    let app = started_app();
    let report = Message::ReportCssHidden {
        domain: "example.com".to_string(),
        count: 3,
        category: CategoryId::Sponsored,
    };
    assert_eq!(
        handle_message(&app, &report, Some(4)).unwrap(),
        MessageResponse::Ok
    );

    let response = handle_message(&app, &Message::GetActivity { tab_id: 4 }, None).unwrap();
    match response {
        MessageResponse::Activity { entries } => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries[0].domain, "example.com");
            assert_eq!(entries[0].count, Some(3));
            assert_eq!(entries[0].category, CategoryId::Sponsored);
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[test]
fn css_hidden_without_sender_tab_is_rejected() {
    let app = started_app();
    let report = Message::ReportCssHidden {
        domain: "example.com".to_string(),
        count: 1,
        category: CategoryId::Ai,
    };
    let err = handle_message(&app, &report, None).unwrap_err();
    assert!(err.contains("sender tab"));
}

#[test]
fn pause_message_persists_and_unpause_clears() {
    let app = started_app();
    handle_message(&app, &Message::Pause { duration_ms: 30_000 }, None).unwrap();
    {
        let app = app.lock().unwrap();
        let settings = app.settings_store().load().unwrap();
        assert!(settings.pause_until.is_some());
    }

    handle_message(&app, &Message::Unpause, None).unwrap();
    let app = app.lock().unwrap();
    assert_eq!(app.settings_store().load().unwrap().pause_until, None);
}

#[test]
fn whitelist_messages_normalize_the_domain() {
    let app = started_app();
    handle_message(
        &app,
        &Message::WhitelistSite {
            domain: "https://WWW.Example.com/page".to_string(),
            categories: vec![CategoryId::Ai, CategoryId::Shopping],
        },
        None,
    )
    .unwrap();

    {
        let app = app.lock().unwrap();
        let settings = app.settings_store().load().unwrap();
        assert_eq!(
            settings.site_whitelist.get("example.com"),
            Some(&vec![CategoryId::Ai, CategoryId::Shopping])
        );
    }

    // Unwhitelist accepts any spelling of the same host.
    handle_message(
        &app,
        &Message::UnwhitelistSite {
            domain: "Example.COM.".to_string(),
        },
        None,
    )
    .unwrap();
    let app = app.lock().unwrap();
    assert!(app.settings_store().load().unwrap().site_whitelist.is_empty());
}

#[test]
fn unknown_wire_shapes_fail_deserialization() {
    let result: Result<Message, _> =
        serde_json::from_str(r#"{"type":"FORMAT_DISK","target":"/"}"#);
    assert!(result.is_err());
}
