//! Central application state wiring the services together.
//!
//! `App` owns the settings store and the collaborator handles and exposes
//! the event-shaped entry points the hosting layer calls: startup, the
//! periodic tick, navigation and tab lifecycle events, and the settings
//! mutations behind the message protocol.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::catalog::preset_categories;
use crate::database::connection::StorageBackend;
use crate::managers::tab_telemetry::TabTelemetry;
use crate::services::badge::BadgeSurface;
use crate::services::pause_controller::PauseController;
use crate::services::policy_activator::PolicyActivator;
use crate::services::rule_engine::RuleEngine;
use crate::services::script_registry::ScriptRegistry;
use crate::services::settings_store::{SettingsStore, SettingsStoreTrait};
use crate::types::activity::TabId;
use crate::types::errors::{PauseError, SettingsError};
use crate::types::settings::{BrowserType, CategoryId, PresetId, SettingsPatch};

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

pub struct App {
    settings_store: SettingsStore,
    policy: PolicyActivator,
    pause: PauseController,
    telemetry: TabTelemetry,
    rule_engine: Box<dyn RuleEngine>,
    script_registry: Box<dyn ScriptRegistry>,
    badge: Box<dyn BadgeSurface>,
    active_tab: Option<TabId>,
}

impl App {
    pub fn new(
        storage: Arc<dyn StorageBackend>,
        rule_engine: Box<dyn RuleEngine>,
        script_registry: Box<dyn ScriptRegistry>,
        badge: Box<dyn BadgeSurface>,
        browser: BrowserType,
    ) -> Self {
        Self {
            settings_store: SettingsStore::new(storage),
            policy: PolicyActivator::new(browser),
            pause: PauseController::new(),
            telemetry: TabTelemetry::new(),
            rule_engine,
            script_registry,
            badge,
            active_tab: None,
        }
    }

    pub fn telemetry(&self) -> &TabTelemetry {
        &self.telemetry
    }

    pub fn settings_store(&self) -> &SettingsStore {
        &self.settings_store
    }

    pub fn set_host_permission(&mut self, granted: bool, now: i64) {
        self.policy.set_host_permission(granted);
        let _ = self.apply_settings_change(now);
    }

    /// Startup sequence: restore any persisted pause, then either show the
    /// paused badge or reconcile to the stored settings. Failures here are
    /// swallowed; the periodic tick converges later.
    pub fn startup(&mut self, now: i64) {
        match self
            .pause
            .restore(&self.settings_store, self.rule_engine.as_mut(), now)
        {
            Ok(true) => TabTelemetry::show_paused_badge(self.badge.as_mut()),
            Ok(false) => {
                let _ = self.apply_settings_change(now);
            }
            Err(_) => {}
        }
    }

    /// Periodic tick: fires an expired pause, reverts expired badge flashes,
    /// and refreshes the active tab's telemetry.
    pub fn tick(&mut self, now: i64) {
        if let Ok(true) = self.pause.poll(&self.settings_store, now) {
            TabTelemetry::clear_paused_badge(self.badge.as_mut());
            let _ = self.apply_settings_change(now);
        }
        self.telemetry.poll_flashes(self.badge.as_mut(), now);
        if let Some(tab) = self.active_tab {
            self.refresh_tab(tab, now);
        }
    }

    pub fn handle_navigation(&mut self, tab: TabId, url: &str, top_frame: bool, now: i64) {
        if !top_frame {
            return;
        }
        self.telemetry.on_navigation_committed(tab, url);
        self.refresh_tab(tab, now);
    }

    pub fn handle_tab_closed(&mut self, tab: TabId) {
        self.telemetry.on_tab_closed(tab);
        if self.active_tab == Some(tab) {
            self.active_tab = None;
        }
    }

    pub fn set_active_tab(&mut self, tab: TabId, now: i64) {
        self.active_tab = Some(tab);
        self.refresh_tab(tab, now);
    }

    pub fn refresh_tab(&mut self, tab: TabId, now: i64) {
        let paused = self.is_paused_now(now);
        self.telemetry.refresh(
            tab,
            self.rule_engine.as_ref(),
            self.badge.as_mut(),
            paused,
            now,
        );
    }

    /// Re-reads the settings record and converges the collaborators on it.
    /// While paused the rule engine is left disabled and only the badge is
    /// kept in the paused presentation.
    pub fn apply_settings_change(&mut self, now: i64) -> Result<(), SettingsError> {
        let settings = self.settings_store.load()?;
        if PauseController::is_paused(&settings, now) {
            TabTelemetry::show_paused_badge(self.badge.as_mut());
        } else {
            let _ = self.policy.reconcile(
                &settings,
                self.rule_engine.as_mut(),
                self.script_registry.as_mut(),
            );
        }
        Ok(())
    }

    pub fn pause_blocking(&mut self, duration_ms: i64, now: i64) -> Result<(), PauseError> {
        self.pause
            .pause(duration_ms, &self.settings_store, self.rule_engine.as_mut(), now)?;
        TabTelemetry::show_paused_badge(self.badge.as_mut());
        Ok(())
    }

    pub fn unpause_blocking(&mut self, now: i64) -> Result<(), PauseError> {
        self.pause.unpause(&self.settings_store)?;
        TabTelemetry::clear_paused_badge(self.badge.as_mut());
        self.apply_settings_change(now)
            .map_err(|e| PauseError::Settings(e.to_string()))
    }

    /// Applies a preset bundle: replaces the category toggles and records
    /// the preset label, then reconciles.
    pub fn apply_preset(&mut self, preset: PresetId, now: i64) -> Result<(), SettingsError> {
        self.settings_store.patch(SettingsPatch {
            categories: Some(preset_categories(preset)),
            preset: Some(preset),
            ..Default::default()
        })?;
        self.apply_settings_change(now)
    }

    /// Flips one category: persists the toggle, applies the flip to the rule
    /// engine immediately, then runs the full reconcile to converge scripts.
    pub fn set_category(
        &mut self,
        id: CategoryId,
        enabled: bool,
        now: i64,
    ) -> Result<(), SettingsError> {
        self.settings_store.toggle_category(id, enabled)?;
        if !self.is_paused_now(now) {
            let _ = self
                .policy
                .set_category(id, enabled, self.rule_engine.as_mut());
        }
        self.apply_settings_change(now)
    }

    pub fn set_sub_toggle(
        &mut self,
        id: &str,
        enabled: bool,
        now: i64,
    ) -> Result<(), SettingsError> {
        self.settings_store.toggle_sub_toggle(id, enabled)?;
        self.apply_settings_change(now)
    }

    pub fn whitelist_site(
        &mut self,
        domain: &str,
        categories: &[CategoryId],
        now: i64,
    ) -> Result<(), SettingsError> {
        self.settings_store.add_site_whitelist(domain, categories)?;
        self.apply_settings_change(now)
    }

    pub fn unwhitelist_site(&mut self, domain: &str, now: i64) -> Result<(), SettingsError> {
        self.settings_store.remove_site_whitelist(domain)?;
        self.apply_settings_change(now)
    }

    pub fn record_hidden(
        &mut self,
        tab: TabId,
        domain: &str,
        count: u32,
        category: CategoryId,
        now: i64,
    ) {
        self.telemetry.record_hidden(tab, domain, count, category, now);
    }

    fn is_paused_now(&self, now: i64) -> bool {
        self.pause.deadline().map_or(false, |until| until > now)
    }
}
