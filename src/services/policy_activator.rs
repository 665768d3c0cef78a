//! Policy activator: derives the active rule-groups and dynamic scripts
//! from the settings record and pushes that state to the collaborators.
//!
//! Reconciliation is a full recompute from the settings record alone, never
//! an incremental diff against remembered state, so it converges after any
//! missed or reordered update.

use crate::catalog::{dynamic_scripts, rule_groups_for};
use crate::types::errors::RuleEngineError;
use crate::types::settings::{BrowserType, CategoryId, Settings};

use super::rule_engine::RuleEngine;
use super::script_registry::ScriptRegistry;

/// Reconciles desired blocking state against the rule engine and script
/// registry for one browser environment.
pub struct PolicyActivator {
    browser: BrowserType,
    host_permission_granted: bool,
}

impl PolicyActivator {
    pub fn new(browser: BrowserType) -> Self {
        Self {
            browser,
            host_permission_granted: false,
        }
    }

    pub fn browser(&self) -> BrowserType {
        self.browser
    }

    /// Records whether broad host permissions are granted. Scripts that
    /// need them are unregistered on the next reconcile when revoked.
    pub fn set_host_permission(&mut self, granted: bool) {
        self.host_permission_granted = granted;
    }

    /// Recomputes the full desired state from the settings record and
    /// applies it: one batched rule-group update, then idempotent script
    /// registration. Script failures are swallowed so one bad descriptor
    /// cannot block the rule update or the remaining scripts.
    pub fn reconcile(
        &self,
        settings: &Settings,
        rules: &mut dyn RuleEngine,
        scripts: &mut dyn ScriptRegistry,
    ) -> Result<(), RuleEngineError> {
        let mut enable = Vec::new();
        let mut disable = Vec::new();
        for id in CategoryId::ALL {
            let target = if settings.categories.get(id) {
                &mut enable
            } else {
                &mut disable
            };
            for group in rule_groups_for(id) {
                target.push((*group).to_string());
            }
        }
        rules.update_enabled_rule_groups(&enable, &disable)?;

        for script in dynamic_scripts() {
            let active = script.browsers.contains(&self.browser)
                && (!script.requires_host_permission || self.host_permission_granted)
                && (script.enabled_by)(settings);
            let registered = scripts.is_registered(script.id);
            if active && !registered {
                let _ = scripts.register(&script.descriptor());
            } else if !active && registered {
                let _ = scripts.unregister(script.id);
            }
        }

        Ok(())
    }

    /// Fast path for a single category flip: touches only that category's
    /// rule-groups. Categories with no rule-groups are a no-op here; their
    /// effect is script-only and handled by the next full reconcile.
    pub fn set_category(
        &self,
        id: CategoryId,
        enabled: bool,
        rules: &mut dyn RuleEngine,
    ) -> Result<(), RuleEngineError> {
        let groups: Vec<String> = rule_groups_for(id)
            .iter()
            .map(|g| (*g).to_string())
            .collect();
        if groups.is_empty() {
            return Ok(());
        }
        if enabled {
            rules.update_enabled_rule_groups(&groups, &[])
        } else {
            rules.update_enabled_rule_groups(&[], &groups)
        }
    }
}
