//! Pause controller: temporary global suspension of all blocking.
//!
//! The pause deadline is persisted in the settings record so it survives a
//! process restart; the in-memory deadline is only the wakeup intent, polled
//! by the host loop rather than held as a timer handle.

use crate::types::errors::PauseError;
use crate::types::settings::{Settings, SettingsPatch};

use super::rule_engine::RuleEngine;
use super::settings_store::SettingsStoreTrait;

/// Drives pause/unpause transitions against the settings store and rule
/// engine. Script teardown rides on the settings-change reconcile the caller
/// performs after every transition.
#[derive(Debug, Default)]
pub struct PauseController {
    deadline: Option<i64>,
}

impl PauseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a settings record marks blocking as paused at `now`.
    pub fn is_paused(settings: &Settings, now: i64) -> bool {
        settings.pause_until.map_or(false, |until| until > now)
    }

    pub fn deadline(&self) -> Option<i64> {
        self.deadline
    }

    /// Persists the pause deadline, disables every enabled rule-group in one
    /// batched update, and arms the in-memory wakeup.
    pub fn pause(
        &mut self,
        duration_ms: i64,
        store: &dyn SettingsStoreTrait,
        rules: &mut dyn RuleEngine,
        now: i64,
    ) -> Result<(), PauseError> {
        let until = now + duration_ms;
        store
            .patch(SettingsPatch {
                pause_until: Some(Some(until)),
                ..Default::default()
            })
            .map_err(|e| PauseError::Settings(e.to_string()))?;
        Self::disable_all(rules)?;
        self.deadline = Some(until);
        Ok(())
    }

    /// Clears the persisted deadline and the wakeup. Re-enabling rules and
    /// scripts is the caller's settings-change reconcile, not done here.
    pub fn unpause(&mut self, store: &dyn SettingsStoreTrait) -> Result<(), PauseError> {
        self.deadline = None;
        store
            .patch(SettingsPatch {
                pause_until: Some(None),
                ..Default::default()
            })
            .map_err(|e| PauseError::Settings(e.to_string()))?;
        Ok(())
    }

    /// Restores pause state after a restart. An expired deadline unpauses;
    /// a live one re-disables whatever groups came back enabled and re-arms
    /// the remaining wait. Returns whether blocking is paused.
    pub fn restore(
        &mut self,
        store: &dyn SettingsStoreTrait,
        rules: &mut dyn RuleEngine,
        now: i64,
    ) -> Result<bool, PauseError> {
        let settings = store
            .load()
            .map_err(|e| PauseError::Settings(e.to_string()))?;
        match settings.pause_until {
            Some(until) if until > now => {
                Self::disable_all(rules)?;
                self.deadline = Some(until);
                Ok(true)
            }
            Some(_) => {
                self.unpause(store)?;
                Ok(false)
            }
            None => {
                self.deadline = None;
                Ok(false)
            }
        }
    }

    /// Fires the wakeup when its deadline has passed. Returns whether an
    /// unpause happened; the caller follows up with a reconcile.
    pub fn poll(&mut self, store: &dyn SettingsStoreTrait, now: i64) -> Result<bool, PauseError> {
        match self.deadline {
            Some(until) if until <= now => {
                self.unpause(store)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn disable_all(rules: &mut dyn RuleEngine) -> Result<(), PauseError> {
        let enabled = rules
            .enabled_rule_groups()
            .map_err(|e| PauseError::RuleEngine(e.to_string()))?;
        if enabled.is_empty() {
            return Ok(());
        }
        rules
            .update_enabled_rule_groups(&[], &enabled)
            .map_err(|e| PauseError::RuleEngine(e.to_string()))
    }
}
