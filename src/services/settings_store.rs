//! Settings store: the persisted configuration record, its schema
//! versioning, and the mutation operations the UI and message layer call.
//!
//! Migration is a pure transform applied unconditionally on every load, so
//! re-running it is always safe. Persistence errors propagate to the caller;
//! malformed stored data degrades to defaults instead of failing.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::database::connection::StorageBackend;
use crate::host::normalize_host;
use crate::types::errors::SettingsError;
use crate::types::settings::{CategoryId, CategoryToggles, PresetId, Settings, SettingsPatch};

pub const STORAGE_KEY: &str = "settings";
pub const SCHEMA_VERSION: u32 = 2;

/// Trait defining the settings store interface.
pub trait SettingsStoreTrait {
    fn load(&self) -> Result<Settings, SettingsError>;
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
    fn patch(&self, patch: SettingsPatch) -> Result<Settings, SettingsError>;
    fn toggle_category(&self, id: CategoryId, enabled: bool) -> Result<Settings, SettingsError>;
    fn toggle_sub_toggle(&self, id: &str, enabled: bool) -> Result<Settings, SettingsError>;
    fn add_site_whitelist(
        &self,
        domain: &str,
        categories: &[CategoryId],
    ) -> Result<(), SettingsError>;
    fn remove_site_whitelist(&self, domain: &str) -> Result<(), SettingsError>;
}

/// Settings store persisting one JSON record through a [`StorageBackend`].
pub struct SettingsStore {
    storage: Arc<dyn StorageBackend>,
}

/// Migrates a stored record of any prior shape to the canonical current
/// shape: default-fills every field, accepts the v1 flat category booleans,
/// re-normalizes whitelist keys (unioning keys that normalize identically),
/// and stamps the schema version.
pub fn migrate_settings(stored: Option<&Value>) -> Settings {
    let mut merged = Settings::default();
    merged.schema_version = SCHEMA_VERSION;

    let map = match stored.and_then(|v| v.as_object()) {
        Some(m) => m,
        None => return merged,
    };

    if let Some(c) = map
        .get("categories")
        .and_then(|v| serde_json::from_value::<CategoryToggles>(v.clone()).ok())
    {
        merged.categories = c;
    } else {
        // v1 records stored the category booleans flat at the top level.
        for id in CategoryId::ALL {
            if let Some(enabled) = map.get(id.as_str()).and_then(Value::as_bool) {
                merged.categories.set(id, enabled);
            }
        }
    }

    if let Some(overrides) = map
        .get("sub_toggles")
        .and_then(|v| serde_json::from_value::<HashMap<String, bool>>(v.clone()).ok())
    {
        merged.sub_toggles.extend(overrides);
    }

    if let Some(preset) = map
        .get("preset")
        .and_then(|v| serde_json::from_value::<PresetId>(v.clone()).ok())
    {
        merged.preset = preset;
    }

    if let Some(pause) = map
        .get("pause_until")
        .and_then(|v| serde_json::from_value::<Option<i64>>(v.clone()).ok())
    {
        merged.pause_until = pause;
    }

    if let Some(whitelist) = map.get("site_whitelist").and_then(|v| v.as_object()) {
        for (host, value) in whitelist {
            let normalized = normalize_host(host);
            let categories: Vec<CategoryId> = value
                .as_array()
                .map(|arr| {
                    arr.iter()
                        .filter_map(|c| serde_json::from_value(c.clone()).ok())
                        .collect()
                })
                .unwrap_or_default();
            let entry = merged.site_whitelist.entry(normalized).or_default();
            for category in categories {
                if !entry.contains(&category) {
                    entry.push(category);
                }
            }
        }
    }

    merged
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }
}

impl SettingsStoreTrait for SettingsStore {
    /// Reads the persisted record, migrates it to the canonical shape,
    /// writes the migrated form back, and returns it.
    fn load(&self) -> Result<Settings, SettingsError> {
        let stored = self
            .storage
            .read_value(STORAGE_KEY)
            .map_err(|e| SettingsError::Storage(e.to_string()))?;
        let migrated = migrate_settings(stored.as_ref());
        self.save(&migrated)?;
        Ok(migrated)
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let mut record = settings.clone();
        record.schema_version = SCHEMA_VERSION;
        let value =
            serde_json::to_value(&record).map_err(|e| SettingsError::Serialization(e.to_string()))?;
        self.storage
            .write_value(STORAGE_KEY, &value)
            .map_err(|e| SettingsError::Storage(e.to_string()))
    }

    /// Shallow-merges the patch over the current record, merging sub-toggle
    /// overrides and whitelist entries by key union rather than replacement,
    /// then re-runs migration and persists the result.
    fn patch(&self, patch: SettingsPatch) -> Result<Settings, SettingsError> {
        let mut current = self.load()?;
        if let Some(categories) = patch.categories {
            current.categories = categories;
        }
        if let Some(overrides) = patch.sub_toggles {
            current.sub_toggles.extend(overrides);
        }
        if let Some(preset) = patch.preset {
            current.preset = preset;
        }
        if let Some(whitelist) = patch.site_whitelist {
            for (host, categories) in whitelist {
                let entry = current
                    .site_whitelist
                    .entry(normalize_host(&host))
                    .or_default();
                for category in categories {
                    if !entry.contains(&category) {
                        entry.push(category);
                    }
                }
            }
        }
        if let Some(pause_until) = patch.pause_until {
            current.pause_until = pause_until;
        }

        let value =
            serde_json::to_value(&current).map_err(|e| SettingsError::Serialization(e.to_string()))?;
        let migrated = migrate_settings(Some(&value));
        self.save(&migrated)?;
        Ok(migrated)
    }

    /// Sets a category master switch. Any manual toggle invalidates a
    /// non-custom preset label.
    fn toggle_category(&self, id: CategoryId, enabled: bool) -> Result<Settings, SettingsError> {
        let mut current = self.load()?;
        current.categories.set(id, enabled);
        current.preset = PresetId::Custom;
        self.save(&current)?;
        Ok(current)
    }

    fn toggle_sub_toggle(&self, id: &str, enabled: bool) -> Result<Settings, SettingsError> {
        let mut current = self.load()?;
        current.sub_toggles.insert(id.to_string(), enabled);
        current.preset = PresetId::Custom;
        self.save(&current)?;
        Ok(current)
    }

    /// Unions the given categories into the host's whitelist entry; existing
    /// entries for other categories are never removed.
    fn add_site_whitelist(
        &self,
        domain: &str,
        categories: &[CategoryId],
    ) -> Result<(), SettingsError> {
        let mut current = self.load()?;
        let entry = current
            .site_whitelist
            .entry(normalize_host(domain))
            .or_default();
        for category in categories {
            if !entry.contains(category) {
                entry.push(*category);
            }
        }
        self.save(&current)
    }

    fn remove_site_whitelist(&self, domain: &str) -> Result<(), SettingsError> {
        let mut current = self.load()?;
        current.site_whitelist.remove(&normalize_host(domain));
        self.save(&current)
    }
}
