//! Dynamic page-script registry interface.
//!
//! Scripts not declared in the static manifest are registered and
//! unregistered at runtime by the policy activator. Script contents are out
//! of scope — the core only controls which descriptors are registered.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::errors::ScriptError;

/// Lifecycle phase a dynamic script runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunAt {
    DocumentStart,
    DocumentIdle,
}

/// Execution world the script is injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionWorld {
    Main,
    Isolated,
}

/// Registration payload for one dynamic script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptDescriptor {
    pub id: String,
    pub matches: Vec<String>,
    pub run_at: RunAt,
    pub world: ExecutionWorld,
}

/// Trait defining the script registry operations the core consumes.
///
/// Callers must treat register/unregister as idempotent toggles guarded by
/// `is_registered` — blind double registration is an error in real browsers.
pub trait ScriptRegistry {
    fn register(&mut self, script: &ScriptDescriptor) -> Result<(), ScriptError>;
    fn unregister(&mut self, id: &str) -> Result<(), ScriptError>;
    fn is_registered(&self, id: &str) -> bool;
}

/// In-memory registry mirroring browser duplicate-registration semantics.
#[derive(Debug, Default)]
pub struct InMemoryScriptRegistry {
    scripts: HashMap<String, ScriptDescriptor>,
}

impl InMemoryScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registered_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.scripts.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl ScriptRegistry for InMemoryScriptRegistry {
    fn register(&mut self, script: &ScriptDescriptor) -> Result<(), ScriptError> {
        if self.scripts.contains_key(&script.id) {
            return Err(ScriptError::RegistrationFailed(format!(
                "duplicate script id: {}",
                script.id
            )));
        }
        self.scripts.insert(script.id.clone(), script.clone());
        Ok(())
    }

    fn unregister(&mut self, id: &str) -> Result<(), ScriptError> {
        match self.scripts.remove(id) {
            Some(_) => Ok(()),
            None => Err(ScriptError::RegistrationFailed(format!(
                "script not registered: {}",
                id
            ))),
        }
    }

    fn is_registered(&self, id: &str) -> bool {
        self.scripts.contains_key(id)
    }
}
