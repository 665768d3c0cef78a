use std::fmt;

// === StorageError ===

/// Errors from the single-key persistence backend.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    Database(String),
    /// Stored payload could not be encoded or decoded.
    Encoding(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Database(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::Encoding(msg) => write!(f, "Storage encoding error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

// === SettingsError ===

/// Errors from the settings store. Persistence failures propagate to the
/// caller — a failed settings mutation must be visible to whoever asked.
#[derive(Debug)]
pub enum SettingsError {
    /// Read or write on the persistence layer failed.
    Storage(String),
    /// Failed to serialize or deserialize the settings record.
    Serialization(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Storage(msg) => write!(f, "Settings storage error: {}", msg),
            SettingsError::Serialization(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === RuleEngineError ===

/// Errors from the external rule-matching engine.
#[derive(Debug)]
pub enum RuleEngineError {
    /// The batched enable/disable update was rejected.
    UpdateFailed(String),
    /// A query against the engine failed (e.g. the tab no longer exists).
    QueryFailed(String),
}

impl fmt::Display for RuleEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleEngineError::UpdateFailed(msg) => write!(f, "Rule update failed: {}", msg),
            RuleEngineError::QueryFailed(msg) => write!(f, "Rule query failed: {}", msg),
        }
    }
}

impl std::error::Error for RuleEngineError {}

// === ScriptError ===

/// Errors from the dynamic script registry. Always swallowed at the call
/// site — a missing dynamic script is a degraded feature, not a failure.
#[derive(Debug)]
pub enum ScriptError {
    /// Registration or unregistration was rejected.
    RegistrationFailed(String),
    /// Dynamic registration is not supported in this browser build.
    Unsupported(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::RegistrationFailed(msg) => {
                write!(f, "Script registration failed: {}", msg)
            }
            ScriptError::Unsupported(msg) => {
                write!(f, "Dynamic scripts unsupported: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScriptError {}

// === BadgeError ===

/// Errors from the badge presentation surface (tab gone, context invalid).
#[derive(Debug)]
pub enum BadgeError {
    Unavailable(String),
}

impl fmt::Display for BadgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeError::Unavailable(msg) => write!(f, "Badge unavailable: {}", msg),
        }
    }
}

impl std::error::Error for BadgeError {}

// === MessageError ===

/// Errors sending a cross-context message.
#[derive(Debug)]
pub enum MessageError {
    /// The messaging channel has been invalidated (e.g. process reloaded).
    SendFailed(String),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::SendFailed(msg) => write!(f, "Message send failed: {}", msg),
        }
    }
}

impl std::error::Error for MessageError {}

// === PauseError ===

/// Errors from the pause controller.
#[derive(Debug)]
pub enum PauseError {
    /// The pause state could not be persisted.
    Settings(String),
    /// The rule engine rejected the disable-all update.
    RuleEngine(String),
}

impl fmt::Display for PauseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PauseError::Settings(msg) => write!(f, "Pause settings error: {}", msg),
            PauseError::RuleEngine(msg) => write!(f, "Pause rule engine error: {}", msg),
        }
    }
}

impl std::error::Error for PauseError {}
