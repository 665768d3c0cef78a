// Debloat shared type definitions
// Each submodule defines types used across the engine.

pub mod activity;
pub mod errors;
pub mod message;
pub mod settings;
