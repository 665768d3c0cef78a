// Core engine services.

pub mod badge;
pub mod hide_reporter;
pub mod pause_controller;
pub mod policy_activator;
pub mod rule_engine;
pub mod script_registry;
pub mod settings_store;
