// SQLite-backed persistence for the policy engine.

pub mod connection;
pub mod migrations;
