//! Debloat — a content-filtering policy engine for de-cluttering browsers.
//!
//! This library crate exposes all modules for use by the binaries and
//! integration tests.

pub mod app;
pub mod catalog;
pub mod database;
pub mod host;
pub mod managers;
pub mod message_handler;
pub mod services;
pub mod types;
