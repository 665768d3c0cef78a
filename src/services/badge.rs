//! Badge presentation surface.
//!
//! Text, background color, and tooltip title setters, addressable globally
//! (`None`) or per tab. Rendering is an external concern; failures are
//! transient (tab closed, context invalid) and callers swallow them.

use std::collections::HashMap;

use crate::types::activity::TabId;
use crate::types::errors::BadgeError;

/// Trait defining the badge operations the core consumes.
pub trait BadgeSurface {
    fn set_text(&mut self, tab: Option<TabId>, text: &str) -> Result<(), BadgeError>;
    fn set_background_color(&mut self, tab: Option<TabId>, color: &str) -> Result<(), BadgeError>;
    fn set_title(&mut self, tab: Option<TabId>, title: &str) -> Result<(), BadgeError>;
}

/// Presentation state recorded for one badge scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeState {
    pub text: String,
    pub color: String,
    pub title: String,
}

/// In-memory badge recording what would be displayed, for the demo binary
/// and tests.
#[derive(Debug, Default)]
pub struct InMemoryBadge {
    global: BadgeState,
    tabs: HashMap<TabId, BadgeState>,
}

impl InMemoryBadge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(&self) -> &BadgeState {
        &self.global
    }

    pub fn tab(&self, tab: TabId) -> Option<&BadgeState> {
        self.tabs.get(&tab)
    }

    fn scope(&mut self, tab: Option<TabId>) -> &mut BadgeState {
        match tab {
            Some(id) => self.tabs.entry(id).or_default(),
            None => &mut self.global,
        }
    }
}

impl BadgeSurface for InMemoryBadge {
    fn set_text(&mut self, tab: Option<TabId>, text: &str) -> Result<(), BadgeError> {
        self.scope(tab).text = text.to_string();
        Ok(())
    }

    fn set_background_color(&mut self, tab: Option<TabId>, color: &str) -> Result<(), BadgeError> {
        self.scope(tab).color = color.to_string();
        Ok(())
    }

    fn set_title(&mut self, tab: Option<TabId>, title: &str) -> Result<(), BadgeError> {
        self.scope(tab).title = title.to_string();
        Ok(())
    }
}
