//! Profile dropdown in the page header.

use serde::{Deserialize, Serialize};

/// Where a document click landed, relative to the profile widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickRegion {
    /// The profile button (or a descendant)
    Button,
    /// Inside the open menu
    Menu,
    Elsewhere,
}

/// Open/closed state of the profile menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMenu {
    open: bool,
}

impl ProfileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Returns whether the state changed.
    pub fn handle_click(&mut self, region: ClickRegion) -> bool {
        let before = self.open;
        match region {
            ClickRegion::Button => self.toggle(),
            ClickRegion::Menu => {}
            ClickRegion::Elsewhere => self.close(),
        }
        before != self.open
    }
}
