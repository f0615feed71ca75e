//! Exclusive title/author checkboxes of the search form.
//!
//! Exactly one box is checked after initialization and after every change;
//! the hidden `search_by` field mirrors the resolved mode so the native form
//! submission carries it to the server.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Title,
    Author,
}

impl SearchMode {
    /// Value written into the hidden `search_by` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Title => "title",
            SearchMode::Author => "author",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            SearchMode::Title => SearchMode::Author,
            SearchMode::Author => SearchMode::Title,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checked state of the two checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchModeToggle {
    title: bool,
    author: bool,
}

impl SearchModeToggle {
    /// Start from whatever the markup pre-checked. A pre-checked author box
    /// wins; with neither checked, title is selected.
    pub fn from_checked(title: bool, author: bool) -> Self {
        let mut toggle = Self { title, author };
        let initial = if author {
            SearchMode::Author
        } else {
            SearchMode::Title
        };
        toggle.enforce(initial);
        toggle
    }

    pub fn is_checked(&self, mode: SearchMode) -> bool {
        match mode {
            SearchMode::Title => self.title,
            SearchMode::Author => self.author,
        }
    }

    fn set(&mut self, mode: SearchMode, checked: bool) {
        match mode {
            SearchMode::Title => self.title = checked,
            SearchMode::Author => self.author = checked,
        }
    }

    /// Record the new state of box `mode` (as the browser reports it in the
    /// change event) and restore the exactly-one invariant.
    pub fn change(&mut self, mode: SearchMode, checked: bool) -> SearchMode {
        self.set(mode, checked);
        self.enforce(mode)
    }

    /// Restore the invariant after `changed` was toggled. A checked box
    /// unchecks its sibling; if both end up unchecked, title is re-checked.
    pub fn enforce(&mut self, changed: SearchMode) -> SearchMode {
        if self.is_checked(changed) {
            self.set(changed.other(), false);
        }
        if !self.title && !self.author {
            self.title = true;
        }
        self.mode()
    }

    /// Resolved mode: author iff the author box is checked.
    pub fn mode(&self) -> SearchMode {
        if self.author {
            SearchMode::Author
        } else {
            SearchMode::Title
        }
    }

    pub fn hidden_value(&self) -> &'static str {
        self.mode().as_str()
    }
}

impl Default for SearchModeToggle {
    fn default() -> Self {
        Self::from_checked(true, false)
    }
}
