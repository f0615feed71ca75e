//! Per-card "add to shelf" dropdowns. At most one is open at a time.

use core_shelf::backend::StatusChange;
use serde::{Deserialize, Serialize};

/// Target of a document click, relative to the dropdowns on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownClick {
    /// Trigger button of dropdown `i`
    Trigger(usize),
    /// Somewhere inside dropdown `i` other than its trigger or an item
    Inside(usize),
    /// A status item of dropdown `i`
    Item(usize),
    Elsewhere,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownSet {
    len: usize,
    open: Option<usize>,
}

impl DropdownSet {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Open dropdown `index` and close its siblings; a second click on the
    /// same trigger closes it.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.open = if self.is_open(index) { None } else { Some(index) };
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    pub fn handle_click(&mut self, click: DropdownClick) {
        match click {
            DropdownClick::Trigger(index) => self.toggle(index),
            DropdownClick::Inside(_) => {}
            DropdownClick::Item(_) | DropdownClick::Elsewhere => self.close_all(),
        }
    }
}

/// Read a dropdown item's `data-book` and `data-status` attributes.
/// Items missing either are ignored.
pub fn item_change(book: Option<&str>, status: Option<&str>) -> Option<StatusChange> {
    let book = book.map(str::trim).filter(|b| !b.is_empty())?;
    let status = status.map(str::trim).filter(|s| !s.is_empty())?;
    Some(StatusChange::new(book, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_shelf::models::ShelfStatus;

    #[test]
    fn test_trigger_opens_only_that_dropdown() {
        let mut set = DropdownSet::new(3);
        set.handle_click(DropdownClick::Trigger(0));
        assert!(set.is_open(0));

        set.handle_click(DropdownClick::Trigger(2));
        assert!(set.is_open(2));
        assert!(!set.is_open(0));
        assert!(!set.is_open(1));
    }

    #[test]
    fn test_elsewhere_closes_all() {
        let mut set = DropdownSet::new(2);
        set.toggle(1);
        set.handle_click(DropdownClick::Inside(1));
        assert!(set.is_open(1));

        set.handle_click(DropdownClick::Elsewhere);
        assert_eq!(set.open_index(), None);
    }

    #[test]
    fn test_second_click_and_item_close() {
        let mut set = DropdownSet::new(2);
        set.toggle(0);
        set.toggle(0);
        assert_eq!(set.open_index(), None);

        set.toggle(1);
        set.handle_click(DropdownClick::Item(1));
        assert_eq!(set.open_index(), None);
    }

    #[test]
    fn test_out_of_range_trigger_is_ignored() {
        let mut set = DropdownSet::new(1);
        set.toggle(4);
        assert_eq!(set.open_index(), None);
    }

    #[test]
    fn test_item_change() {
        let change = item_change(Some("b-1"), Some("want")).unwrap();
        assert_eq!(change.book_id, "b-1");
        assert_eq!(change.status, ShelfStatus::WANT_TO_READ);
        assert_eq!(change.status.as_str(), "want");

        assert_eq!(item_change(None, Some("read")), None);
        assert_eq!(item_change(Some("b-1"), Some(" ")), None);
    }
}
