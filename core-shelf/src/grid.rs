//! Shelf grid: filter, sort and local search over the rendered cards.
//!
//! The grid owns a copy of every card together with the index of the DOM
//! node it came from. Controls and the search box only ever change two
//! things: the display order and which cards are visible. Book records are
//! never modified here, except for the optimistic status patch applied
//! while a shelf change is in flight.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::{Result, ShelfError};
use crate::models::{BookCard, ShelfStatus};

// =============================================================================
// Collation
// =============================================================================

/// String comparison used for sorting.
///
/// The browser bridge supplies a `localeCompare`-backed collator; native
/// code and tests use [`CaselessCollator`].
pub trait Collator {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Unicode-lowercase comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaselessCollator;

impl Collator for CaselessCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.to_lowercase().cmp(&b.to_lowercase())
    }
}

impl<F> Collator for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

// =============================================================================
// Control configuration
// =============================================================================

/// Value of a filter control's `data-filter` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterValue {
    All,
    Status(ShelfStatus),
}

impl FilterValue {
    pub fn matches(&self, card: &BookCard) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Status(status) => card.status.as_ref() == Some(status),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            FilterValue::All
        } else {
            FilterValue::Status(ShelfStatus::from(raw))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    Title,
    Authors,
    Publisher,
    PublishedDate,
    PageCount,
    Status,
    Rating,
}

impl SortField {
    /// String value of this field on `card`; absent values sort as "".
    pub fn value_of(&self, card: &BookCard) -> String {
        match self {
            SortField::Title => card.title.clone(),
            SortField::Authors => card.authors.clone().unwrap_or_default(),
            SortField::Publisher => card.publisher.clone().unwrap_or_default(),
            SortField::PublishedDate => card.published_date.clone().unwrap_or_default(),
            SortField::PageCount => card.page_count.clone().unwrap_or_default(),
            SortField::Status => card
                .status
                .as_ref()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            SortField::Rating => card.rating.to_string(),
        }
    }
}

impl FromStr for SortField {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace(['_', '-'], "");
        match key.as_str() {
            "title" => Ok(SortField::Title),
            "author" | "authors" => Ok(SortField::Authors),
            "publisher" => Ok(SortField::Publisher),
            "publisheddate" | "date" | "published" => Ok(SortField::PublishedDate),
            "pagecount" | "pages" => Ok(SortField::PageCount),
            "status" => Ok(SortField::Status),
            "rating" => Ok(SortField::Rating),
            _ => Err(ShelfError::UnknownSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "az" => Some(SortDirection::Ascending),
            "desc" | "descending" | "za" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Sort configuration of a control (`data-sort="title-desc"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl FromStr for SortSpec {
    type Err = ShelfError;

    /// Accepts `field`, `field-dir` or `field:dir`; a missing direction
    /// means ascending.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some((field, dir)) = s.rsplit_once([':', '-']) {
            if let Some(direction) = SortDirection::parse(dir) {
                return Ok(SortSpec {
                    field: field.parse()?,
                    direction,
                });
            }
        }
        Ok(SortSpec {
            field: s.parse()?,
            direction: SortDirection::Ascending,
        })
    }
}

/// What clicking a `.control-btn` does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlAction {
    Filter(FilterValue),
    Sort(SortSpec),
}

impl ControlAction {
    /// Interpret a control's `data-filter` / `data-sort` attributes.
    /// `data-filter` wins when both are present.
    pub fn from_data(filter: Option<&str>, sort: Option<&str>) -> Result<Self> {
        match (filter, sort) {
            (Some(filter), _) => Ok(ControlAction::Filter(FilterValue::from(filter))),
            (None, Some(sort)) => Ok(ControlAction::Sort(sort.parse()?)),
            (None, None) => Err(ShelfError::InvalidControl),
        }
    }
}

// =============================================================================
// Grid state
// =============================================================================

/// The rule that currently decides visibility. The most recent filter click
/// or search input wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityRule {
    Filter(FilterValue),
    Search(String),
}

#[derive(Debug, Clone)]
struct Entry {
    node: usize,
    card: BookCard,
}

/// Rendered state of the grid, ready to be applied to the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    /// DOM node indices in display order
    pub order: Vec<usize>,
    /// Visibility per DOM node index
    pub visible: Vec<bool>,
    /// Index of the active control, if one was clicked
    pub active_control: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ShelfGrid {
    entries: Vec<Entry>,
    rule: VisibilityRule,
    active_control: Option<usize>,
}

impl ShelfGrid {
    /// `cards` are in DOM order; card `i` belongs to node `i`.
    pub fn new(cards: Vec<BookCard>) -> Self {
        Self {
            entries: cards
                .into_iter()
                .enumerate()
                .map(|(node, card)| Entry { node, card })
                .collect(),
            rule: VisibilityRule::Filter(FilterValue::All),
            active_control: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cards in display order.
    pub fn cards(&self) -> impl Iterator<Item = &BookCard> {
        self.entries.iter().map(|e| &e.card)
    }

    /// Card rendered by DOM node `node`.
    pub fn card_at(&self, node: usize) -> Option<&BookCard> {
        self.entries.iter().find(|e| e.node == node).map(|e| &e.card)
    }

    pub fn rule(&self) -> &VisibilityRule {
        &self.rule
    }

    pub fn active_control(&self) -> Option<usize> {
        self.active_control
    }

    /// Handle a click on control `index`.
    pub fn click_control(&mut self, index: usize, action: &ControlAction, collator: &dyn Collator) {
        self.active_control = Some(index);
        match action {
            ControlAction::Filter(filter) => self.filter(filter.clone()),
            ControlAction::Sort(spec) => self.sort(*spec, collator),
        }
    }

    pub fn filter(&mut self, filter: FilterValue) {
        self.rule = VisibilityRule::Filter(filter);
    }

    /// Stable sort; ties keep their current relative order in both
    /// directions.
    pub fn sort(&mut self, spec: SortSpec, collator: &dyn Collator) {
        self.entries.sort_by(|a, b| {
            let ordering = collator.compare(
                &spec.field.value_of(&a.card),
                &spec.field.value_of(&b.card),
            );
            match spec.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    /// Apply the search box contents. Visibility only; order is untouched.
    pub fn search(&mut self, term: &str) {
        self.rule = VisibilityRule::Search(term.trim().to_lowercase());
    }

    fn is_visible(&self, card: &BookCard) -> bool {
        match &self.rule {
            VisibilityRule::Filter(filter) => filter.matches(card),
            VisibilityRule::Search(needle) => needle.is_empty() || card.matches_search(needle),
        }
    }

    /// Cards currently visible, in display order.
    pub fn visible_cards(&self) -> impl Iterator<Item = &BookCard> {
        self.entries
            .iter()
            .map(|e| &e.card)
            .filter(|card| self.is_visible(card))
    }

    pub fn view(&self) -> GridView {
        let mut visible = vec![false; self.entries.len()];
        for entry in &self.entries {
            visible[entry.node] = self.is_visible(&entry.card);
        }
        GridView {
            order: self.entries.iter().map(|e| e.node).collect(),
            visible,
            active_control: self.active_control,
        }
    }

    /// Set the status of every card for book `book_id`, returning the
    /// previous statuses so the change can be reverted.
    pub fn patch_status(
        &mut self,
        book_id: &str,
        status: Option<ShelfStatus>,
    ) -> Vec<(usize, Option<ShelfStatus>)> {
        self.entries
            .iter_mut()
            .filter(|e| e.card.id == book_id)
            .map(|e| {
                let previous = std::mem::replace(&mut e.card.status, status.clone());
                (e.node, previous)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(grid: &ShelfGrid) -> Vec<String> {
        grid.cards().map(|c| c.title.clone()).collect()
    }

    fn visible_titles(grid: &ShelfGrid) -> Vec<String> {
        grid.visible_cards().map(|c| c.title.clone()).collect()
    }

    fn status_grid() -> ShelfGrid {
        ShelfGrid::new(vec![
            BookCard::new("1", "Dune").with_status("read"),
            BookCard::new("2", "Emma").with_status("reading"),
            BookCard::new("3", "Ulysses").with_status("want"),
            BookCard::new("4", "Beloved").with_status("reading"),
        ])
    }

    fn fruit_grid() -> ShelfGrid {
        ShelfGrid::new(vec![
            BookCard::new("1", "Banana").with_authors("Zed"),
            BookCard::new("2", "Apple").with_authors("Urban Ban"),
            BookCard::new("3", "cherry").with_authors("Yves"),
        ])
    }

    #[test]
    fn test_filter_by_status() {
        let mut grid = status_grid();
        let reading = ControlAction::from_data(Some("reading"), None).unwrap();
        grid.click_control(1, &reading, &CaselessCollator);

        assert_eq!(visible_titles(&grid), ["Emma", "Beloved"]);
        let view = grid.view();
        assert_eq!(view.visible, [false, true, false, true]);
        assert_eq!(view.active_control, Some(1));

        let all = ControlAction::from_data(Some("all"), None).unwrap();
        grid.click_control(0, &all, &CaselessCollator);
        assert_eq!(grid.visible_cards().count(), 4);
        assert_eq!(grid.active_control(), Some(0));
    }

    #[test]
    fn test_filter_alias_matches_card_status() {
        let mut grid = status_grid();
        grid.filter(FilterValue::from("want-to-read"));
        assert_eq!(visible_titles(&grid), ["Ulysses"]);
    }

    #[test]
    fn test_sort_title_case_insensitive() {
        let mut grid = fruit_grid();
        let asc = ControlAction::from_data(None, Some("title-asc")).unwrap();
        grid.click_control(2, &asc, &CaselessCollator);
        assert_eq!(titles(&grid), ["Apple", "Banana", "cherry"]);
        assert_eq!(grid.view().order, [1, 0, 2]);

        let desc = ControlAction::from_data(None, Some("title-desc")).unwrap();
        grid.click_control(3, &desc, &CaselessCollator);
        assert_eq!(titles(&grid), ["cherry", "Banana", "Apple"]);
        assert_eq!(grid.active_control(), Some(3));
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut grid = ShelfGrid::new(vec![
            BookCard::new("1", "same").with_authors("b"),
            BookCard::new("2", "Same").with_authors("a"),
            BookCard::new("3", "other").with_authors("c"),
        ]);
        grid.sort("title".parse().unwrap(), &CaselessCollator);
        assert_eq!(grid.view().order, [2, 0, 1]);

        grid.sort("title:desc".parse().unwrap(), &CaselessCollator);
        assert_eq!(grid.view().order, [0, 1, 2]);
    }

    #[test]
    fn test_sort_accepts_closure_collator() {
        let mut grid = fruit_grid();
        let longest_first = |a: &str, b: &str| b.len().cmp(&a.len());
        grid.sort("title".parse().unwrap(), &longest_first);
        assert_eq!(titles(&grid), ["Banana", "cherry", "Apple"]);
    }

    #[test]
    fn test_search_ignores_filter_and_keeps_order() {
        let mut grid = fruit_grid();
        grid.filter(FilterValue::from("read"));
        grid.sort("title-desc".parse().unwrap(), &CaselessCollator);
        let order_before = grid.view().order;

        grid.search("BAN");
        assert_eq!(visible_titles(&grid), ["Banana", "Apple"]);
        assert_eq!(grid.view().order, order_before);

        grid.search("   ");
        assert_eq!(grid.visible_cards().count(), 3);
    }

    #[test]
    fn test_search_does_not_change_active_control() {
        let mut grid = status_grid();
        let all = ControlAction::from_data(Some("all"), None).unwrap();
        grid.click_control(0, &all, &CaselessCollator);
        grid.search("dune");
        assert_eq!(grid.active_control(), Some(0));
        assert_eq!(visible_titles(&grid), ["Dune"]);
    }

    #[test]
    fn test_sort_spec_parsing() {
        let spec: SortSpec = "authors-desc".parse().unwrap();
        assert_eq!(spec.field, SortField::Authors);
        assert_eq!(spec.direction, SortDirection::Descending);

        let spec: SortSpec = "published_date".parse().unwrap();
        assert_eq!(spec.field, SortField::PublishedDate);
        assert_eq!(spec.direction, SortDirection::Ascending);

        let spec: SortSpec = "page-count:asc".parse().unwrap();
        assert_eq!(spec.field, SortField::PageCount);

        assert_eq!(
            "colour-asc".parse::<SortSpec>(),
            Err(ShelfError::UnknownSortField("colour".into()))
        );
        assert_eq!(
            ControlAction::from_data(None, None),
            Err(ShelfError::InvalidControl)
        );
    }

    #[test]
    fn test_patch_status_returns_previous() {
        let mut grid = status_grid();
        let previous = grid.patch_status("2", Some(ShelfStatus::READ));
        assert_eq!(previous, vec![(1, Some(ShelfStatus::READING))]);
        assert_eq!(grid.card_at(1).unwrap().status, Some(ShelfStatus::READ));
        assert!(grid.patch_status("missing", None).is_empty());
    }
}
