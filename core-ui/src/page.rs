//! State of one shelf page.
//!
//! [`ShelfPage`] aggregates every UI fragment. Each event handler in the
//! browser bridge calls one method here, then applies the resulting state
//! to the DOM. The add-to-shelf flow is split into
//! [`begin_status_change`](ShelfPage::begin_status_change) and
//! [`finish_status_change`](ShelfPage::finish_status_change) so that no
//! borrow of the page is held while the backend request is in flight.

use core_runtime::config::ShelfUiConfig;
use core_shelf::backend::{ShelfBackend, StatusChange, StatusReceipt};
use core_shelf::error::{BackendError, Result};
use core_shelf::grid::{CaselessCollator, Collator, ControlAction, GridView, ShelfGrid};
use core_shelf::models::{BookCard, ShelfStatus};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::dropdown::DropdownSet;
use crate::modal::ModalState;
use crate::profile::ProfileMenu;
use crate::search_mode::{SearchMode, SearchModeToggle};
use crate::toast::Toast;

/// A status change whose card updates were applied ahead of the backend's
/// answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    change: StatusChange,
    generation: u64,
    nodes: Vec<usize>,
}

impl PendingChange {
    pub fn change(&self) -> &StatusChange {
        &self.change
    }

    /// Grid nodes whose status was patched.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().copied()
    }
}

/// Status bookkeeping for one book while changes to it are in flight.
#[derive(Debug, Default)]
struct StatusLedger {
    /// Last status the backend accepted, with the generation that set it.
    /// Generation 0 is the status the page was rendered with.
    confirmed: (u64, Option<ShelfStatus>),
    in_flight: Vec<(u64, ShelfStatus)>,
}

impl StatusLedger {
    /// Status the cards should show: the newest change still in flight,
    /// unless a newer one has already been confirmed.
    fn shown(&self) -> Option<ShelfStatus> {
        self.in_flight
            .iter()
            .filter(|(generation, _)| *generation > self.confirmed.0)
            .max_by_key(|(generation, _)| *generation)
            .map(|(_, status)| status.clone())
            .or_else(|| self.confirmed.1.clone())
    }
}

/// Serializable summary of the page state, handed to JavaScript for
/// debugging and end-to-end assertions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub profile_open: bool,
    pub search_mode: Option<SearchMode>,
    /// Book id shown in the modal, if open
    pub modal_book: Option<String>,
    pub open_dropdown: Option<usize>,
    pub active_control: Option<usize>,
    /// Ids of the visible grid cards, in display order
    pub visible_books: Vec<String>,
}

pub struct ShelfPage {
    config: ShelfUiConfig,
    collator: Box<dyn Collator>,
    pub profile: ProfileMenu,
    /// `None` when the page has no search form
    pub search_mode: Option<SearchModeToggle>,
    pub modal: ModalState,
    pub dropdowns: DropdownSet,
    pub grid: ShelfGrid,
    ledgers: HashMap<String, StatusLedger>,
    last_generation: u64,
}

impl ShelfPage {
    pub fn new(config: ShelfUiConfig) -> Self {
        Self {
            config,
            collator: Box::new(CaselessCollator),
            profile: ProfileMenu::default(),
            search_mode: None,
            modal: ModalState::default(),
            dropdowns: DropdownSet::default(),
            grid: ShelfGrid::new(Vec::new()),
            ledgers: HashMap::new(),
            last_generation: 0,
        }
    }

    /// Replace the collator used for sorting.
    pub fn with_collator(mut self, collator: impl Collator + 'static) -> Self {
        self.collator = Box::new(collator);
        self
    }

    pub fn with_search_mode(mut self, title_checked: bool, author_checked: bool) -> Self {
        self.search_mode = Some(SearchModeToggle::from_checked(
            title_checked,
            author_checked,
        ));
        self
    }

    pub fn with_dropdowns(mut self, count: usize) -> Self {
        self.dropdowns = DropdownSet::new(count);
        self
    }

    pub fn with_grid(mut self, cards: Vec<BookCard>) -> Self {
        self.grid = ShelfGrid::new(cards);
        self
    }

    pub fn config(&self) -> &ShelfUiConfig {
        &self.config
    }

    /// Click on filter/sort control `index` carrying the given
    /// `data-filter` / `data-sort` values.
    pub fn click_control(
        &mut self,
        index: usize,
        filter: Option<&str>,
        sort: Option<&str>,
    ) -> Result<GridView> {
        let action = ControlAction::from_data(filter, sort)?;
        debug!(index, ?action, "Shelf control clicked");
        self.grid.click_control(index, &action, self.collator.as_ref());
        Ok(self.grid.view())
    }

    pub fn search(&mut self, term: &str) -> GridView {
        self.grid.search(term);
        self.grid.view()
    }

    pub fn open_modal(&mut self, card: &BookCard) {
        self.modal.open(card, &self.config);
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            profile_open: self.profile.is_open(),
            search_mode: self.search_mode.map(|toggle| toggle.mode()),
            modal_book: self.modal.view().map(|view| view.book_id.clone()),
            open_dropdown: self.dropdowns.open_index(),
            active_control: self.grid.active_control(),
            visible_books: self.grid.visible_cards().map(|c| c.id.clone()).collect(),
        }
    }

    /// Close the dropdown and optimistically move the affected grid cards to
    /// the new shelf.
    pub fn begin_status_change(&mut self, change: StatusChange) -> PendingChange {
        self.dropdowns.close_all();
        self.last_generation += 1;
        let generation = self.last_generation;

        let previous = self
            .grid
            .patch_status(&change.book_id, Some(change.status.clone()));
        let ledger = self
            .ledgers
            .entry(change.book_id.clone())
            .or_insert_with(|| StatusLedger {
                confirmed: (0, previous.first().and_then(|(_, status)| status.clone())),
                in_flight: Vec::new(),
            });
        ledger.in_flight.push((generation, change.status.clone()));

        PendingChange {
            nodes: previous.into_iter().map(|(node, _)| node).collect(),
            change,
            generation,
        }
    }

    /// Settle a change. A failure falls back to the newest status that is
    /// still pending or confirmed, so it never undoes a later change.
    pub fn finish_status_change(
        &mut self,
        pending: PendingChange,
        outcome: &std::result::Result<StatusReceipt, BackendError>,
    ) -> Toast {
        let book_id = &pending.change.book_id;
        match outcome {
            Ok(_) => info!(book = %book_id, status = %pending.change.status, "Shelf updated"),
            Err(err) => warn!(book = %book_id, error = %err, "Reverting shelf update"),
        }

        if let Some(ledger) = self.ledgers.get_mut(book_id) {
            ledger
                .in_flight
                .retain(|(generation, _)| *generation != pending.generation);
            if outcome.is_ok() && pending.generation > ledger.confirmed.0 {
                ledger.confirmed = (pending.generation, Some(pending.change.status.clone()));
            }
            let shown = ledger.shown();
            if ledger.in_flight.is_empty() {
                self.ledgers.remove(book_id);
            }
            self.grid.patch_status(book_id, shown);
        }
        Toast::for_outcome(outcome)
    }
}

/// Run a complete add-to-shelf flow against `backend`.
pub async fn add_to_shelf(
    page: &mut ShelfPage,
    backend: &dyn ShelfBackend,
    change: StatusChange,
) -> Toast {
    let pending = page.begin_status_change(change);
    let outcome = backend.submit_status(pending.change()).await;
    page.finish_status_change(pending, &outcome)
}
