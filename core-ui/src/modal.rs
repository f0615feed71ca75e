//! Book details modal.
//!
//! Opening on a card computes a [`ModalView`] holding every string the
//! modal slots display. Cards owned by the signed-in user also get an
//! [`EditSection`]: the update/delete form actions, the preselected status
//! and the star rating.

use core_runtime::config::ShelfUiConfig;
use core_shelf::models::{format_published_date, or_missing, BookCard, Rating, MISSING};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Row of clickable rating stars.
///
/// Stars are numbered from 1; star `n` is selected iff `n <= value`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRating {
    value: u8,
}

impl StarRating {
    pub fn new(rating: Rating) -> Self {
        Self {
            value: rating.value(),
        }
    }

    /// Click on star `n`. Values beyond [`Rating::MAX`] clamp.
    pub fn select(&mut self, n: u8) {
        self.value = n.min(Rating::MAX);
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_selected(&self, n: u8) -> bool {
        n >= 1 && n <= self.value
    }

    /// Value for the hidden `rating-value` field.
    pub fn hidden_value(&self) -> String {
        self.value.to_string()
    }
}

/// Editable part of the modal, present only for owned cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSection {
    pub user_book_id: String,
    pub update_action: String,
    pub delete_action: String,
    /// Value preselected in the status `<select>`; empty when unknown
    pub status: String,
    pub rating: StarRating,
}

/// Everything the modal displays for one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalView {
    pub book_id: String,
    /// Cover image URL; `None` leaves the image without a source
    pub cover: Option<String>,
    pub title: String,
    pub authors: String,
    pub publisher: String,
    pub page_count: String,
    pub published_date: String,
    pub description: String,
    pub edit: Option<EditSection>,
}

impl ModalView {
    pub fn for_card(card: &BookCard, config: &ShelfUiConfig) -> Self {
        let edit = card.user_book_id.as_ref().map(|id| EditSection {
            user_book_id: id.to_string(),
            update_action: config.update_action(id.as_str()),
            delete_action: config.delete_action(id.as_str()),
            status: card
                .status
                .as_ref()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            rating: StarRating::new(card.rating),
        });

        Self {
            book_id: card.id.clone(),
            cover: card.cover.clone(),
            title: if card.title.is_empty() {
                MISSING.to_string()
            } else {
                card.title.clone()
            },
            authors: or_missing(card.authors.as_deref()),
            publisher: or_missing(card.publisher.as_deref()),
            page_count: or_missing(card.page_count.as_deref()),
            published_date: format_published_date(card.published_date.as_deref()),
            description: or_missing(card.description.as_deref()),
            edit,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.edit.is_some()
    }
}

/// Target of a click while the modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    CloseButton,
    /// The modal root itself, outside the content panel
    Backdrop,
    /// Anything inside the content panel
    Content,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    view: Option<ModalView>,
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        self.view.is_some()
    }

    pub fn view(&self) -> Option<&ModalView> {
        self.view.as_ref()
    }

    /// Open (or re-open) the modal for `card`. Opening twice for the same
    /// card yields the same state.
    pub fn open(&mut self, card: &BookCard, config: &ShelfUiConfig) -> &ModalView {
        debug!(book = %card.id, editable = card.is_owned(), "Opening book modal");
        self.view.insert(ModalView::for_card(card, config))
    }

    pub fn close(&mut self) {
        self.view = None;
    }

    /// Returns whether the modal closed.
    pub fn handle_click(&mut self, click: ModalClick) -> bool {
        match click {
            ModalClick::CloseButton | ModalClick::Backdrop if self.is_open() => {
                self.close();
                true
            }
            _ => false,
        }
    }

    /// Click on star `n` of the open, editable modal. Returns the updated
    /// rating, or `None` when there is nothing to rate.
    pub fn select_star(&mut self, n: u8) -> Option<StarRating> {
        let edit = self.view.as_mut()?.edit.as_mut()?;
        edit.rating.select(n);
        Some(edit.rating)
    }
}
