//! # Shelf Domain
//!
//! Book cards, the shelf grid (filter, sort, local search) and the backend
//! abstraction used to move a book between shelves.
//!
//! ## Overview
//!
//! Everything in this crate is plain data plus pure functions; the only
//! effectful seam is [`backend::ShelfBackend`], which the browser bridge
//! implements over `fetch` and tests replace with a mock.
//!
//! ```
//! use core_shelf::grid::{CaselessCollator, ControlAction, ShelfGrid};
//! use core_shelf::models::BookCard;
//!
//! let cards = ["Banana", "Apple", "cherry"]
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, title)| BookCard::new(i.to_string(), title))
//!     .collect();
//!
//! let mut grid = ShelfGrid::new(cards);
//! let action: ControlAction = ControlAction::from_data(None, Some("title-asc")).unwrap();
//! grid.click_control(0, &action, &CaselessCollator);
//!
//! let titles: Vec<_> = grid.cards().map(|c| c.title.as_str()).collect();
//! assert_eq!(titles, ["Apple", "Banana", "cherry"]);
//! ```

pub mod backend;
pub mod error;
pub mod grid;
pub mod models;

pub use backend::{HttpShelfBackend, ShelfBackend, StatusChange, StatusReceipt};
pub use error::{BackendError, Result, ShelfError};
pub use grid::{Collator, ControlAction, FilterValue, GridView, ShelfGrid, SortSpec};
pub use models::{BookCard, Rating, ShelfStatus, UserBookId};
