//! # Shelf UI State
//!
//! Pure state objects behind every interactive fragment of the shelf pages:
//!
//! - [`profile`]: header profile menu
//! - [`search_mode`]: exclusive title/author search checkboxes
//! - [`modal`]: book details modal with its star rating
//! - [`dropdown`]: per-card "add to shelf" dropdowns
//! - [`toast`]: notifications after a shelf update
//! - [`page`]: the aggregate driven by the browser bridge
//!
//! Each fragment exposes a "compute next state" API and no DOM access, so
//! the whole interaction logic is testable natively. `bridge-wasm` owns the
//! listeners and applies the resulting state to the document.

pub mod dropdown;
pub mod modal;
pub mod page;
pub mod profile;
pub mod search_mode;
pub mod toast;

pub use dropdown::{item_change, DropdownClick, DropdownSet};
pub use modal::{EditSection, ModalClick, ModalState, ModalView, StarRating};
pub use page::{add_to_shelf, PageSnapshot, PendingChange, ShelfPage};
pub use profile::{ClickRegion, ProfileMenu};
pub use search_mode::{SearchMode, SearchModeToggle};
pub use toast::{Toast, ToastKind};
