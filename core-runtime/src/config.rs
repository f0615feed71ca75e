//! # Shelf UI Configuration
//!
//! Configuration for the interaction controller: where the backend lives,
//! how the form actions are built, how long requests and toasts last, and
//! which selectors locate each page fragment.
//!
//! ## Overview
//!
//! [`ShelfUiConfig`] is constructed through [`ShelfUiConfigBuilder`], which
//! validates fail-fast so a misconfigured page is reported once at bind time
//! instead of on the first click. Hosts that bootstrap from JavaScript can
//! hand over a partial JSON object instead; every field has a default that
//! matches the stock shelf templates.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::ShelfUiConfig;
//! use std::time::Duration;
//!
//! let config = ShelfUiConfig::builder()
//!     .backend_base_url("https://books.example.com")
//!     .request_timeout(Duration::from_secs(5))
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.update_action("42"), "/shelf/update/42");
//! assert_eq!(config.status_url(), "https://books.example.com/shelf/add");
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::ShelfUiConfig;
//!
//! // Action templates must carry an `{id}` placeholder
//! let config = ShelfUiConfig::builder()
//!     .update_action_template("/shelf/update")
//!     .build()
//!     .expect("Should fail - template without {id}");
//! ```

use crate::error::{Error, Result};
use bridge_traits::LogLevel;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder substituted with the user-book id in form action templates.
pub const ID_PLACEHOLDER: &str = "{id}";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_TOAST_DURATION_MS: u64 = 3_000;
const MAX_REQUEST_TIMEOUT_MS: u64 = 120_000;

/// CSS selectors locating each page fragment.
///
/// Every selector is resolved with `querySelector`/`querySelectorAll`, so ids
/// keep their leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSelectors {
    pub profile_button: String,
    pub profile_menu: String,

    pub search_form: String,
    pub title_checkbox: String,
    pub author_checkbox: String,
    pub search_by_field: String,

    pub book_card: String,

    pub modal: String,
    pub modal_close: String,
    pub modal_cover: String,
    pub modal_title: String,
    pub modal_authors: String,
    pub modal_publisher: String,
    pub modal_page_count: String,
    pub modal_published_date: String,
    pub modal_description: String,
    pub update_form: String,
    pub delete_form: String,
    pub status_select: String,
    pub rating_value: String,
    pub star_rating: String,
    pub star: String,

    pub shelf_grid: String,
    pub control_button: String,
    pub shelf_search: String,

    pub dropdown: String,
    pub dropdown_trigger: String,
    pub dropdown_item: String,

    pub toast: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            profile_button: "#btn-profile".into(),
            profile_menu: "#menu-profile".into(),
            search_form: ".search--filters".into(),
            title_checkbox: "#chk-title".into(),
            author_checkbox: "#chk-author".into(),
            search_by_field: "input[name=\"search_by\"]".into(),
            book_card: ".book-card".into(),
            modal: "#book-modal".into(),
            modal_close: "#modal-close".into(),
            modal_cover: "#modal-cover".into(),
            modal_title: "#modal-title".into(),
            modal_authors: "#modal-authors".into(),
            modal_publisher: "#modal-publisher".into(),
            modal_page_count: "#modal-pages".into(),
            modal_published_date: "#modal-date".into(),
            modal_description: "#modal-desc".into(),
            update_form: "#update-form".into(),
            delete_form: "#delete-form".into(),
            status_select: "#shelf-status".into(),
            rating_value: "#rating-value".into(),
            star_rating: "#star-rating".into(),
            star: ".star".into(),
            shelf_grid: "#shelf-grid".into(),
            control_button: ".control-btn".into(),
            shelf_search: "#shelf-search".into(),
            dropdown: ".dropdown".into(),
            dropdown_trigger: ".add-button".into(),
            dropdown_item: ".dropdown-item".into(),
            toast: "#toast".into(),
        }
    }
}

impl PageSelectors {
    fn all(&self) -> [(&'static str, &str); 29] {
        [
            ("profileButton", self.profile_button.as_str()),
            ("profileMenu", self.profile_menu.as_str()),
            ("searchForm", self.search_form.as_str()),
            ("titleCheckbox", self.title_checkbox.as_str()),
            ("authorCheckbox", self.author_checkbox.as_str()),
            ("searchByField", self.search_by_field.as_str()),
            ("bookCard", self.book_card.as_str()),
            ("modal", self.modal.as_str()),
            ("modalClose", self.modal_close.as_str()),
            ("modalCover", self.modal_cover.as_str()),
            ("modalTitle", self.modal_title.as_str()),
            ("modalAuthors", self.modal_authors.as_str()),
            ("modalPublisher", self.modal_publisher.as_str()),
            ("modalPageCount", self.modal_page_count.as_str()),
            ("modalPublishedDate", self.modal_published_date.as_str()),
            ("modalDescription", self.modal_description.as_str()),
            ("updateForm", self.update_form.as_str()),
            ("deleteForm", self.delete_form.as_str()),
            ("statusSelect", self.status_select.as_str()),
            ("ratingValue", self.rating_value.as_str()),
            ("starRating", self.star_rating.as_str()),
            ("star", self.star.as_str()),
            ("shelfGrid", self.shelf_grid.as_str()),
            ("controlButton", self.control_button.as_str()),
            ("shelfSearch", self.shelf_search.as_str()),
            ("dropdown", self.dropdown.as_str()),
            ("dropdownTrigger", self.dropdown_trigger.as_str()),
            ("dropdownItem", self.dropdown_item.as_str()),
            ("toast", self.toast.as_str()),
        ]
    }
}

/// CSS classes toggled to express visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StateClasses {
    /// Profile menu, modal and dropdowns
    pub open: String,
    /// The one active filter/sort control
    pub active: String,
    /// Selected rating stars
    pub selected: String,
    /// Visible toast
    pub toast_visible: String,
    /// Toast reporting a failure
    pub toast_error: String,
}

impl Default for StateClasses {
    fn default() -> Self {
        Self {
            open: "open".into(),
            active: "active".into(),
            selected: "selected".into(),
            toast_visible: "show".into(),
            toast_error: "error".into(),
        }
    }
}

/// Configuration for the shelf page interaction controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShelfUiConfig {
    /// Origin prefixed to backend requests. Empty means same origin.
    pub backend_base_url: String,

    /// Path receiving `book_id` + `status` when a dropdown item is chosen
    pub status_endpoint: String,

    /// Update form action, `{id}` replaced with the user-book id
    pub update_action_template: String,

    /// Delete form action, `{id}` replaced with the user-book id
    pub delete_action_template: String,

    /// Timeout applied to backend requests
    pub request_timeout_ms: u64,

    /// How long a toast stays visible
    pub toast_duration_ms: u64,

    /// Console log level used when the bridge initializes logging
    pub log_level: LogLevel,

    pub selectors: PageSelectors,

    pub classes: StateClasses,
}

impl Default for ShelfUiConfig {
    fn default() -> Self {
        Self {
            backend_base_url: String::new(),
            status_endpoint: "/shelf/add".into(),
            update_action_template: "/shelf/update/{id}".into(),
            delete_action_template: "/shelf/delete/{id}".into(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            log_level: LogLevel::Info,
            selectors: PageSelectors::default(),
            classes: StateClasses::default(),
        }
    }
}

impl ShelfUiConfig {
    /// Creates a new builder seeded with the defaults.
    pub fn builder() -> ShelfUiConfigBuilder {
        ShelfUiConfigBuilder::default()
    }

    /// Parses a (possibly partial) JSON object and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ShelfUiConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid configuration JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        for (name, template) in [
            ("updateActionTemplate", self.update_action_template.as_str()),
            ("deleteActionTemplate", self.delete_action_template.as_str()),
        ] {
            if !template.contains(ID_PLACEHOLDER) {
                return Err(Error::Config(format!(
                    "{} must contain the {} placeholder, got {:?}",
                    name, ID_PLACEHOLDER, template
                )));
            }
        }

        if !self.status_endpoint.starts_with('/') {
            return Err(Error::Config(format!(
                "statusEndpoint must be an absolute path, got {:?}",
                self.status_endpoint
            )));
        }

        if self.backend_base_url.ends_with('/') {
            return Err(Error::Config(
                "backendBaseUrl must not end with '/'".to_string(),
            ));
        }

        if self.request_timeout_ms == 0 || self.request_timeout_ms > MAX_REQUEST_TIMEOUT_MS {
            return Err(Error::Config(format!(
                "requestTimeoutMs must be between 1 and {} ms",
                MAX_REQUEST_TIMEOUT_MS
            )));
        }

        if let Some((name, _)) = self
            .selectors
            .all()
            .into_iter()
            .find(|(_, selector)| selector.trim().is_empty())
        {
            return Err(Error::Config(format!("Selector {} cannot be empty", name)));
        }

        Ok(())
    }

    /// Form action for the update form of `user_book_id`.
    pub fn update_action(&self, user_book_id: &str) -> String {
        self.update_action_template
            .replace(ID_PLACEHOLDER, user_book_id)
    }

    /// Form action for the delete form of `user_book_id`.
    pub fn delete_action(&self, user_book_id: &str) -> String {
        self.delete_action_template
            .replace(ID_PLACEHOLDER, user_book_id)
    }

    /// Absolute URL of the status endpoint.
    pub fn status_url(&self) -> String {
        format!("{}{}", self.backend_base_url, self.status_endpoint)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

/// Builder for [`ShelfUiConfig`].
#[derive(Debug, Default)]
pub struct ShelfUiConfigBuilder {
    config: ShelfUiConfig,
}

impl ShelfUiConfigBuilder {
    pub fn backend_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.backend_base_url = url.into();
        self
    }

    pub fn status_endpoint(mut self, path: impl Into<String>) -> Self {
        self.config.status_endpoint = path.into();
        self
    }

    pub fn update_action_template(mut self, template: impl Into<String>) -> Self {
        self.config.update_action_template = template.into();
        self
    }

    pub fn delete_action_template(mut self, template: impl Into<String>) -> Self {
        self.config.delete_action_template = template.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_ms = timeout.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn toast_duration(mut self, duration: Duration) -> Self {
        self.config.toast_duration_ms = duration.as_millis().min(u64::MAX as u128) as u64;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    pub fn selectors(mut self, selectors: PageSelectors) -> Self {
        self.config.selectors = selectors;
        self
    }

    pub fn classes(mut self, classes: StateClasses) -> Self {
        self.config.classes = classes;
        self
    }

    /// Builds the final configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when an action template lacks `{id}`, the
    /// status endpoint is not an absolute path, the timeout is out of range,
    /// or any selector is blank.
    pub fn build(self) -> Result<ShelfUiConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ShelfUiConfig::builder().build().unwrap();

        assert_eq!(config.update_action("42"), "/shelf/update/42");
        assert_eq!(config.delete_action("42"), "/shelf/delete/42");
        assert_eq!(config.status_url(), "/shelf/add");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.toast_duration(), Duration::from_secs(3));
        assert_eq!(config.selectors.modal, "#book-modal");
        assert_eq!(config.classes.active, "active");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ShelfUiConfig::builder()
            .backend_base_url("https://books.example.com")
            .status_endpoint("/api/shelf/status")
            .delete_action_template("/shelf/{id}/remove")
            .toast_duration(Duration::from_millis(1500))
            .log_level(LogLevel::Debug)
            .build()
            .unwrap();

        assert_eq!(
            config.status_url(),
            "https://books.example.com/api/shelf/status"
        );
        assert_eq!(config.delete_action("7"), "/shelf/7/remove");
        assert_eq!(config.toast_duration_ms, 1500);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_builder_rejects_template_without_placeholder() {
        let result = ShelfUiConfig::builder()
            .update_action_template("/shelf/update")
            .build();

        let err = result.unwrap_err().to_string();
        assert!(err.contains("updateActionTemplate"));
        assert!(err.contains("{id}"));
    }

    #[test]
    fn test_builder_rejects_relative_endpoint_and_trailing_slash() {
        assert!(ShelfUiConfig::builder()
            .status_endpoint("shelf/add")
            .build()
            .is_err());
        assert!(ShelfUiConfig::builder()
            .backend_base_url("https://books.example.com/")
            .build()
            .is_err());
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = ShelfUiConfig::builder()
            .request_timeout(Duration::ZERO)
            .build();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("requestTimeoutMs"));
    }

    #[test]
    fn test_builder_rejects_blank_selector() {
        let selectors = PageSelectors {
            shelf_grid: "  ".into(),
            ..PageSelectors::default()
        };
        let result = ShelfUiConfig::builder().selectors(selectors).build();
        assert!(result.unwrap_err().to_string().contains("shelfGrid"));
    }

    #[test]
    fn test_from_partial_json() {
        let config = ShelfUiConfig::from_json(
            r##"{
                "backendBaseUrl": "https://books.example.com",
                "toastDurationMs": 5000,
                "logLevel": "debug",
                "selectors": { "shelfSearch": "#my-search" }
            }"##,
        )
        .unwrap();

        assert_eq!(config.toast_duration_ms, 5000);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.selectors.shelf_search, "#my-search");
        // untouched fields keep their defaults
        assert_eq!(config.selectors.modal, "#book-modal");
        assert_eq!(config.update_action("1"), "/shelf/update/1");
    }

    #[test]
    fn test_from_json_reports_invalid_input() {
        assert!(matches!(
            ShelfUiConfig::from_json("{ not json"),
            Err(Error::Config(_))
        ));
        assert!(ShelfUiConfig::from_json(r#"{ "requestTimeoutMs": 0 }"#).is_err());
    }
}
