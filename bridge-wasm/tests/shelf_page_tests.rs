#![cfg(target_arch = "wasm32")]
//! Browser tests for the shelf page controller
//!
//! Each test renders a fixture page into `document.body`, binds a fresh
//! controller against it and drives it with synthetic clicks.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use bridge_wasm::ShelfController;
use core_runtime::config::ShelfUiConfig;
use core_shelf::backend::{ShelfBackend, StatusChange, StatusReceipt};
use core_shelf::error::BackendError;
use core_shelf::models::ShelfStatus;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r##"
<header>
  <button id="btn-profile">Me</button>
  <div id="menu-profile"><a id="menu-link">Sign out</a></div>
</header>
<form class="search--filters">
  <label><input type="checkbox" id="chk-title"> Title</label>
  <label><input type="checkbox" id="chk-author" checked> Author</label>
  <input type="hidden" name="search_by" value="">
</form>
<p id="outside">Somewhere else</p>
<button id="ctl-all" class="control-btn" data-filter="all">All</button>
<button id="ctl-reading" class="control-btn" data-filter="reading">Reading</button>
<button id="ctl-asc" class="control-btn" data-sort="title-asc">A-Z</button>
<button id="ctl-desc" class="control-btn" data-sort="title-desc">Z-A</button>
<input id="shelf-search" type="search">
<div id="shelf-grid">
  <div id="card-1" class="book-card" data-id="1" data-title="Banana" data-authors="Ann Smith"
       data-status="read" data-rating="0">
    <span id="card-1-title">Banana</span>
    <div id="dd-1" class="dropdown">
      <button id="dd-1-trigger" class="add-button">+</button>
      <div id="dd-1-menu">
        <a href="#" id="dd-1-reading" class="dropdown-item" data-book="1" data-status="reading">Reading</a>
      </div>
    </div>
  </div>
  <div id="card-2" class="book-card" data-id="2" data-title="Apple" data-authors="Bob Bandana"
       data-cover="https://covers.example.com/2.jpg" data-publisher="Penguin"
       data-page-count="320" data-published-date="2012-08-02" data-description="A fruit."
       data-status="reading" data-rating="3" data-user-book-id="42">
    <span id="card-2-title">Apple</span>
  </div>
  <div id="card-3" class="book-card" data-id="3" data-title="cherry" data-status="want" data-rating="None">
    <div id="dd-3" class="dropdown">
      <button id="dd-3-trigger" class="add-button">+</button>
      <div id="dd-3-menu">
        <a href="#" id="dd-3-read" class="dropdown-item" data-book="3" data-status="read">Read</a>
      </div>
    </div>
  </div>
</div>
<div id="book-modal">
  <div id="modal-content">
    <button id="modal-close">×</button>
    <img id="modal-cover">
    <h2 id="modal-title"></h2>
    <p id="modal-authors"></p>
    <p id="modal-publisher"></p>
    <p id="modal-pages"></p>
    <p id="modal-date"></p>
    <p id="modal-desc"></p>
    <form id="update-form" method="post">
      <select id="shelf-status">
        <option value="want_to_read">Want to read</option>
        <option value="reading">Reading</option>
        <option value="read">Read</option>
      </select>
      <div id="star-rating">
        <span id="star-1" class="star" data-value="1">★</span>
        <span id="star-2" class="star" data-value="2">★</span>
        <span id="star-3" class="star" data-value="3">★</span>
        <span id="star-4" class="star" data-value="4">★</span>
        <span id="star-5" class="star" data-value="5">★</span>
      </div>
      <input type="hidden" id="rating-value" name="rating">
    </form>
    <form id="delete-form" method="post"></form>
  </div>
</div>
<div id="toast"></div>
"##;

struct FakeBackend {
    fail: bool,
    calls: RefCell<Vec<StatusChange>>,
}

impl FakeBackend {
    fn new(fail: bool) -> Rc<Self> {
        Rc::new(Self {
            fail,
            calls: RefCell::new(Vec::new()),
        })
    }
}

#[async_trait(?Send)]
impl ShelfBackend for FakeBackend {
    async fn submit_status(&self, change: &StatusChange) -> Result<StatusReceipt, BackendError> {
        self.calls.borrow_mut().push(change.clone());
        if self.fail {
            return Err(BackendError::Server { status: 500 });
        }
        Ok(StatusReceipt {
            book_id: change.book_id.clone(),
            status: change.status.clone(),
            message: None,
        })
    }
}

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn render_fixture() {
    document().body().unwrap().set_inner_html(FIXTURE);
}

fn bind_with(config: ShelfUiConfig, backend: Rc<FakeBackend>) -> ShelfController {
    render_fixture();
    ShelfController::bind(document(), config, backend).unwrap()
}

fn bind() -> ShelfController {
    bind_with(ShelfUiConfig::default(), FakeBackend::new(false))
}

fn element(id: &str) -> Element {
    document().get_element_by_id(id).unwrap()
}

fn click(id: &str) {
    element(id).dyn_into::<HtmlElement>().unwrap().click();
}

fn has_class(id: &str, class: &str) -> bool {
    element(id).class_list().contains(class)
}

fn is_hidden(id: &str) -> bool {
    element(id)
        .dyn_into::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value("display")
        .unwrap()
        == "none"
}

fn input(id: &str) -> HtmlInputElement {
    element(id).dyn_into().unwrap()
}

fn card_order() -> Vec<String> {
    let grid = element("shelf-grid");
    let children = grid.children();
    (0..children.length())
        .filter_map(|i| children.item(i))
        .map(|card| card.get_attribute("data-id").unwrap_or_default())
        .collect()
}

/// Let spawned futures run.
async fn settle() {
    TimeoutFuture::new(20).await;
}

#[wasm_bindgen_test]
fn test_profile_menu_toggles_and_closes_outside() {
    let _ui = bind();

    click("btn-profile");
    assert!(has_class("menu-profile", "open"));

    click("menu-link");
    assert!(has_class("menu-profile", "open"));

    click("outside");
    assert!(!has_class("menu-profile", "open"));

    click("btn-profile");
    click("btn-profile");
    assert!(!has_class("menu-profile", "open"));
}

#[wasm_bindgen_test]
fn test_search_mode_checkboxes_stay_exclusive() {
    let _ui = bind();
    let hidden = document()
        .query_selector("input[name=\"search_by\"]")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlInputElement>()
        .unwrap();

    // Author was pre-checked in the markup
    assert!(input("chk-author").checked());
    assert!(!input("chk-title").checked());
    assert_eq!(hidden.value(), "author");

    // Unchecking the only box falls back to title
    click("chk-author");
    assert!(input("chk-title").checked());
    assert!(!input("chk-author").checked());
    assert_eq!(hidden.value(), "title");

    click("chk-author");
    assert!(!input("chk-title").checked());
    assert_eq!(hidden.value(), "author");

    click("chk-title");
    assert!(input("chk-title").checked());
    assert!(!input("chk-author").checked());
    assert_eq!(hidden.value(), "title");
}

#[wasm_bindgen_test]
fn test_filter_controls() {
    let ui = bind();

    click("ctl-reading");
    assert!(is_hidden("card-1"));
    assert!(!is_hidden("card-2"));
    assert!(is_hidden("card-3"));
    assert!(has_class("ctl-reading", "active"));
    assert!(!has_class("ctl-all", "active"));

    click("ctl-all");
    assert!(!is_hidden("card-1") && !is_hidden("card-2") && !is_hidden("card-3"));
    assert!(has_class("ctl-all", "active"));
    assert!(!has_class("ctl-reading", "active"));
    assert_eq!(ui.snapshot().visible_books, ["1", "2", "3"]);
}

#[wasm_bindgen_test]
fn test_sort_controls_reorder_grid() {
    let _ui = bind();

    click("ctl-asc");
    assert_eq!(card_order(), ["2", "1", "3"]);

    click("ctl-desc");
    assert_eq!(card_order(), ["3", "1", "2"]);
    assert!(has_class("ctl-desc", "active"));
    assert!(!has_class("ctl-asc", "active"));
}

#[wasm_bindgen_test]
fn test_shelf_search_matches_title_or_authors() {
    let _ui = bind();
    click("ctl-desc");

    let search = input("shelf-search");
    search.set_value("BAN");
    search
        .dispatch_event(&Event::new("input").unwrap())
        .unwrap();

    assert!(!is_hidden("card-1"));
    assert!(!is_hidden("card-2"));
    assert!(is_hidden("card-3"));
    // Search changes neither order nor the active control
    assert_eq!(card_order(), ["3", "1", "2"]);
    assert!(has_class("ctl-desc", "active"));
}

#[wasm_bindgen_test]
fn test_modal_for_owned_card() {
    let ui = bind();

    click("card-2-title");
    assert!(has_class("book-modal", "open"));
    assert_eq!(ui.snapshot().modal_book.as_deref(), Some("2"));

    assert_eq!(element("modal-title").text_content().unwrap(), "Apple");
    assert_eq!(element("modal-date").text_content().unwrap(), "02/08/2012");
    assert_eq!(
        element("modal-cover").get_attribute("src").as_deref(),
        Some("https://covers.example.com/2.jpg")
    );
    assert_eq!(
        element("update-form").get_attribute("action").as_deref(),
        Some("/shelf/update/42")
    );
    assert_eq!(
        element("delete-form").get_attribute("action").as_deref(),
        Some("/shelf/delete/42")
    );
    let status: HtmlSelectElement = element("shelf-status").dyn_into().unwrap();
    assert_eq!(status.value(), "reading");
    assert!(!is_hidden("update-form"));

    let selected: Vec<bool> = (1..=5)
        .map(|n| has_class(&format!("star-{n}"), "selected"))
        .collect();
    assert_eq!(selected, [true, true, true, false, false]);
    assert_eq!(input("rating-value").value(), "3");

    click("star-5");
    assert!(has_class("star-5", "selected"));
    assert_eq!(input("rating-value").value(), "5");
    assert!(has_class("book-modal", "open"));
}

#[wasm_bindgen_test]
fn test_modal_for_catalog_card_hides_forms() {
    let _ui = bind();

    click("card-3");
    assert!(has_class("book-modal", "open"));
    assert!(is_hidden("update-form"));
    assert!(is_hidden("delete-form"));
    assert_eq!(element("modal-publisher").text_content().unwrap(), "—");
    assert_eq!(element("modal-cover").get_attribute("src"), None);
}

#[wasm_bindgen_test]
fn test_modal_closes_on_backdrop_but_not_content() {
    let _ui = bind();

    click("card-2");
    click("modal-title");
    assert!(has_class("book-modal", "open"));

    click("book-modal");
    assert!(!has_class("book-modal", "open"));

    click("card-2");
    click("modal-close");
    assert!(!has_class("book-modal", "open"));
}

#[wasm_bindgen_test]
fn test_dropdowns_are_exclusive() {
    let ui = bind();

    click("dd-1-trigger");
    assert!(has_class("dd-1", "open"));
    // The trigger sits inside a card but must not open the modal
    assert!(!has_class("book-modal", "open"));

    click("dd-3-trigger");
    assert!(has_class("dd-3", "open"));
    assert!(!has_class("dd-1", "open"));
    assert_eq!(ui.snapshot().open_dropdown, Some(1));

    click("outside");
    assert!(!has_class("dd-1", "open"));
    assert!(!has_class("dd-3", "open"));
}

#[wasm_bindgen_test]
async fn test_dropdown_item_submits_status_change() {
    let backend = FakeBackend::new(false);
    let _ui = bind_with(ShelfUiConfig::default(), Rc::clone(&backend));

    click("dd-1-trigger");
    click("dd-1-reading");

    assert!(!has_class("dd-1", "open"));
    assert_eq!(element("card-1").get_attribute("data-status").as_deref(), Some("reading"));

    settle().await;
    assert_eq!(
        backend.calls.borrow().as_slice(),
        [StatusChange::new("1", ShelfStatus::READING)]
    );
    assert!(has_class("toast", "show"));
    assert!(!has_class("toast", "error"));
    assert_eq!(element("card-1").get_attribute("data-status").as_deref(), Some("reading"));
}

#[wasm_bindgen_test]
async fn test_failed_status_change_reverts_and_reports() {
    let backend = FakeBackend::new(true);
    let config = ShelfUiConfig::builder()
        .toast_duration(Duration::from_millis(50))
        .build()
        .unwrap();
    let _ui = bind_with(config, Rc::clone(&backend));

    click("ctl-reading");
    click("dd-3-read");
    settle().await;

    assert_eq!(backend.calls.borrow().len(), 1);
    assert!(has_class("toast", "show"));
    assert!(has_class("toast", "error"));
    assert_eq!(element("card-3").get_attribute("data-status").as_deref(), Some("want"));
    assert!(is_hidden("card-3"));

    TimeoutFuture::new(100).await;
    assert!(!has_class("toast", "show"));
}

#[wasm_bindgen_test]
fn test_missing_fragments_are_skipped() {
    document()
        .body()
        .unwrap()
        .set_inner_html(r#"<p id="only">Nothing interactive here</p>"#);
    let ui = ShelfController::bind(document(), ShelfUiConfig::default(), FakeBackend::new(false))
        .unwrap();

    click("only");
    let snapshot = ui.snapshot();
    assert_eq!(snapshot.search_mode, None);
    assert!(snapshot.visible_books.is_empty());
}
