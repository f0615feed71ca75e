//! Interaction controller for the shelf pages.
//!
//! [`ShelfController::bind`] resolves every page fragment once against a
//! document, registers the event listeners and keeps the state in a
//! [`ShelfPage`]. Each handler updates that state and then applies it to the
//! DOM. Fragments whose elements are missing are skipped. Dropping the
//! controller removes its listeners.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use core_runtime::config::{PageSelectors, ShelfUiConfig, StateClasses};
use core_shelf::backend::{ShelfBackend, StatusChange};
use core_ui::{
    item_change, ClickRegion, DropdownClick, ModalClick, PageSnapshot, SearchMode, ShelfPage,
    StarRating, Toast,
};
use gloo_timers::future::TimeoutFuture;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlFormElement, HtmlImageElement, HtmlInputElement,
    HtmlSelectElement, Node,
};

use crate::collator::JsCollator;
use crate::dom::{self, QueryRoot};
use crate::error::{js_message, WasmResult};

// =============================================================================
// Resolved elements
// =============================================================================

struct ProfileElements {
    button: Element,
    menu: Element,
}

struct SearchElements {
    form: Element,
    title: HtmlInputElement,
    author: HtmlInputElement,
    hidden: Option<HtmlInputElement>,
}

struct ModalElements {
    root: Element,
    close: Option<Element>,
    cover: Option<HtmlImageElement>,
    title: Option<Element>,
    authors: Option<Element>,
    publisher: Option<Element>,
    page_count: Option<Element>,
    published_date: Option<Element>,
    description: Option<Element>,
    update_form: Option<HtmlFormElement>,
    delete_form: Option<HtmlFormElement>,
    status: Option<HtmlSelectElement>,
    rating_value: Option<HtmlInputElement>,
    star_rating: Option<Element>,
    stars: Vec<Element>,
}

struct GridElements {
    container: Element,
    cards: Vec<Element>,
}

struct DropdownElements {
    root: Element,
    trigger: Option<Element>,
    items: Vec<Element>,
}

struct Elements {
    profile: Option<ProfileElements>,
    search: Option<SearchElements>,
    modal: Option<ModalElements>,
    grid: Option<GridElements>,
    controls: Vec<Element>,
    shelf_search: Option<HtmlInputElement>,
    dropdowns: Vec<DropdownElements>,
    toast: Option<Element>,
}

impl Elements {
    fn resolve(document: &Document, selectors: &PageSelectors) -> Self {
        let profile = match (
            document.select_one(&selectors.profile_button),
            document.select_one(&selectors.profile_menu),
        ) {
            (Some(button), Some(menu)) => Some(ProfileElements { button, menu }),
            _ => {
                debug!("Profile dropdown not on this page");
                None
            }
        };

        let search = document.select_one(&selectors.search_form).and_then(|form| {
            let title = dom::select_as::<HtmlInputElement>(&form, &selectors.title_checkbox);
            let author = dom::select_as::<HtmlInputElement>(&form, &selectors.author_checkbox);
            let hidden = dom::select_as::<HtmlInputElement>(&form, &selectors.search_by_field);
            match (title, author) {
                (Some(title), Some(author)) => Some(SearchElements {
                    form,
                    title,
                    author,
                    hidden,
                }),
                _ => {
                    debug!("Search form lacks the mode checkboxes");
                    None
                }
            }
        });

        let modal = document.select_one(&selectors.modal).map(|root| {
            let text = |selector: &str| root.select_one(selector);
            ModalElements {
                close: text(&selectors.modal_close),
                cover: dom::select_as(&root, &selectors.modal_cover),
                title: text(&selectors.modal_title),
                authors: text(&selectors.modal_authors),
                publisher: text(&selectors.modal_publisher),
                page_count: text(&selectors.modal_page_count),
                published_date: text(&selectors.modal_published_date),
                description: text(&selectors.modal_description),
                update_form: dom::select_as(&root, &selectors.update_form),
                delete_form: dom::select_as(&root, &selectors.delete_form),
                status: dom::select_as(&root, &selectors.status_select),
                rating_value: dom::select_as(&root, &selectors.rating_value),
                stars: text(&selectors.star_rating)
                    .map(|row| row.select_all(&selectors.star))
                    .unwrap_or_default(),
                star_rating: text(&selectors.star_rating),
                root,
            }
        });
        if modal.is_none() {
            debug!("Book modal not on this page");
        }

        let grid = document
            .select_one(&selectors.shelf_grid)
            .map(|container| GridElements {
                cards: container.select_all(&selectors.book_card),
                container,
            });

        let dropdowns = document
            .select_all(&selectors.dropdown)
            .into_iter()
            .map(|root| DropdownElements {
                trigger: root.select_one(&selectors.dropdown_trigger),
                items: root.select_all(&selectors.dropdown_item),
                root,
            })
            .collect();

        Self {
            profile,
            search,
            modal,
            grid,
            controls: document.select_all(&selectors.control_button),
            shelf_search: dom::select_as(document, &selectors.shelf_search),
            dropdowns,
            toast: document.select_one(&selectors.toast),
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

struct Inner {
    document: Document,
    selectors: PageSelectors,
    classes: StateClasses,
    toast_duration_ms: u32,
    elements: Elements,
    page: RefCell<ShelfPage>,
    backend: Rc<dyn ShelfBackend>,
    toast_generation: Cell<u64>,
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

type Handler = fn(&Rc<Inner>, &Event);

/// Event wiring for one document.
pub struct ShelfController {
    inner: Rc<Inner>,
    listeners: Vec<Listener>,
}

impl ShelfController {
    /// Bind to `document`. Status changes chosen in the add-to-shelf
    /// dropdowns are sent to `backend`.
    pub fn bind(
        document: Document,
        config: ShelfUiConfig,
        backend: Rc<dyn ShelfBackend>,
    ) -> WasmResult<Self> {
        config.validate()?;
        let elements = Elements::resolve(&document, &config.selectors);

        let mut page = ShelfPage::new(config.clone())
            .with_collator(JsCollator)
            .with_dropdowns(elements.dropdowns.len());
        if let Some(search) = &elements.search {
            page = page.with_search_mode(search.title.checked(), search.author.checked());
        }
        if let Some(grid) = &elements.grid {
            page = page.with_grid(grid.cards.iter().map(dom::read_card).collect());
        }

        let inner = Rc::new(Inner {
            document,
            toast_duration_ms: config.toast_duration_ms.min(u32::MAX as u64) as u32,
            selectors: config.selectors,
            classes: config.classes,
            elements,
            page: RefCell::new(page),
            backend,
            toast_generation: Cell::new(0),
        });
        inner.render_search_mode();

        let mut bindings: Vec<(EventTarget, &'static str, Handler)> =
            vec![(inner.document.clone().into(), "click", Inner::on_click)];
        if let Some(search) = &inner.elements.search {
            bindings.push((search.title.clone().into(), "change", |inner, _| {
                inner.on_search_mode_change(SearchMode::Title)
            }));
            bindings.push((search.author.clone().into(), "change", |inner, _| {
                inner.on_search_mode_change(SearchMode::Author)
            }));
            bindings.push((search.form.clone().into(), "submit", |inner, _| {
                inner.render_search_mode()
            }));
        }
        if let Some(input) = &inner.elements.shelf_search {
            bindings.push((input.clone().into(), "input", |inner, _| {
                inner.on_shelf_search()
            }));
        }

        let mut controller = Self {
            inner,
            listeners: Vec::with_capacity(bindings.len()),
        };
        for (target, kind, handler) in bindings {
            controller.listen(target, kind, handler)?;
        }

        info!(
            listeners = controller.listeners.len(),
            cards = controller.inner.page.borrow().grid.len(),
            dropdowns = controller.inner.elements.dropdowns.len(),
            "Shelf controller bound"
        );
        Ok(controller)
    }

    fn listen(&mut self, target: EventTarget, kind: &'static str, handler: Handler) -> WasmResult<()> {
        let inner = Rc::clone(&self.inner);
        let callback = Closure::wrap(
            Box::new(move |event: Event| handler(&inner, &event)) as Box<dyn FnMut(Event)>
        );
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target,
            kind,
            callback,
        });
        Ok(())
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.inner.page.borrow().snapshot()
    }

    /// Show a toast as if a shelf update had just finished.
    pub fn show_toast(&self, toast: &Toast) {
        self.inner.show_toast(toast);
    }
}

impl Drop for ShelfController {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(err) = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            ) {
                debug!(kind = listener.kind, error = %js_message(&err), "Failed to remove listener");
            }
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

impl Inner {
    fn on_click(self: &Rc<Self>, event: &Event) {
        let Some(node) = dom::event_node(event) else {
            return;
        };

        self.on_profile_click(&node);
        let in_dropdown = self.on_dropdown_click(&node, event);
        let in_modal = self.on_modal_click(&node);
        self.on_control_click(&node);
        if !in_dropdown && !in_modal {
            self.on_card_click(&node);
        }
    }

    fn on_profile_click(&self, node: &Node) {
        let Some(profile) = &self.elements.profile else {
            return;
        };
        let region = if dom::contains(&profile.button, node) {
            ClickRegion::Button
        } else if dom::contains(&profile.menu, node) {
            ClickRegion::Menu
        } else {
            ClickRegion::Elsewhere
        };

        let mut page = self.page.borrow_mut();
        if page.profile.handle_click(region) {
            dom::set_class(&profile.menu, &self.classes.open, page.profile.is_open());
        }
    }

    /// Returns whether the click landed inside a dropdown.
    fn on_dropdown_click(self: &Rc<Self>, node: &Node, event: &Event) -> bool {
        let dropdowns = &self.elements.dropdowns;
        let hit = dropdowns
            .iter()
            .position(|d| dom::contains(&d.root, node));

        let mut change = None;
        let click = match hit {
            None => DropdownClick::Elsewhere,
            Some(i) => {
                let dropdown = &dropdowns[i];
                if dropdown
                    .trigger
                    .as_ref()
                    .is_some_and(|t| dom::contains(t, node))
                {
                    DropdownClick::Trigger(i)
                } else if let Some(item) = dropdown.items.iter().find(|it| dom::contains(it, node)) {
                    event.prevent_default();
                    change = item_change(
                        dom::data(item, "book").as_deref(),
                        dom::data(item, "status").as_deref(),
                    );
                    if change.is_none() {
                        debug!("Dropdown item without data-book/data-status");
                    }
                    DropdownClick::Item(i)
                } else {
                    DropdownClick::Inside(i)
                }
            }
        };

        let before = self.page.borrow().dropdowns.open_index();
        self.page.borrow_mut().dropdowns.handle_click(click);
        if self.page.borrow().dropdowns.open_index() != before {
            self.render_dropdowns();
        }

        if let Some(change) = change {
            self.submit_status(change);
        }
        hit.is_some()
    }

    /// Returns whether the click landed inside the open modal.
    fn on_modal_click(&self, node: &Node) -> bool {
        let Some(modal) = &self.elements.modal else {
            return false;
        };
        if !self.page.borrow().modal.is_open() || !dom::contains(&modal.root, node) {
            return false;
        }

        let click = if modal.close.as_ref().is_some_and(|c| dom::contains(c, node)) {
            ModalClick::CloseButton
        } else if modal.root.is_same_node(Some(node)) {
            ModalClick::Backdrop
        } else {
            ModalClick::Content
        };

        if click == ModalClick::Content {
            let star = modal
                .stars
                .iter()
                .enumerate()
                .find(|(_, star)| dom::contains(star, node));
            if let Some((index, star)) = star {
                let selected = self.page.borrow_mut().modal.select_star(star_number(index, star));
                if let Some(rating) = selected {
                    self.render_stars(modal, rating);
                }
            }
        }

        if self.page.borrow_mut().modal.handle_click(click) {
            dom::set_class(&modal.root, &self.classes.open, false);
        }
        true
    }

    fn on_control_click(&self, node: &Node) {
        let controls = &self.elements.controls;
        let Some(index) = dom::position_containing(controls, node) else {
            return;
        };
        let control = &controls[index];
        let result = self.page.borrow_mut().click_control(
            index,
            dom::data(control, "filter").as_deref(),
            dom::data(control, "sort").as_deref(),
        );
        match result {
            Ok(_) => self.render_grid(),
            Err(err) => debug!(index, error = %err, "Ignoring shelf control"),
        }
    }

    fn on_card_click(&self, node: &Node) {
        let Some(modal) = &self.elements.modal else {
            return;
        };
        let cards = self.document.select_all(&self.selectors.book_card);
        let Some(index) = dom::position_containing(&cards, node) else {
            return;
        };

        let card = dom::read_card(&cards[index]);
        self.page.borrow_mut().open_modal(&card);
        self.render_modal(modal);
    }

    fn on_search_mode_change(&self, mode: SearchMode) {
        let Some(search) = &self.elements.search else {
            return;
        };
        let checked = match mode {
            SearchMode::Title => search.title.checked(),
            SearchMode::Author => search.author.checked(),
        };
        if let Some(toggle) = self.page.borrow_mut().search_mode.as_mut() {
            toggle.change(mode, checked);
        }
        self.render_search_mode();
    }

    fn on_shelf_search(&self) {
        let Some(input) = &self.elements.shelf_search else {
            return;
        };
        self.page.borrow_mut().search(&input.value());
        self.render_grid();
    }

    fn submit_status(self: &Rc<Self>, change: StatusChange) {
        let pending = self.page.borrow_mut().begin_status_change(change);
        let nodes: Vec<usize> = pending.nodes().collect();
        self.render_card_statuses(&nodes);
        self.render_grid();

        let inner = Rc::clone(self);
        spawn_local(async move {
            let outcome = inner.backend.submit_status(pending.change()).await;
            let toast = inner
                .page
                .borrow_mut()
                .finish_status_change(pending, &outcome);
            inner.render_card_statuses(&nodes);
            inner.render_grid();
            inner.show_toast(&toast);
        });
    }

    fn show_toast(self: &Rc<Self>, toast: &Toast) {
        let Some(element) = &self.elements.toast else {
            info!(error = toast.is_error(), message = %toast.message, "Shelf update finished");
            return;
        };
        element.set_text_content(Some(&toast.message));
        dom::set_class(element, &self.classes.toast_error, toast.is_error());
        dom::set_class(element, &self.classes.toast_visible, true);

        let generation = self.toast_generation.get().wrapping_add(1);
        self.toast_generation.set(generation);
        let inner = Rc::clone(self);
        spawn_local(async move {
            TimeoutFuture::new(inner.toast_duration_ms).await;
            // A newer toast owns the element now.
            if inner.toast_generation.get() != generation {
                return;
            }
            if let Some(element) = &inner.elements.toast {
                dom::set_class(element, &inner.classes.toast_visible, false);
            }
        });
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl Inner {
    fn render_search_mode(&self) {
        let Some(search) = &self.elements.search else {
            return;
        };
        let Some(toggle) = self.page.borrow().search_mode else {
            return;
        };
        search.title.set_checked(toggle.is_checked(SearchMode::Title));
        search.author.set_checked(toggle.is_checked(SearchMode::Author));
        if let Some(hidden) = &search.hidden {
            hidden.set_value(toggle.hidden_value());
        }
    }

    fn render_dropdowns(&self) {
        let page = self.page.borrow();
        for (i, dropdown) in self.elements.dropdowns.iter().enumerate() {
            dom::set_class(&dropdown.root, &self.classes.open, page.dropdowns.is_open(i));
        }
    }

    fn render_grid(&self) {
        let view = self.page.borrow().grid.view();

        for (i, control) in self.elements.controls.iter().enumerate() {
            dom::set_class(control, &self.classes.active, view.active_control == Some(i));
        }

        let Some(grid) = &self.elements.grid else {
            return;
        };
        for (node, card) in grid.cards.iter().enumerate() {
            dom::set_shown(card, view.visible.get(node).copied().unwrap_or(true));
        }
        for node in view.order {
            if let Some(card) = grid.cards.get(node) {
                if let Err(err) = grid.container.append_child(card) {
                    debug!(node, error = %js_message(&err), "Failed to reorder card");
                }
            }
        }
    }

    fn render_card_statuses(&self, nodes: &[usize]) {
        let Some(grid) = &self.elements.grid else {
            return;
        };
        let page = self.page.borrow();
        for &node in nodes {
            let status = page.grid.card_at(node).and_then(|c| c.status.clone());
            if let Some(card) = grid.cards.get(node) {
                dom::set_data(card, "status", status.as_ref().map(|s| s.as_str()));
            }
        }
    }

    fn render_modal(&self, modal: &ModalElements) {
        let page = self.page.borrow();
        let Some(view) = page.modal.view() else {
            dom::set_class(&modal.root, &self.classes.open, false);
            return;
        };

        if let Some(cover) = &modal.cover {
            match &view.cover {
                Some(src) => cover.set_src(src),
                None => {
                    if let Err(err) = cover.remove_attribute("src") {
                        debug!(error = %js_message(&err), "Failed to clear modal cover");
                    }
                }
            }
            cover.set_alt(&view.title);
        }
        dom::set_text(modal.title.as_ref(), &view.title);
        dom::set_text(modal.authors.as_ref(), &view.authors);
        dom::set_text(modal.publisher.as_ref(), &view.publisher);
        dom::set_text(modal.page_count.as_ref(), &view.page_count);
        dom::set_text(modal.published_date.as_ref(), &view.published_date);
        dom::set_text(modal.description.as_ref(), &view.description);

        let forms = [modal.update_form.as_ref(), modal.delete_form.as_ref()];
        match &view.edit {
            Some(edit) => {
                if let Some(form) = &modal.update_form {
                    form.set_action(&edit.update_action);
                }
                if let Some(form) = &modal.delete_form {
                    form.set_action(&edit.delete_action);
                }
                if let Some(status) = &modal.status {
                    status.set_value(&edit.status);
                }
                self.render_stars(modal, edit.rating);
            }
            None => debug!(book = %view.book_id, "Card not on the user's shelf; hiding forms"),
        }
        for form in forms.into_iter().flatten() {
            dom::set_shown(form, view.is_editable());
        }
        if let Some(row) = &modal.star_rating {
            dom::set_shown(row, view.is_editable());
        }

        dom::set_class(&modal.root, &self.classes.open, true);
    }

    fn render_stars(&self, modal: &ModalElements, rating: StarRating) {
        for (index, star) in modal.stars.iter().enumerate() {
            dom::set_class(
                star,
                &self.classes.selected,
                rating.is_selected(star_number(index, star)),
            );
        }
        if let Some(field) = &modal.rating_value {
            field.set_value(&rating.hidden_value());
        }
    }
}

/// 1-based star number: `data-value` when present, else position.
fn star_number(index: usize, star: &Element) -> u8 {
    dom::data(star, "value")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_else(|| u8::try_from(index + 1).unwrap_or(u8::MAX))
}
