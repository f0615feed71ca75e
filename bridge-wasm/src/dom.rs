//! Small DOM helpers.
//!
//! Lookups never fail: a missing element or an invalid selector yields
//! `None`/empty so the feature that needed it is skipped.

use core_shelf::models::BookCard;
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node};

use crate::error::js_message;

/// Anything `querySelector` can be called on.
pub trait QueryRoot {
    fn select_one(&self, selector: &str) -> Option<Element>;
    fn select_all(&self, selector: &str) -> Vec<Element>;
}

macro_rules! impl_query_root {
    ($ty:ty) => {
        impl QueryRoot for $ty {
            fn select_one(&self, selector: &str) -> Option<Element> {
                match self.query_selector(selector) {
                    Ok(found) => found,
                    Err(err) => {
                        debug!(selector, error = %js_message(&err), "Invalid selector");
                        None
                    }
                }
            }

            fn select_all(&self, selector: &str) -> Vec<Element> {
                let list = match self.query_selector_all(selector) {
                    Ok(list) => list,
                    Err(err) => {
                        debug!(selector, error = %js_message(&err), "Invalid selector");
                        return Vec::new();
                    }
                };
                (0..list.length())
                    .filter_map(|i| list.item(i))
                    .filter_map(|node| node.dyn_into::<Element>().ok())
                    .collect()
            }
        }
    };
}

impl_query_root!(Document);
impl_query_root!(Element);

/// Typed lookup; `None` when absent or of another element type.
pub fn select_as<T: JsCast>(root: &impl QueryRoot, selector: &str) -> Option<T> {
    root.select_one(selector)?.dyn_into::<T>().ok()
}

/// The event target as a DOM node.
pub fn event_node(event: &Event) -> Option<Node> {
    event.target()?.dyn_into::<Node>().ok()
}

/// Whether `node` is `element` or one of its descendants.
pub fn contains(element: &Element, node: &Node) -> bool {
    element.contains(Some(node))
}

/// Index of the element in `elements` containing `node`.
pub fn position_containing(elements: &[Element], node: &Node) -> Option<usize> {
    elements.iter().position(|el| contains(el, node))
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        debug!(class, error = %js_message(&err), "Failed to toggle class");
    }
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Show or hide through the inline `display` style.
pub fn set_shown(element: &Element, shown: bool) {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html.style();
    let result = if shown {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };
    if let Err(err) = result {
        debug!(error = %js_message(&err), "Failed to set display");
    }
}

pub fn set_text(element: Option<&Element>, text: &str) {
    if let Some(element) = element {
        element.set_text_content(Some(text));
    }
}

/// `element.dataset[key]`
pub fn data(element: &Element, key: &str) -> Option<String> {
    element.dyn_ref::<HtmlElement>()?.dataset().get(key)
}

pub fn set_data(element: &Element, key: &str, value: Option<&str>) {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let dataset = html.dataset();
    match value {
        Some(value) => {
            if let Err(err) = dataset.set(key, value) {
                debug!(key, error = %js_message(&err), "Failed to set data attribute");
            }
        }
        None => dataset.delete(key),
    }
}

/// Read a book card from its data attributes.
pub fn read_card(element: &Element) -> BookCard {
    BookCard::from_dataset(|key| data(element, key))
}
