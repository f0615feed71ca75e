//! Locale-aware string comparison through `String.prototype.localeCompare`.

use core_shelf::grid::Collator;
use js_sys::{Array, JsString, Object};
use std::cmp::Ordering;

/// Case-insensitive collator using the browser's default locale.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsCollator;

impl Collator for JsCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let a = JsString::from(a.to_lowercase());
        let result = a.locale_compare(&b.to_lowercase(), &Array::new(), &Object::new());
        result.cmp(&0)
    }
}
