//! JavaScript bindings
//!
//! ```javascript
//! import init, { ShelfUi } from './bridge_wasm.js';
//!
//! await init();
//! const ui = new ShelfUi({ backendBaseUrl: '', toastDurationMs: 2000 });
//! console.log(ui.snapshot());
//! ```

use wasm_bindgen::prelude::*;

use crate::bootstrap::{bind_document, config_from_js, init_browser_logging};
use crate::controller::ShelfController;

fn to_js_error<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Set up panic hook for readable panics in the console
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Shelf page controller exposed to JavaScript.
///
/// Listeners stay registered until `free()` is called.
#[wasm_bindgen(js_name = ShelfUi)]
pub struct JsShelfUi {
    controller: ShelfController,
}

#[wasm_bindgen(js_class = ShelfUi)]
impl JsShelfUi {
    /// Bind the current document.
    ///
    /// `config` is an optional object with camelCase fields, e.g.
    /// `{ requestTimeoutMs: 5000, selectors: { shelfGrid: '#grid' } }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsShelfUi, JsValue> {
        let config = config_from_js(config).map_err(to_js_error)?;
        init_browser_logging(&config);
        let controller = bind_document(config).map_err(to_js_error)?;
        Ok(Self { controller })
    }

    /// Current state of every fragment, as a plain object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.snapshot()).map_err(to_js_error)
    }
}
