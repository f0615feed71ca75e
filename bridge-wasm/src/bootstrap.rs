//! Helpers for wiring the browser bridges into a bound page.
//!
//! Host pages normally go through the `ShelfUi` JavaScript class; Rust
//! hosts can call [`bind_document`] directly, or
//! [`build_wasm_bridges`] when they need the backend for their own use.

use std::rc::Rc;
use std::sync::Arc;

use bridge_traits::{error::BridgeError, http::HttpClient};
use core_runtime::config::ShelfUiConfig;
use core_runtime::logging::{init_logging, LoggingConfig};
use core_shelf::backend::{HttpShelfBackend, ShelfBackend};
use tracing::debug;
use wasm_bindgen::JsValue;

use crate::controller::ShelfController;
use crate::error::{WasmError, WasmResult};
use crate::http::WasmHttpClient;

/// Browser bridge objects ready for injection into the controller.
pub struct WasmBridgeSet {
    /// HTTP client powered by browser `fetch`.
    pub http_client: Arc<dyn HttpClient>,
    /// Shelf backend posting status changes through `http_client`.
    pub backend: Rc<dyn ShelfBackend>,
}

/// Build the default bridge stack for `config`.
pub fn build_wasm_bridges(config: &ShelfUiConfig) -> Result<WasmBridgeSet, BridgeError> {
    let http_client: Arc<dyn HttpClient> = Arc::new(WasmHttpClient::new()?);
    let backend: Rc<dyn ShelfBackend> = Rc::new(HttpShelfBackend::from_config(
        Arc::clone(&http_client),
        config,
    ));
    Ok(WasmBridgeSet {
        http_client,
        backend,
    })
}

/// Read the configuration handed over by JavaScript. `undefined` and `null`
/// select the defaults; an object may set any subset of the fields.
pub fn config_from_js(value: JsValue) -> WasmResult<ShelfUiConfig> {
    let config: ShelfUiConfig = if value.is_undefined() || value.is_null() {
        ShelfUiConfig::default()
    } else {
        serde_wasm_bindgen::from_value(value)?
    };
    config.validate()?;
    Ok(config)
}

/// Route `tracing` events to the browser console. Later calls are no-ops.
pub fn init_browser_logging(config: &ShelfUiConfig) {
    if let Err(err) = init_logging(LoggingConfig::default().with_level(config.log_level)) {
        debug!(error = %err, "Logging already initialized");
    }
}

/// Bind a controller to the current document with the `fetch` backend.
pub fn bind_document(config: ShelfUiConfig) -> WasmResult<ShelfController> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(WasmError::NotAvailable("document"))?;
    let bridges = build_wasm_bridges(&config)
        .map_err(|err| WasmError::JavaScript(err.to_string()))?;
    ShelfController::bind(document, config, bridges.backend)
}
