//! Error types for the browser bridge

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Result type for browser bridge operations
pub type WasmResult<T> = Result<T, WasmError>;

/// Errors that can occur while binding the shelf page
#[derive(Error, Debug)]
pub enum WasmError {
    /// JavaScript error from web-sys
    #[error("JavaScript error: {0}")]
    JavaScript(String),

    /// `window` or `document` is unavailable (e.g. inside a worker)
    #[error("Browser API not available: {0}")]
    NotAvailable(&'static str),

    /// Invalid configuration passed from the host page
    #[error("Configuration error: {0}")]
    Config(#[from] core_runtime::Error),

    /// Configuration object could not be deserialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_wasm_bindgen::Error),
}

impl From<WasmError> for bridge_traits::error::BridgeError {
    fn from(err: WasmError) -> Self {
        match err {
            WasmError::NotAvailable(what) => {
                bridge_traits::error::BridgeError::NotAvailable(what.to_string())
            }
            other => bridge_traits::error::BridgeError::OperationFailed(other.to_string()),
        }
    }
}

impl From<JsValue> for WasmError {
    fn from(js_value: JsValue) -> Self {
        WasmError::JavaScript(js_message(&js_value))
    }
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Best-effort text of a thrown JavaScript value.
pub(crate) fn js_message(js_value: &JsValue) -> String {
    if let Some(text) = js_value.as_string() {
        text
    } else if let Some(error) = js_value.dyn_ref::<js_sys::Error>() {
        error.message().into()
    } else {
        format!("{:?}", js_value)
    }
}
