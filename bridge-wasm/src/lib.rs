//! Browser bridge for the shelf pages
//!
//! Binds the pure state of `core-ui` to a live document:
//!
//! - [`controller::ShelfController`]: event listeners and DOM rendering
//! - [`http::WasmHttpClient`]: `HttpClient` over `fetch`
//! - [`collator::JsCollator`]: locale-aware sorting via `localeCompare`
//! - [`wasm`]: the `ShelfUi` class exported to JavaScript
//!
//! # Platform Support
//!
//! This crate is designed exclusively for the `wasm32-unknown-unknown` target.
//! It will not compile for native targets.
//!
//! # Examples
//!
//! ```ignore
//! use bridge_wasm::bootstrap::bind_document;
//! use core_runtime::config::ShelfUiConfig;
//!
//! let controller = bind_document(ShelfUiConfig::default())?;
//! assert!(!controller.snapshot().profile_open);
//! ```

#![cfg(target_arch = "wasm32")]

pub mod bootstrap;
pub mod collator;
pub mod controller;
pub mod dom;
pub mod error;
pub mod http;
pub mod wasm;

// Re-export commonly used types
pub use bootstrap::{bind_document, build_wasm_bridges, WasmBridgeSet};
pub use collator::JsCollator;
pub use controller::ShelfController;
pub use error::{WasmError, WasmResult};
pub use http::WasmHttpClient;
