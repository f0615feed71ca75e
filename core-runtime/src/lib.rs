//! # Core Runtime Module
//!
//! Foundational runtime infrastructure shared by the shelf UI crates:
//! - Logging and tracing setup
//! - Configuration of the interaction controller
//!
//! ## Overview
//!
//! Nothing here knows about the DOM. `bridge-wasm` reads a [`ShelfUiConfig`]
//! at bind time and calls [`logging::init_logging`] once; the pure state
//! crates only consume the resulting values.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{PageSelectors, ShelfUiConfig, ShelfUiConfigBuilder, StateClasses};
pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
