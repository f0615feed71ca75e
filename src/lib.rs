//! Workspace placeholder crate.
//!
//! This crate re-exports the shelf UI crates so host applications can depend
//! on `shelf-workspace` alone. Enable the `wasm` feature to pull in the
//! browser bindings (`bridge-wasm`) when building for `wasm32`.

pub use core_runtime as runtime;
pub use core_shelf as shelf;
pub use core_ui as ui;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use bridge_wasm as wasm;
