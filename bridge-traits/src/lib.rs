//! # Host Bridge Traits
//!
//! Platform abstraction traits that the shelf UI core depends on and that
//! each host (browser, native test harness) implements.
//!
//! ## Overview
//!
//! The UI state machines in `core-ui` and `core-shelf` never talk to the
//! browser directly. Whenever they need a capability that only the host can
//! provide, they reach for one of the traits below:
//!
//! - [`HttpClient`](http::HttpClient) - Async HTTP used to notify the shelf
//!   backend about status changes
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to a host
//!   logging pipeline
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Browser  | `bridge-wasm`       | ✅ Done |
//! | Native   | test doubles only   | ✅ Done |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type.
//! Implementations should convert platform-specific errors (for example a
//! rejected `fetch` promise) into `BridgeError` with a message that names the
//! failing operation.
//!
//! ## Thread Safety
//!
//! Native builds require `Send + Sync` on every bridge; `wasm32` builds drop
//! those bounds through [`platform::PlatformSendSync`], since browser objects
//! are bound to the main thread.
//!
//! ## Examples
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
//!
//! async fn ping(client: &dyn HttpClient) -> bridge_traits::error::Result<bool> {
//!     let response = client
//!         .execute(HttpRequest::new(HttpMethod::Get, "/health"))
//!         .await?;
//!     Ok(response.is_success())
//! }
//! ```

pub mod error;
pub mod http;
pub mod logging;
pub mod platform;

pub use error::BridgeError;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use platform::{PlatformSend, PlatformSendSync};
