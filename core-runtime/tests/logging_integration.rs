//! Integration tests for logging and configuration

use async_trait::async_trait;
use bridge_traits::error::Result as SinkResult;
use bridge_traits::logging::{LogEntry, LogLevel, LoggerSink};
use core_runtime::config::ShelfUiConfig;
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct CollectingSink {
    entries: Mutex<Vec<LogEntry>>,
}

#[async_trait]
impl LoggerSink for CollectingSink {
    async fn log(&self, entry: LogEntry) -> SinkResult<()> {
        self.log_blocking(entry);
        Ok(())
    }

    fn log_blocking(&self, entry: LogEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}

// The global subscriber can only be installed once per process, so every
// assertion about it lives in this one test.
#[test]
fn test_init_logging_forwards_to_sink_once() {
    let sink = Arc::new(CollectingSink::default());
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_logger_sink(sink.clone());

    init_logging(config.clone()).unwrap();

    tracing::info!(target: "core_ui::page", book = "7", "Shelf updated");
    tracing::debug!(target: "core_ui::page", "below the sink's level");
    tracing::info!(target: "hyper::proto", "filtered out by the default filter");

    {
        let entries = sink.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[0].message, "Shelf updated");
        assert_eq!(entries[0].fields.get("book"), Some(&"7".to_string()));
    }

    assert!(matches!(init_logging(config), Err(Error::Config(_))));
}

#[test]
fn test_partial_json_config_keeps_defaults() {
    let config = ShelfUiConfig::from_json(
        r##"{
            "backendBaseUrl": "https://books.example.com",
            "requestTimeoutMs": 2500,
            "logLevel": "debug",
            "selectors": { "shelfGrid": "#my-books" }
        }"##,
    )
    .unwrap();

    assert_eq!(config.request_timeout(), Duration::from_millis(2500));
    assert_eq!(config.toast_duration(), Duration::from_secs(3));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.selectors.shelf_grid, "#my-books");
    assert_eq!(config.selectors.modal, "#book-modal");
    assert_eq!(config.status_url(), "https://books.example.com/shelf/add");
    assert_eq!(config.delete_action("9"), "/shelf/delete/9");
}

#[test]
fn test_invalid_json_config_is_rejected() {
    assert!(ShelfUiConfig::from_json(r#"{"requestTimeoutMs": 0}"#).is_err());
    assert!(ShelfUiConfig::from_json(r#"{"statusEndpoint": "shelf/add"}"#).is_err());
    assert!(ShelfUiConfig::from_json("not json").is_err());
}
