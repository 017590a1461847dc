//! Integration tests for the logger factory
//!
//! These tests verify:
//! - Memoized construction of every artifact kind
//! - Reference resolution and failure without partial state
//! - Handler defaults and processor attachment order
//! - Overwrite and round-trip registration semantics
//! - End-to-end writing through factory-built stream handlers
//! - Declarative bootstrap from a configuration file

use parking_lot::Mutex;
use rust_logger_factory::core::{processor, ArtifactKind, LogContext, LogLevel, LogRecord};
use rust_logger_factory::factory::{FactoryConfig, LoggerFactory};
use rust_logger_factory::formatters::LineFormatter;
use rust_logger_factory::handlers::{NullHandler, StreamHandler};
use rust_logger_factory::{Formatter, Handler, Logger, LoggerError, Processor};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn log_path(dir: &TempDir, name: &str) -> String {
    dir.path()
        .join(name)
        .to_str()
        .expect("utf8 path")
        .to_string()
}

#[test]
fn test_create_logger_twice_returns_same_instance() {
    let factory = LoggerFactory::new();
    factory
        .create_handler("quiet", "null", LogLevel::Debug, &json!({}))
        .expect("handler");

    let first = factory
        .create_logger("app", &json!({"handlers": ["quiet"]}))
        .expect("first");
    // Second configuration would fail if it were read
    let second = factory
        .create_logger("app", &json!({"handlers": ["does-not-exist"]}))
        .expect("second");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(factory.get_loggers().len(), 1);
}

#[test]
fn test_missing_reference_stores_nothing() {
    let factory = LoggerFactory::new();
    let err = factory
        .create_logger("app", &json!({"handlers": ["missing"]}))
        .unwrap_err();

    assert!(err.to_string().contains("'missing'"));
    assert!(matches!(
        err,
        LoggerError::NotRegistered {
            kind: ArtifactKind::Handler,
            ..
        }
    ));
    assert!(factory.get_logger("app").is_err());
    assert!(factory.get_loggers().is_empty());
}

#[test]
fn test_stream_handler_defaults_through_factory() {
    let factory = LoggerFactory::new();
    let handler = factory
        .create_handler("h1", "stream", LogLevel::Info, &json!({"stream": "/tmp/x.log"}))
        .expect("handler");

    let stream = handler
        .as_any()
        .downcast_ref::<StreamHandler>()
        .expect("stream handler");
    let explicit = StreamHandler::new("/tmp/x.log", LogLevel::Info)
        .with_bubble(true)
        .with_locking(false)
        .with_file_permission(None);

    assert_eq!(stream.bubble(), explicit.bubble());
    assert_eq!(stream.use_locking(), explicit.use_locking());
    assert_eq!(stream.file_permission(), explicit.file_permission());
    assert_eq!(stream.target(), explicit.target());
}

#[test]
fn test_unknown_handler_type_names_tag() {
    let factory = LoggerFactory::new();
    let err = factory
        .create_handler("h2", "bogus", LogLevel::Info, &json!({}))
        .unwrap_err();

    assert!(matches!(
        &err,
        LoggerError::UnsupportedType { tag, .. } if tag == "bogus"
    ));
    assert!(!factory.has_handler("h2"));
}

#[test]
fn test_processors_apply_in_attachment_order() {
    let factory = LoggerFactory::new();
    factory
        .set_processor("p1", processor(|r: LogRecord| {
            let message = format!("{}+p1", r.message);
            LogRecord { message, ..r }
        }))
        .set_processor("p2", processor(|r: LogRecord| {
            let message = format!("{}+p2", r.message);
            LogRecord { message, ..r }
        }));

    let handler = factory
        .create_handler(
            "h3",
            "null",
            LogLevel::Debug,
            &json!({"processorIds": ["p1", "p2"]}),
        )
        .expect("handler");

    let processed = handler.process_record(LogRecord::new("app", LogLevel::Debug, "m"));
    assert_eq!(processed.message, "m+p1+p2");
}

#[test]
fn test_set_formatter_overwrite_keeps_captured_instance() {
    let factory = LoggerFactory::new();
    let a: Arc<dyn Formatter> = Arc::new(LineFormatter::new(Some("A %message%"), None));
    let b: Arc<dyn Formatter> = Arc::new(LineFormatter::new(Some("B %message%"), None));

    factory.set_formatter("f", Arc::clone(&a));
    let captured = factory.get_formatter("f").expect("A");
    factory.set_formatter("f", Arc::clone(&b));

    let record = LogRecord::new("app", LogLevel::Info, "x");
    assert_eq!(factory.get_formatter("f").expect("B").format(&record), "B x");
    assert_eq!(captured.format(&record), "A x");
}

#[test]
fn test_set_then_get_returns_same_instance() {
    let factory = LoggerFactory::new();
    let logger = Arc::new(Logger::new("manual", Vec::new(), Vec::new(), None));
    let handler: Arc<dyn Handler> = Arc::new(NullHandler::new(LogLevel::Info));
    let proc: Processor = processor(|r: LogRecord| r);
    let formatter: Arc<dyn Formatter> = Arc::new(LineFormatter::default());

    factory
        .set_logger("l", Arc::clone(&logger))
        .set_handler("h", Arc::clone(&handler))
        .set_processor("p", Arc::clone(&proc))
        .set_formatter("f", Arc::clone(&formatter));

    assert!(Arc::ptr_eq(&factory.get_logger("l").expect("l"), &logger));
    assert!(Arc::ptr_eq(&factory.get_handler("h").expect("h"), &handler));
    assert!(Arc::ptr_eq(&factory.get_processor("p").expect("p"), &proc));
    assert!(Arc::ptr_eq(&factory.get_formatter("f").expect("f"), &formatter));
}

#[test]
fn test_set_logger_does_not_affect_holders() {
    let factory = LoggerFactory::new();
    let original = factory.create_logger("app", &json!({})).expect("logger");
    let replacement = Arc::new(Logger::new("app", Vec::new(), Vec::new(), None));

    factory.set_logger("app", Arc::clone(&replacement));
    assert!(Arc::ptr_eq(&factory.get_logger("app").expect("app"), &replacement));
    assert!(!Arc::ptr_eq(&original, &replacement));

    // Created again: the cached replacement wins
    let again = factory.create_logger("app", &json!({})).expect("cached");
    assert!(Arc::ptr_eq(&again, &replacement));
}

#[test]
fn test_end_to_end_stream_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = log_path(&temp_dir, "app.log");

    let factory = LoggerFactory::new();
    factory.set_processor(
        "host",
        processor(|r: LogRecord| r.with_extra("host", "web-1")),
    );
    factory
        .create_handler(
            "file",
            "stream",
            LogLevel::Info,
            &json!({"stream": path, "useLocking": true, "processorIds": ["host"]}),
        )
        .expect("handler");
    let logger = factory
        .create_logger("app", &json!({"handlers": ["file"], "timezone": "UTC"}))
        .expect("logger");

    assert!(!logger.debug("below level"));
    assert!(logger.log_with_context(
        LogLevel::Warning,
        "disk low",
        LogContext::new().with_field("free_mb", 12),
    ));
    logger.flush().expect("flush");

    let content = fs::read_to_string(&path).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("app.WARNING: disk low {\"free_mb\":12} {\"host\":\"web-1\"}"));
    assert!(lines[0].contains("+00:00]"));
}

#[test]
fn test_bubble_false_stops_chain() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = log_path(&temp_dir, "first.log");
    let second = log_path(&temp_dir, "second.log");

    let factory = LoggerFactory::new();
    factory
        .create_handler(
            "first",
            "stream",
            LogLevel::Debug,
            &json!({"stream": first, "bubble": false}),
        )
        .expect("first");
    factory
        .create_handler("second", "stream", LogLevel::Debug, &json!({"stream": second}))
        .expect("second");
    let logger = factory
        .create_logger("app", &json!({"handlers": ["first", "second"]}))
        .expect("logger");

    logger.error("only once");
    logger.flush().expect("flush");

    assert!(fs::read_to_string(&first)
        .expect("first log")
        .contains("only once"));
    assert!(!std::path::Path::new(&second).exists());
}

#[test]
fn test_null_handler_swallows_records() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = log_path(&temp_dir, "after-null.log");

    let factory = LoggerFactory::new();
    factory
        .create_handler("void", "null", LogLevel::Warning, &json!({}))
        .expect("null");
    factory
        .create_handler("file", "stream", LogLevel::Debug, &json!({"stream": path}))
        .expect("file");
    let logger = factory
        .create_logger("app", &json!({"handlers": ["void", "file"]}))
        .expect("logger");

    logger.error("swallowed");
    logger.info("passes the null handler");
    logger.flush().expect("flush");

    let content = fs::read_to_string(&path).expect("Failed to read log file");
    assert!(!content.contains("swallowed"));
    assert!(content.contains("passes the null handler"));
}

#[test]
fn test_load_from_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = log_path(&temp_dir, "configured.log");
    let config_path = temp_dir.path().join("logging.json");

    let config = json!({
        "handlers": {
            "main": {"type": "stream", "level": "notice", "stream": log},
            "errors": {"type": "error_log", "level": 400, "messageType": 0}
        },
        "formatters": {
            "short": {"type": "line", "format": "%level_name%: %message%"}
        },
        "loggers": {
            "app": {"handlers": ["main", "errors"]},
            "audit": {"handlers": ["main"], "timezone": "+02:00"}
        }
    });
    fs::write(&config_path, config.to_string()).expect("write config");

    let factory = LoggerFactory::new();
    factory
        .load(&FactoryConfig::from_json_file(&config_path).expect("parse config"))
        .expect("load");

    assert_eq!(factory.get_loggers().len(), 2);
    assert_eq!(factory.get_handlers().len(), 2);
    assert_eq!(factory.get_formatters().len(), 1);

    let audit = factory.get_logger("audit").expect("audit");
    assert_eq!(audit.timezone().now().offset().local_minus_utc(), 7200);
    assert!(Arc::ptr_eq(
        &audit.handlers()[0],
        &factory.get_logger("app").expect("app").handlers()[0]
    ));

    audit.notice("configured");
    audit.flush().expect("flush");
    assert!(fs::read_to_string(&log)
        .expect("read log")
        .contains("audit.NOTICE: configured"));
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = FactoryConfig::from_json_file(temp_dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, LoggerError::IoOperation { .. }));
}

#[test]
fn test_load_stops_at_unknown_handler_type() {
    let factory = LoggerFactory::new();
    let config = FactoryConfig::from_json_str(
        r#"{
            "handlers": {"odd": {"type": "syslog"}},
            "loggers": {"app": {"handlers": ["odd"]}}
        }"#,
    )
    .expect("parse");

    assert!(matches!(
        factory.load(&config),
        Err(LoggerError::UnsupportedType { .. })
    ));
    assert!(!factory.has_logger("app"));
}

#[test]
fn test_shared_logger_recorder() {
    // Handler shared by two loggers receives records from both, in order
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let factory = LoggerFactory::new();
    factory.set_processor(
        "record",
        processor(move |r: LogRecord| {
            sink.lock().push(format!("{}:{}", r.channel, r.message));
            r
        }),
    );
    factory
        .create_handler(
            "shared",
            "null",
            LogLevel::Debug,
            &json!({"processorIds": ["record"]}),
        )
        .expect("handler");
    let web = factory
        .create_logger("web", &json!({"handlers": ["shared"]}))
        .expect("web");
    let db = factory
        .create_logger("db", &json!({"handlers": ["shared"]}))
        .expect("db");

    web.info("request");
    db.info("query");
    assert_eq!(*seen.lock(), vec!["web:request", "db:query"]);
}
