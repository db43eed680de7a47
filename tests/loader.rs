mod common;
use crate::common::{init_tracing, write_config};

use std::io;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use shiftsync::config::{
    default_config_path, load_config, load_config_async, load_config_with, parse_config, Config,
};
use shiftsync::errors::{ConfigValidationError, ShiftSyncError};
use shiftsync::fs::mock::MockFileSystem;
use shiftsync_test_utils::builders::ConfigBuilder;

#[test]
fn valid_file_round_trips_to_identical_json() {
    init_tracing();
    let builder = ConfigBuilder::new();
    let file = write_config(&builder.to_json());

    let cfg = load_config(file.path()).unwrap();

    assert_eq!(cfg.calendars.len(), 1);
    assert_eq!(cfg.shifts.len(), 2);
    assert_eq!(cfg.employees.len(), 1);
    assert_eq!(serde_json::to_value(&cfg).unwrap(), builder.to_value());
}

#[test]
fn timezone_keeps_its_original_spelling() {
    let builder = ConfigBuilder::new().set("timezone", json!("europe/madrid"));
    let file = write_config(&builder.to_json());

    let cfg = load_config(file.path()).unwrap();

    assert_eq!(cfg.timezone.tz(), chrono_tz::Europe::Madrid);
    assert_eq!(serde_json::to_value(&cfg).unwrap()["timezone"], "europe/madrid");
    assert_eq!(serde_json::to_value(&cfg).unwrap(), builder.to_value());
}

#[test]
fn extra_fields_are_kept() {
    let builder = ConfigBuilder::new()
        .set("version", json!(2))
        .patch(
            "/shifts/M",
            json!({
                "label": "Morning",
                "color": "#ffcc00",
                "period": { "start": "08:00", "end": "16:00", "break": "12:00" },
                "notes": ["bring badge"]
            }),
        )
        .patch(
            "/calendars/0",
            json!({ "calendar_id": "team@example.com", "employees": ["Ana"], "primary": true }),
        );
    let file = write_config(&builder.to_json());

    let cfg = load_config(file.path()).unwrap();

    assert_eq!(cfg.extra.get("version"), Some(&json!(2)));
    assert_eq!(cfg.shift("M").unwrap().extra.get("notes"), Some(&json!(["bring badge"])));
    assert_eq!(cfg.calendars[0].extra.get("primary"), Some(&Value::Bool(true)));
    assert_eq!(serde_json::to_value(&cfg).unwrap(), builder.to_value());
}

#[test]
fn missing_top_level_field_fails_load() {
    let file = write_config(&ConfigBuilder::new().without("timezone").to_json());

    match load_config(file.path()) {
        Err(ShiftSyncError::ConfigValidation(err)) => {
            assert!(err
                .to_string()
                .contains("Missing required field 'timezone' in config"));
        }
        Err(e) => panic!("Expected ConfigValidation error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn malformed_json_is_a_validation_error() {
    let file = write_config("{ invalid: json }");

    match load_config(file.path()) {
        Err(ShiftSyncError::ConfigValidation(ConfigValidationError::InvalidJson(msg))) => {
            assert!(!msg.is_empty());
        }
        Err(e) => panic!("Expected InvalidJson, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("Invalid JSON in config file: "));
}

#[test]
fn missing_file_is_a_load_error_not_a_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = load_config(&path).unwrap_err();

    assert!(matches!(err, ShiftSyncError::ConfigLoad(_)));
    assert!(err.as_validation().is_none());
    assert!(err.to_string().starts_with("Failed to load config file: "));
}

#[test]
fn simulated_read_failure_carries_underlying_message() {
    let fs = MockFileSystem::new();
    fs.add_unreadable("/etc/shiftsync.json", "EACCES: permission denied");

    let err = load_config_with(&fs, "/etc/shiftsync.json").unwrap_err();

    assert!(matches!(err, ShiftSyncError::ConfigLoad(_)));
    assert_eq!(
        err.to_string(),
        "Failed to load config file: EACCES: permission denied"
    );
}

#[test]
fn mock_filesystem_loads_valid_document() {
    let fs = MockFileSystem::new();
    fs.add_file("config.json", ConfigBuilder::new().to_json());

    let cfg = load_config_with(&fs, "config.json").unwrap();
    assert_eq!(cfg.timezone.as_str(), "Europe/Madrid");

    let err = load_config_with(&fs, "other.json").unwrap_err();
    assert!(err.to_string().starts_with("Failed to load config file: File not found"));
}

#[test]
fn non_utf8_file_is_a_load_error() {
    let fs = MockFileSystem::new();
    fs.add_file("config.json", vec![0xff, 0xfe, 0x00]);

    let err = load_config_with(&fs, "config.json").unwrap_err();
    assert!(matches!(err, ShiftSyncError::ConfigLoad(_)));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn parse_and_validate_steps_are_logged_at_debug() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        parse_config(&ConfigBuilder::new().to_json()).unwrap();
    });

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("parsing config JSON"), "{output}");
    assert!(output.contains("validating config document"), "{output}");
    assert!(output.contains("config document passed validation"), "{output}");
}

#[test]
fn deserializing_config_directly_reports_validation_messages() {
    let json = ConfigBuilder::new()
        .set("timezone", json!("Invalid/Timezone"))
        .to_json();
    let err = serde_json::from_str::<Config>(&json).unwrap_err();
    assert!(err.to_string().contains("Invalid timezone: Invalid/Timezone"), "{err}");

    let json = ConfigBuilder::new().patch("/shifts/M/period/end", json!("24:00")).to_json();
    let err = serde_json::from_str::<Config>(&json).unwrap_err();
    assert!(err.to_string().contains("Invalid time format for shifts.M.period.end"), "{err}");
    assert!(!err.to_string().contains("expected shape"), "{err}");
}

#[test]
fn default_path_is_local_json_file() {
    assert_eq!(default_config_path(), std::path::PathBuf::from("shiftsync.json"));
}

#[tokio::test]
async fn async_loader_matches_sync_loader() {
    init_tracing();
    let file = write_config(&ConfigBuilder::new().to_json());

    let a = load_config_async(file.path()).await.unwrap();
    let b = load_config(file.path()).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn async_loader_reports_read_and_validation_failures() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config_async(dir.path().join("nope.json")).await.unwrap_err();
    assert!(matches!(err, ShiftSyncError::ConfigLoad(_)));

    let file = write_config(
        &ConfigBuilder::new()
            .set("timezone", json!("Invalid/Timezone"))
            .to_json(),
    );
    let err = load_config_async(file.path()).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid timezone: Invalid/Timezone");
}

#[tokio::test]
async fn concurrent_loads_are_independent() {
    let good = write_config(&ConfigBuilder::new().to_json());
    let bad = write_config(&ConfigBuilder::new().set("deletion_policy", json!("x")).to_json());

    let (a, b) = tokio::join!(load_config_async(good.path()), load_config_async(bad.path()));

    assert!(a.is_ok());
    assert!(b.unwrap_err().as_validation().is_some_and(|e| e.is_enum()));
}
