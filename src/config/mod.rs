// src/config/mod.rs

//! Configuration loading and validation for shiftsync.
//!
//! Responsibilities:
//! - Leaf checks for required fields and enum literals (`fields.rs`).
//! - The typed, validated data model (`model.rs`).
//! - Read + parse + validate a config file from disk (`loader.rs`).
//! - Walk an untyped JSON document and reject the first violation (`validate.rs`).

pub mod fields;
pub mod loader;
pub mod model;
pub mod validate;

pub use fields::{validate_enum, validate_fields, validate_policy, CheckedObject, FieldKind};
pub use loader::{
    default_config_path, load_config, load_config_async, load_config_with, parse_config,
};
pub use model::{
    CalendarEntry, Config, EmployeeConfig, EventHandlingConfig, ShiftConfig, ShiftPeriod,
    TimeOfDay, Timezone,
};
pub use validate::validate_config;
