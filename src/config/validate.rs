// src/config/validate.rs

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::fields::{validate_fields, validate_policy, FieldKind};
use crate::config::model::{Config, TIME_OF_DAY_RE, Timezone, UncheckedConfig};
use crate::errors::ConfigValidationError;
use crate::types::{
    ApiFailurePolicy, DeletionPolicy, DuplicateShiftPolicy, ExtraEmployeePolicy,
    MissingEmployeePolicy, OverlappingShiftPolicy, PartialUpdatePolicy,
};

type Result<T> = std::result::Result<T, ConfigValidationError>;

const TOP_LEVEL_FIELDS: &[(&str, FieldKind)] = &[
    ("calendars", FieldKind::Array),
    ("shifts", FieldKind::Object),
    ("employees", FieldKind::Object),
    ("deletion_policy", FieldKind::String),
    ("event_handling", FieldKind::Object),
    ("timezone", FieldKind::String),
];

const CALENDAR_FIELDS: &[(&str, FieldKind)] = &[
    ("calendar_id", FieldKind::String),
    ("employees", FieldKind::Array),
];

const SHIFT_FIELDS: &[(&str, FieldKind)] = &[
    ("label", FieldKind::String),
    ("color", FieldKind::String),
    ("period", FieldKind::Object),
];

const PERIOD_FIELDS: &[(&str, FieldKind)] = &[
    ("start", FieldKind::String),
    ("end", FieldKind::String),
];

const EVENT_HANDLING_FIELDS: &[(&str, FieldKind)] = &[
    ("duplicate_shifts", FieldKind::String),
    ("overlapping_shifts", FieldKind::String),
    ("api_failures", FieldKind::String),
    ("partial_updates", FieldKind::String),
    ("missing_employees", FieldKind::String),
    ("extra_employees", FieldKind::String),
];

impl TryFrom<Value> for Config {
    type Error = ConfigValidationError;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        validate_config(&value)?;
        let raw: UncheckedConfig = serde_json::from_value(value)
            .map_err(|e| ConfigValidationError::Shape(e.to_string()))?;
        Ok(Config::new_unchecked(raw))
    }
}

/// Validate a parsed JSON document against the configuration schema.
///
/// Checks run in a fixed order and stop at the first violation:
/// 1. top-level fields and their coarse kinds
/// 2. `deletion_policy`
/// 3. every calendar entry, by index
/// 4. every shift (fields, period fields, `HH:MM` times)
/// 5. `event_handling` fields, then each of its six policies
/// 6. `timezone`
///
/// Employee names in calendars are not cross-checked against `employees`.
pub fn validate_config(value: &Value) -> Result<()> {
    debug!("validating config document");
    let root = validate_fields(value, TOP_LEVEL_FIELDS, "config")?;

    validate_policy::<DeletionPolicy>(root.get("deletion_policy")?, "deletion_policy")?;

    validate_calendars(root.array("calendars")?)?;
    validate_shifts(root.object("shifts")?)?;
    validate_event_handling(root.get("event_handling")?)?;
    validate_timezone(root.str("timezone")?)?;

    debug!("config document passed validation");
    Ok(())
}

fn validate_calendars(entries: &[Value]) -> Result<()> {
    for (index, entry) in entries.iter().enumerate() {
        validate_fields(entry, CALENDAR_FIELDS, &format!("calendars[{index}]"))?;
    }
    Ok(())
}

fn validate_shifts(shifts: &Map<String, Value>) -> Result<()> {
    for (key, shift) in shifts {
        let context = format!("shifts.{key}");
        let shift = validate_fields(shift, SHIFT_FIELDS, &context)?;

        let period_context = format!("{context}.period");
        let period = validate_fields(shift.get("period")?, PERIOD_FIELDS, &period_context)?;

        validate_time(period.str("start")?, &format!("{period_context}.start"))?;
        validate_time(period.str("end")?, &format!("{period_context}.end"))?;
    }
    Ok(())
}

fn validate_time(value: &str, field: &str) -> Result<()> {
    if TIME_OF_DAY_RE.is_match(value) {
        return Ok(());
    }
    Err(ConfigValidationError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn validate_event_handling(event_handling: &Value) -> Result<()> {
    let eh = validate_fields(event_handling, EVENT_HANDLING_FIELDS, "event_handling")?;

    validate_policy::<DuplicateShiftPolicy>(
        eh.get("duplicate_shifts")?,
        "event_handling.duplicate_shifts",
    )?;
    validate_policy::<OverlappingShiftPolicy>(
        eh.get("overlapping_shifts")?,
        "event_handling.overlapping_shifts",
    )?;
    validate_policy::<ApiFailurePolicy>(eh.get("api_failures")?, "event_handling.api_failures")?;
    validate_policy::<PartialUpdatePolicy>(
        eh.get("partial_updates")?,
        "event_handling.partial_updates",
    )?;
    validate_policy::<MissingEmployeePolicy>(
        eh.get("missing_employees")?,
        "event_handling.missing_employees",
    )?;
    validate_policy::<ExtraEmployeePolicy>(
        eh.get("extra_employees")?,
        "event_handling.extra_employees",
    )?;
    Ok(())
}

/// The zone must be known to the IANA database compiled into `chrono-tz`,
/// matched case-insensitively.
fn validate_timezone(name: &str) -> Result<()> {
    match Timezone::parse(name) {
        Some(_) => Ok(()),
        None => Err(ConfigValidationError::InvalidTimezone(name.to_string())),
    }
}
