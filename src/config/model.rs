// src/config/model.rs

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveTime, TimeDelta};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{
    ApiFailurePolicy, DeletionPolicy, DuplicateShiftPolicy, ExtraEmployeePolicy,
    MissingEmployeePolicy, OverlappingShiftPolicy, PartialUpdatePolicy,
};

/// Strict 24h `HH:MM`, always two digits each.
pub(crate) static TIME_OF_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1][0-9]|2[0-3]):([0-5][0-9])$").expect("time-of-day pattern is valid")
});

/// Validated configuration, as loaded from a JSON file.
///
/// ```json
/// {
///   "calendars": [
///     { "calendar_id": "team@example.com", "employees": ["Ana"] }
///   ],
///   "shifts": {
///     "M": { "label": "Morning", "color": "#ffcc00",
///            "period": { "start": "08:00", "end": "16:00" } }
///   },
///   "employees": { "Ana": { "color": "#00aaff" } },
///   "deletion_policy": "preserve_manual",
///   "event_handling": {
///     "duplicate_shifts": "update",
///     "overlapping_shifts": "warn",
///     "api_failures": "retry",
///     "partial_updates": "preserve_existing",
///     "missing_employees": "warn_continue",
///     "extra_employees": "ignore"
///   },
///   "timezone": "Europe/Madrid"
/// }
/// ```
///
/// Deserializing a `Config` always goes through
/// [`validate_config`](crate::config::validate_config), so a value of this
/// type is valid by construction. Unknown members are kept in `extra` at
/// every level and serialized back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Config {
    pub calendars: Vec<CalendarEntry>,
    pub shifts: BTreeMap<String, ShiftConfig>,
    pub employees: BTreeMap<String, EmployeeConfig>,
    pub deletion_policy: DeletionPolicy,
    pub event_handling: EventHandlingConfig,
    pub timezone: Timezone,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Shape used for the typed conversion once validation has passed.
#[derive(Deserialize)]
pub(crate) struct UncheckedConfig {
    calendars: Vec<CalendarEntry>,
    shifts: BTreeMap<String, ShiftConfig>,
    employees: BTreeMap<String, EmployeeConfig>,
    deletion_policy: DeletionPolicy,
    event_handling: EventHandlingConfig,
    timezone: Timezone,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Config {
    pub(crate) fn new_unchecked(raw: UncheckedConfig) -> Self {
        Self {
            calendars: raw.calendars,
            shifts: raw.shifts,
            employees: raw.employees,
            deletion_policy: raw.deletion_policy,
            event_handling: raw.event_handling,
            timezone: raw.timezone,
            extra: raw.extra,
        }
    }

    pub fn shift(&self, key: &str) -> Option<&ShiftConfig> {
        self.shifts.get(key)
    }

    pub fn employee(&self, name: &str) -> Option<&EmployeeConfig> {
        self.employees.get(name)
    }

    /// Calendars that list `employee` among their members.
    pub fn calendars_for<'a>(&'a self, employee: &'a str) -> impl Iterator<Item = &'a CalendarEntry> {
        self.calendars
            .iter()
            .filter(move |c| c.employee_names().any(|n| n == employee))
    }
}

/// One target calendar and the employees whose shifts go into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// Provider-side identifier, usually an email address.
    pub calendar_id: String,

    /// Member entries exactly as written. Element types are not checked, so
    /// anything other than a string is kept as-is and skipped by
    /// [`CalendarEntry::employee_names`].
    pub employees: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalendarEntry {
    pub fn employee_names(&self) -> impl Iterator<Item = &str> {
        self.employees.iter().filter_map(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftConfig {
    pub label: String,
    /// Intended to be a hex colour; not checked.
    pub color: String,
    pub period: ShiftPeriod,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Start and end of a shift. `end` may be earlier than `start` for shifts
/// that run past midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftPeriod {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShiftPeriod {
    pub fn is_overnight(&self) -> bool {
        self.end <= self.start
    }

    /// Length of the shift, wrapping past midnight when needed.
    ///
    /// A period whose start equals its end is treated as a full day.
    pub fn duration(&self) -> TimeDelta {
        let start = i64::from(self.start.minutes_since_midnight());
        let end = i64::from(self.end.minutes_since_midnight());
        let minutes = if end > start { end - start } else { end + 24 * 60 - start };
        TimeDelta::minutes(minutes)
    }
}

/// Wall-clock time parsed from a strict `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Parse `HH:MM` (00:00 through 23:59, leading zeros required).
    pub fn parse(s: &str) -> Option<Self> {
        let caps = TIME_OF_DAY_RE.captures(s)?;
        let hour = caps[1].parse().ok()?;
        let minute = caps[2].parse().ok()?;
        Some(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    pub fn to_naive_time(self) -> NaiveTime {
        // hour < 24 and minute < 60 hold for every parsed value.
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or_default()
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TimeOfDay::parse(&s).ok_or_else(|| format!("invalid time of day: {s} (expected HH:MM)"))
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// IANA zone name as written in the config, plus the zone it resolves to.
///
/// Names resolve case-insensitively (`"europe/madrid"` is `Europe/Madrid`),
/// but the original spelling is what gets displayed and serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone {
    name: String,
    tz: Tz,
}

impl Timezone {
    pub fn parse(name: &str) -> Option<Self> {
        let tz = Tz::from_str_insensitive(name).ok()?;
        Some(Self {
            name: name.to_string(),
            tz,
        })
    }

    /// The name exactly as written.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Canonical IANA spelling, e.g. `Europe/Madrid` for `europe/madrid`.
    pub fn canonical_name(&self) -> &'static str {
        self.tz.name()
    }
}

impl TryFrom<String> for Timezone {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Timezone::parse(&name).ok_or_else(|| format!("unknown timezone: {name}"))
    }
}

impl From<Timezone> for String {
    fn from(tz: Timezone) -> Self {
        tz.name
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Per-employee settings.
///
/// Entries are not validated beyond being present in the `employees` object,
/// so the raw JSON value is kept and read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeConfig(pub Value);

impl EmployeeConfig {
    /// `color`, when present and a string.
    pub fn color(&self) -> Option<&str> {
        self.0.get("color").and_then(Value::as_str)
    }
}

/// Policies an eventual sync applies when things do not line up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHandlingConfig {
    pub duplicate_shifts: DuplicateShiftPolicy,
    pub overlapping_shifts: OverlappingShiftPolicy,
    pub api_failures: ApiFailurePolicy,
    pub partial_updates: PartialUpdatePolicy,
    pub missing_employees: MissingEmployeePolicy,
    pub extra_employees: ExtraEmployeePolicy,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
