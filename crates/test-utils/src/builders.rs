#![allow(dead_code)]

use serde_json::{json, Map, Value};
use shiftsync::config::Config;

/// Builder for config JSON documents to simplify test setup.
///
/// Starts from a complete, valid document; tests then break exactly the part
/// they care about.
pub struct ConfigBuilder {
    doc: Map<String, Value>,
}

impl ConfigBuilder {
    /// One calendar, two shifts (`M`, `N`), one employee, valid policies,
    /// timezone `Europe/Madrid`.
    pub fn new() -> Self {
        let doc = json!({
            "calendars": [
                { "calendar_id": "team@example.com", "employees": ["Ana"] }
            ],
            "shifts": {
                "M": {
                    "label": "Morning",
                    "color": "#ffcc00",
                    "period": { "start": "08:00", "end": "16:00" }
                },
                "N": {
                    "label": "Night",
                    "color": "#3300aa",
                    "period": { "start": "22:00", "end": "06:00" }
                }
            },
            "employees": {
                "Ana": { "color": "#00aaff" }
            },
            "deletion_policy": "preserve_manual",
            "event_handling": {
                "duplicate_shifts": "update",
                "overlapping_shifts": "warn",
                "api_failures": "retry",
                "partial_updates": "preserve_existing",
                "missing_employees": "warn_continue",
                "extra_employees": "ignore"
            },
            "timezone": "Europe/Madrid"
        });

        match doc {
            Value::Object(doc) => Self { doc },
            _ => unreachable!("json! object literal"),
        }
    }

    /// Set or replace a top-level member.
    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.doc.insert(field.to_string(), value);
        self
    }

    /// Drop a top-level member.
    pub fn without(mut self, field: &str) -> Self {
        self.doc.remove(field);
        self
    }

    pub fn with_calendar(mut self, calendar_id: &str, employees: &[&str]) -> Self {
        if let Some(Value::Array(cals)) = self.doc.get_mut("calendars") {
            cals.push(json!({ "calendar_id": calendar_id, "employees": employees }));
        }
        self
    }

    pub fn with_shift(mut self, key: &str, label: &str, start: &str, end: &str) -> Self {
        if let Some(Value::Object(shifts)) = self.doc.get_mut("shifts") {
            shifts.insert(
                key.to_string(),
                json!({
                    "label": label,
                    "color": "#888888",
                    "period": { "start": start, "end": end }
                }),
            );
        }
        self
    }

    pub fn with_employee(mut self, name: &str, color: &str) -> Self {
        if let Some(Value::Object(employees)) = self.doc.get_mut("employees") {
            employees.insert(name.to_string(), json!({ "color": color }));
        }
        self
    }

    /// Set one `event_handling` policy.
    pub fn with_policy(mut self, field: &str, value: Value) -> Self {
        if let Some(Value::Object(eh)) = self.doc.get_mut("event_handling") {
            eh.insert(field.to_string(), value);
        }
        self
    }

    /// Overwrite the existing value at a JSON pointer (e.g. `/shifts/M/period/start`).
    pub fn patch(mut self, pointer: &str, value: Value) -> Self {
        let mut doc = Value::Object(std::mem::take(&mut self.doc));
        if let Some(slot) = doc.pointer_mut(pointer) {
            *slot = value;
        }
        if let Value::Object(map) = doc {
            self.doc = map;
        }
        self
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.doc.clone())
    }

    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    pub fn build(self) -> Config {
        Config::try_from(self.to_value()).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
