//! RDAP lens types
//!
//! Borrowed views over a raw RDAP JSON response. The record itself stays an
//! opaque `serde_json::Value`; the views only read the paths the lens needs
//! and report anything missing as [`GripError::Structure`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{GripError, Result};
use crate::lens::fields::{value_to_display, FieldRow};
use crate::lens::time::TimeLens;

/// Fields shown for the top-level network object, in display order
pub const NETWORK_FIELDS: [&str; 8] = [
    "handle",
    "ipVersion",
    "name",
    "objectClassName",
    "parentHandle",
    "port43",
    "rdapConformance",
    "startAddress",
];

/// Fields shown for a registration entity, in display order
pub const ENTRY_FIELDS: [&str; 5] = ["handle", "objectClassName", "port43", "roles", "status"];

// =============================================================================
// Timestamp axis
// =============================================================================

/// Which entity event to rank by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TimestampKind {
    /// When the entity was registered
    #[default]
    Registration,
    /// When the entity was last changed
    LastChanged,
}

impl TimestampKind {
    /// Fixed position of this event in an entity's `events` array
    pub fn event_position(self) -> usize {
        match self {
            TimestampKind::LastChanged => 0,
            TimestampKind::Registration => 1,
        }
    }

    /// The `eventAction` value RDAP servers use for this event
    pub fn event_action(self) -> &'static str {
        match self {
            TimestampKind::LastChanged => "last changed",
            TimestampKind::Registration => "registration",
        }
    }
}

impl std::fmt::Display for TimestampKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampKind::Registration => write!(f, "registration"),
            TimestampKind::LastChanged => write!(f, "last-changed"),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// A parsed RDAP response for one IP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RdapRecord {
    value: Value,
}

impl RdapRecord {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// The registration entities under `entities[0].entities`
    ///
    /// A missing path or an empty list is a structural error; a record with
    /// nothing to rank is never returned as an empty success.
    pub fn entities(&self) -> Result<Vec<Entity<'_>>> {
        let nested = self
            .value
            .get("entities")
            .and_then(Value::as_array)
            .and_then(|outer| outer.first())
            .ok_or_else(|| GripError::structure("record has no entities[0]"))?
            .get("entities")
            .and_then(Value::as_array)
            .ok_or_else(|| GripError::structure("record has no entities[0].entities list"))?;

        if nested.is_empty() {
            return Err(GripError::structure("entities[0].entities is empty"));
        }

        Ok(nested
            .iter()
            .enumerate()
            .map(|(index, value)| Entity::new(index, value))
            .collect())
    }

    /// Summary rows for the network object: its registration date, then
    /// [`NETWORK_FIELDS`]. Absent fields show as empty strings.
    pub fn network_rows(&self, time: &TimeLens) -> Result<Vec<FieldRow>> {
        let registration = match self
            .value
            .get("events")
            .and_then(Value::as_array)
            .and_then(|events| events.first())
            .and_then(|event| event.get("eventDate"))
            .and_then(Value::as_str)
        {
            Some(date) => time.to_human_parts(date)?.to_string(),
            None => String::new(),
        };

        let mut rows = vec![("registration".to_string(), registration)];
        rows.extend(scalar_rows(&self.value, &NETWORK_FIELDS));
        Ok(rows)
    }
}

/// Status code an RDAP server answers with for unallocated ranges
const NOT_FOUND: u64 = 404;

/// The `errorCode` of an RDAP error object, numeric or quoted
fn error_code(payload: &Value) -> Option<&Value> {
    payload.get("errorCode")
}

fn is_not_found(code: &Value) -> bool {
    match code {
        Value::Number(n) => n.as_u64() == Some(NOT_FOUND),
        Value::String(s) => s.trim().parse::<u64>().ok() == Some(NOT_FOUND),
        _ => false,
    }
}

/// Whether an RDAP payload is a placeholder rather than a registration.
///
/// Unallocated and IANA-reserved ranges come back either as a 404 RDAP error
/// object or as an IANA-held block. Other error objects are not markers.
pub fn is_reserved_marker(payload: &Value) -> bool {
    if let Some(code) = error_code(payload) {
        return is_not_found(code);
    }
    payload
        .get("handle")
        .and_then(Value::as_str)
        .map(|handle| handle.to_ascii_uppercase().starts_with("IANA"))
        .unwrap_or(false)
}

/// Outcome of an RDAP lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RdapResponse {
    /// A normal registration record
    Record(RdapRecord),
    /// The address is unallocated or reserved; nothing to rank
    Reserved,
}

impl RdapResponse {
    /// Classify a parsed payload.
    ///
    /// An error object other than 404 is a server failure and becomes
    /// [`GripError::Transport`] carrying its code and title.
    pub fn from_payload(payload: Value) -> Result<Self> {
        if is_reserved_marker(&payload) {
            return Ok(RdapResponse::Reserved);
        }
        if let Some(code) = error_code(&payload) {
            let code = value_to_display(code);
            let title = payload
                .get("title")
                .map(value_to_display)
                .unwrap_or_default();
            return Err(GripError::Transport(format!("RDAP error {code}: {title}")));
        }
        Ok(RdapResponse::Record(RdapRecord::new(payload)))
    }

    /// The record, or [`GripError::ReservedAddress`] naming `ip`
    pub fn into_record(self, ip: &str) -> Result<RdapRecord> {
        match self {
            RdapResponse::Record(record) => Ok(record),
            RdapResponse::Reserved => Err(GripError::ReservedAddress(ip.to_string())),
        }
    }
}

// =============================================================================
// Entity
// =============================================================================

/// One registration entity, remembered with its position in the record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity<'a> {
    index: usize,
    value: &'a Value,
}

impl<'a> Entity<'a> {
    pub fn new(index: usize, value: &'a Value) -> Self {
        Self { index, value }
    }

    /// Position in `entities[0].entities`
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn handle(&self) -> Option<&'a str> {
        self.value.get("handle").and_then(Value::as_str)
    }

    /// The `eventDate` string for the given axis.
    ///
    /// Events are read by fixed position; an entity with fewer than two
    /// events is malformed.
    pub fn event_date(&self, kind: TimestampKind) -> Result<&'a str> {
        let events = self
            .value
            .get("events")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                GripError::structure(format!("entity {} has no events list", self.index))
            })?;

        if events.len() < 2 {
            return Err(GripError::structure(format!(
                "entity {} has {} event(s), expected 2",
                self.index,
                events.len()
            )));
        }

        let event = &events[kind.event_position()];
        if let Some(action) = event.get("eventAction").and_then(Value::as_str) {
            if !action.eq_ignore_ascii_case(kind.event_action()) {
                warn!(
                    "entity {} event {} is labelled {:?}, reading it as {:?}",
                    self.index,
                    kind.event_position(),
                    action,
                    kind.event_action()
                );
            }
        }

        event
            .get("eventDate")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                GripError::structure(format!(
                    "entity {} event {} has no eventDate",
                    self.index,
                    kind.event_position()
                ))
            })
    }

    /// Email and telephone from the first matching vCard properties
    fn contact(&self, property: &str) -> String {
        self.value
            .get("vcardArray")
            .and_then(|v| v.get(1))
            .and_then(Value::as_array)
            .and_then(|props| {
                props.iter().find(|prop| {
                    prop.get(0).and_then(Value::as_str) == Some(property)
                })
            })
            .and_then(|prop| prop.get(3))
            .map(value_to_display)
            .unwrap_or_default()
    }

    /// Summary rows for this entity: registration and last-changed dates,
    /// [`ENTRY_FIELDS`], then email and telephone.
    pub fn summary_rows(&self, time: &TimeLens) -> Result<Vec<FieldRow>> {
        let registration = time.to_human_parts(self.event_date(TimestampKind::Registration)?)?;
        let last_changed = time.to_human_parts(self.event_date(TimestampKind::LastChanged)?)?;

        let mut rows = vec![
            ("registration".to_string(), registration.to_string()),
            ("last changed".to_string(), last_changed.to_string()),
        ];
        rows.extend(scalar_rows(self.value, &ENTRY_FIELDS));
        rows.push(("email".to_string(), self.contact("email")));
        rows.push(("telephone".to_string(), self.contact("tel")));
        Ok(rows)
    }
}

fn scalar_rows(value: &Value, names: &[&str]) -> Vec<FieldRow> {
    names
        .iter()
        .map(|name| {
            let shown = value.get(*name).map(value_to_display).unwrap_or_default();
            (name.to_string(), shown)
        })
        .collect()
}

/// An entity paired with whole days elapsed since its chosen event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalSample<'a> {
    pub entity: Entity<'a>,
    pub elapsed_days: i64,
}

impl<'a> TemporalSample<'a> {
    pub fn new(entity: Entity<'a>, elapsed_days: i64) -> Self {
        Self {
            entity,
            elapsed_days,
        }
    }
}
