//! Operation guard, input validation, and catalog composition.
//!
//! [`guard`] is the single error-translation boundary between foreign
//! faults and the service taxonomy. [`Catalog`] assembles a service's
//! flat operation namespace from its capability groups and rejects name
//! collisions when the service is built, not when it is called.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use crate::backend::Fault;
use crate::errors::{CompositionError, Result, ServiceError};

// ── Operation guard ───────────────────────────────────────────────────────────

/// Error union used inside operation bodies so `?` works on both foreign
/// faults and deliberate taxonomy errors.
#[derive(Debug)]
pub enum OpError {
    /// A taxonomy error raised deliberately by validation or accessors.
    Service(ServiceError),
    /// An unexpected foreign fault awaiting translation by [`guard`].
    Fault(Fault),
}

impl From<ServiceError> for OpError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<Fault> for OpError {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

/// Run an operation body, translating foreign faults exactly once.
///
/// Taxonomy errors raised inside the body (invalid input, missing
/// resource, accessor failures) propagate unchanged. Any [`Fault`] is
/// re-raised as [`ServiceError::Operation`] tagged with `operation` and
/// carrying the fault as its cause. Nothing is ever swallowed.
///
/// # Errors
///
/// Returns whatever taxonomy error the body raised, or
/// [`ServiceError::Operation`] for a foreign fault.
pub fn guard<T>(
    operation: &str,
    body: impl FnOnce() -> std::result::Result<T, OpError>,
) -> Result<T> {
    match body() {
        Ok(value) => Ok(value),
        Err(OpError::Service(err)) => Err(err),
        Err(OpError::Fault(fault)) => {
            warn!(operation, %fault, "foreign call faulted");
            Err(ServiceError::Operation {
                operation: operation.to_owned(),
                source: fault,
            })
        }
    }
}

// ── Input validation ──────────────────────────────────────────────────────────

/// Require a non-empty, non-whitespace string parameter.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidInput`] naming `field` when the value
/// is empty or whitespace-only.
pub fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(format!(
            "'{field}' must not be empty"
        )));
    }
    Ok(())
}

/// Parse an RFC 3339 timestamp parameter.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidInput`] naming `field` when the value
/// does not parse.
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| {
            ServiceError::InvalidInput(format!("'{field}' is not a valid RFC 3339 timestamp: {err}"))
        })
}

// ── Flat argument map extraction ──────────────────────────────────────────────

/// Extract a required non-empty string argument from a flat argument map.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidInput`] if the key is absent, not a
/// string, or empty.
pub fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    let value = args
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ServiceError::InvalidInput(format!("'{key}' is required")))?;
    non_empty(key, value)?;
    Ok(value)
}

/// Extract an optional string argument from a flat argument map.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidInput`] if the key is present but not
/// a string.
pub fn optional_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ServiceError::InvalidInput(format!(
            "'{key}' must be a string, got {other}"
        ))),
    }
}

/// Extract an optional boolean argument, defaulting when absent.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidInput`] if the key is present but not
/// a boolean.
pub fn optional_bool(args: &Map<String, Value>, key: &str, default: bool) -> Result<bool> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ServiceError::InvalidInput(format!(
            "'{key}' must be a boolean, got {other}"
        ))),
    }
}

/// Extract a required positive integer argument.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidInput`] if the key is absent, not an
/// integer, or not positive.
pub fn required_index(args: &Map<String, Value>, key: &str) -> Result<u64> {
    let value = args
        .get(key)
        .and_then(Value::as_u64)
        .ok_or_else(|| ServiceError::InvalidInput(format!("'{key}' must be a positive integer")))?;
    if value == 0 {
        return Err(ServiceError::InvalidInput(format!(
            "'{key}' must be a positive integer"
        )));
    }
    Ok(value)
}

/// Extract a required finite number argument.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidInput`] if the key is absent or not a
/// number.
pub fn required_f64(args: &Map<String, Value>, key: &str) -> Result<f64> {
    args.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| ServiceError::InvalidInput(format!("'{key}' must be a number")))
}

/// Extract a required value argument of any JSON type.
///
/// # Errors
///
/// Returns [`ServiceError::InvalidInput`] if the key is absent.
pub fn required_value<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    args.get(key)
        .ok_or_else(|| ServiceError::InvalidInput(format!("'{key}' is required")))
}

// ── Catalog composition ───────────────────────────────────────────────────────

/// One capability group's contribution to a service catalog: the group
/// name plus the operation names it defines.
pub type CapabilityGroup = (&'static str, &'static [&'static str]);

/// Flat operation namespace of a composed service.
///
/// Built once at service assembly from the service's capability groups.
/// Duplicate operation names across groups are rejected here, so a
/// collision can never surface as runtime dispatch ambiguity.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: BTreeMap<String, &'static str>,
}

impl Catalog {
    /// Compose a catalog from capability groups.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] on the first duplicate operation
    /// name, naming both defining groups.
    pub fn compose(
        groups: &[CapabilityGroup],
    ) -> std::result::Result<Self, CompositionError> {
        let mut entries: BTreeMap<String, &'static str> = BTreeMap::new();
        for (group, operations) in groups {
            for operation in *operations {
                if let Some(first) = entries.insert((*operation).to_owned(), group) {
                    return Err(CompositionError {
                        operation: (*operation).to_owned(),
                        first,
                        second: group,
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// Whether the catalog defines `operation`.
    #[must_use]
    pub fn contains(&self, operation: &str) -> bool {
        self.entries.contains_key(operation)
    }

    /// Capability group that defines `operation`, if any.
    #[must_use]
    pub fn group_of(&self, operation: &str) -> Option<&'static str> {
        self.entries.get(operation).copied()
    }

    /// Number of operations in the namespace.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the namespace is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(operation, group)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.entries.iter().map(|(op, group)| (op.as_str(), *group))
    }
}
