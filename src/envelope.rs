//! Uniform result envelope returned by every public operation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Success/failure record produced by every operation.
///
/// Carries the three mandatory fields plus free-form operation-specific
/// fields flattened into the same object on serialization. No schema is
/// enforced beyond the mandatory fields.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    /// Whether the operation completed.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Time the envelope was produced.
    pub timestamp: DateTime<Utc>,
    /// Operation-specific fields merged into the envelope.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Envelope {
    /// Build a success envelope with the given message.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: Utc::now(),
            fields: Map::new(),
        }
    }

    /// Build a failure envelope with the given message.
    ///
    /// Used by outer layers that report raised errors through the
    /// envelope shape; operations themselves raise instead.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            timestamp: Utc::now(),
            fields: Map::new(),
        }
    }

    /// Attach an operation-specific field.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}
