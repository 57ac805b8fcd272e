//! Error taxonomy shared across the automation framework.
//!
//! Every failure a caller can observe is one of the five [`ServiceError`]
//! kinds. Foreign-object faults ([`Fault`]) never escape the operation
//! guard; they surface only as the `source` of [`ServiceError::Operation`].

use std::fmt::{Display, Formatter};

use crate::backend::Fault;

/// Shared framework result type.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Structured failure kinds raised by sessions and operations.
///
/// The set is closed: capability modules raise `MissingResource` and
/// `InvalidInput` directly, the session raises `Init` and `Cleanup`, and
/// the guard produces `Operation`. Errors are immutable once constructed
/// and never retried automatically.
#[derive(Debug)]
pub enum ServiceError {
    /// The foreign application could not be acquired, or the session is
    /// not in the `Ready` state.
    Init(String),
    /// A foreign-object call raised an unexpected fault during a named
    /// operation. Produced only by the operation guard.
    Operation {
        /// Name of the operation that was in flight.
        operation: String,
        /// The original foreign fault, preserved for diagnostics.
        source: Fault,
    },
    /// A required handle (current document, or an item looked up by
    /// identifier) is absent.
    MissingResource(String),
    /// A parameter failed local validation before any foreign call was
    /// made. Side-effect-free by construction.
    InvalidInput(String),
    /// One or more teardown steps failed during session cleanup. State
    /// has already been reset to `Closed` when this is raised.
    Cleanup(String),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "initialization: {msg}"),
            Self::Operation { operation, source } => {
                write!(f, "operation '{operation}' failed: {source}")
            }
            Self::MissingResource(msg) => write!(f, "missing resource: {msg}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Cleanup(msg) => write!(f, "cleanup: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Operation { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ServiceError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidInput(format!("invalid config: {err}"))
    }
}

/// Duplicate operation name detected while composing a service.
///
/// Deliberately not part of the runtime taxonomy: a collision is a
/// programming error in the service's capability list and is reported
/// when the service is assembled, never at call time.
#[derive(Debug)]
pub struct CompositionError {
    /// The colliding operation name.
    pub operation: String,
    /// Capability group that registered the name first.
    pub first: &'static str,
    /// Capability group that attempted to register it again.
    pub second: &'static str,
}

impl Display for CompositionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "operation '{}' defined by both '{}' and '{}'",
            self.operation, self.first, self.second
        )
    }
}

impl std::error::Error for CompositionError {}
