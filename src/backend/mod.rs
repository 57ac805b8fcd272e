//! Foreign automation backend abstraction.
//!
//! The [`Automation`] trait is the platform entry point (a COM binding in
//! production); [`Application`] and [`Document`] are the opaque foreign
//! handles a [`Session`](crate::session::Session) owns. All three speak
//! [`serde_json::Value`] for properties and method arguments because the
//! foreign object model is untyped.
//!
//! [`Application`] and [`Document`] are intentionally not `Send`: the
//! automated application processes one request at a time and must never be
//! driven from more than one thread.

pub mod scripted;

use std::fmt::{Display, Formatter};

use serde_json::Value;

/// Error raised by the automation binding for a single foreign call.
///
/// This is the only error type foreign calls may produce. It is translated
/// exactly once, at the operation guard boundary, into
/// [`ServiceError::Operation`](crate::ServiceError::Operation); nothing
/// else may catch it.
#[derive(Debug)]
pub struct Fault {
    method: String,
    detail: String,
}

impl Fault {
    /// Construct a fault for a named foreign method.
    #[must_use]
    pub fn new(method: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            detail: detail.into(),
        }
    }

    /// Foreign method that faulted.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Binding-supplied failure detail.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.method, self.detail)
    }
}

impl std::error::Error for Fault {}

/// Result type for raw foreign calls.
pub type FaultResult<T> = std::result::Result<T, Fault>;

/// Platform automation entry point.
///
/// Acquires application objects by programmatic identifier and releases
/// the underlying automation subsystem. The entry point itself may be
/// shared across sessions; the handles it produces may not.
pub trait Automation: Send + Sync {
    /// Acquire the application object registered under `prog_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the foreign process cannot be started or
    /// attached to.
    fn launch(&self, prog_id: &str) -> FaultResult<Box<dyn Application>>;

    /// Release the platform automation subsystem.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the subsystem refuses to release cleanly.
    fn release(&self) -> FaultResult<()>;
}

/// Opaque foreign application handle.
///
/// Valid only while the owning session is `Ready`. Not `Send` — the
/// foreign object is single-threaded.
pub trait Application {
    /// Suppress or restore the application's interactive alert prompts.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the property cannot be set.
    fn suppress_alerts(&self, suppress: bool) -> FaultResult<()>;

    /// Show or hide the application window.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the property cannot be set.
    fn set_visible(&self, visible: bool) -> FaultResult<()>;

    /// Create a new empty document in the application.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the application rejects the request.
    fn create_document(&self) -> FaultResult<Box<dyn Document>>;

    /// Open an existing document from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the file cannot be opened.
    fn open_document(&self, path: &str) -> FaultResult<Box<dyn Document>>;

    /// Read an application-level property.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the property read fails.
    fn get(&self, property: &str) -> FaultResult<Value>;

    /// Invoke a named method on the application object.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the foreign call fails.
    fn invoke(&self, method: &str, args: &[Value]) -> FaultResult<Value>;

    /// Ask the application to exit.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the application refuses to quit.
    fn quit(&self) -> FaultResult<()>;
}

/// Opaque foreign document handle (workbook, presentation, text document).
pub trait Document {
    /// Display name of the document.
    fn name(&self) -> String;

    /// Read a document property.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the property read fails.
    fn get(&self, property: &str) -> FaultResult<Value>;

    /// Write a document property.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the property write fails.
    fn set(&self, property: &str, value: Value) -> FaultResult<()>;

    /// Invoke a named method on the document object.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the foreign call fails.
    fn invoke(&self, method: &str, args: &[Value]) -> FaultResult<Value>;

    /// Save the document in place.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the save fails.
    fn save(&self) -> FaultResult<()>;

    /// Save the document to a new path.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the save fails.
    fn save_as(&self, path: &str) -> FaultResult<()>;

    /// Close the document, optionally saving pending changes.
    ///
    /// # Errors
    ///
    /// Returns [`Fault`] if the close fails.
    fn close(&self, save: bool) -> FaultResult<()>;
}
