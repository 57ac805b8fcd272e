//! Document lifecycle operations shared by the document-bearing services.

use serde_json::json;

use crate::envelope::Envelope;
use crate::errors::Result;
use crate::ops::{guard, non_empty};
use crate::session::SessionContext;

/// Capability group name.
pub const NAME: &str = "document";

/// Operations this group contributes to a service catalog.
pub const OPERATIONS: &[&str] = &[
    "create_document",
    "open_document",
    "save_document",
    "close_document",
];

/// Create, open, save, and close the session's current document.
///
/// Only document-bearing services implement this group; the mail and
/// calendar target has no document concept and does not expose these
/// operations at all.
pub trait DocumentOps: SessionContext {
    /// Create a new empty document and make it current.
    ///
    /// Replaces (without closing) any previous current document.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Init`](crate::ServiceError::Init) if the
    /// session is not ready, or
    /// [`ServiceError::Operation`](crate::ServiceError::Operation) on a
    /// foreign fault.
    fn create_document(&mut self) -> Result<Envelope> {
        let document = guard("create_document", || {
            let application = self.application()?;
            Ok(application.create_document()?)
        })?;
        let name = document.name();
        self.set_current_document(document);
        Ok(Envelope::ok(format!("created '{name}'")).with("document", name))
    }

    /// Open an existing document from `path` and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidInput`](crate::ServiceError::InvalidInput)
    /// for an empty path, or the session/guard errors of
    /// [`DocumentOps::create_document`].
    fn open_document(&mut self, path: &str) -> Result<Envelope> {
        non_empty("path", path)?;
        let document = guard("open_document", || {
            let application = self.application()?;
            Ok(application.open_document(path)?)
        })?;
        let name = document.name();
        self.set_current_document(document);
        Ok(Envelope::ok(format!("opened '{name}'"))
            .with("document", name)
            .with("path", path))
    }

    /// Save the current document, in place or to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MissingResource`](crate::ServiceError::MissingResource)
    /// if no document is current, or guard/validation errors.
    fn save_document(&self, path: Option<&str>) -> Result<Envelope> {
        if let Some(path) = path {
            non_empty("path", path)?;
        }
        let name = guard("save_document", || {
            let document = self.current_document()?;
            match path {
                Some(path) => document.save_as(path)?,
                None => document.save()?,
            }
            Ok(document.name())
        })?;
        let mut envelope = Envelope::ok(format!("saved '{name}'")).with("document", name);
        if let Some(path) = path {
            envelope = envelope.with("path", json!(path));
        }
        Ok(envelope)
    }

    /// Close the current document and clear the current-document handle.
    ///
    /// The handle is cleared only after a successful foreign close; a
    /// faulted close leaves the document current so the caller can retry
    /// or save.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MissingResource`](crate::ServiceError::MissingResource)
    /// if no document is current, or
    /// [`ServiceError::Operation`](crate::ServiceError::Operation) on a
    /// foreign fault.
    fn close_document(&mut self, save: bool) -> Result<Envelope> {
        let name = guard("close_document", || {
            let document = self.current_document()?;
            document.close(save)?;
            Ok(document.name())
        })?;
        self.clear_current_document();
        Ok(Envelope::ok(format!("closed '{name}'"))
            .with("document", name)
            .with("saved", save))
    }
}
