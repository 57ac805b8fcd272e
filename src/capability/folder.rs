//! Folder operations for the mail/calendar service.

use serde_json::json;

use crate::envelope::Envelope;
use crate::errors::Result;
use crate::ops::{guard, non_empty};
use crate::session::SessionContext;

/// Capability group name.
pub const NAME: &str = "folder";

/// Operations this group contributes to a service catalog.
pub const OPERATIONS: &[&str] = &["list_folders", "create_folder"];

/// Folder hierarchy operations against the foreign mail application.
pub trait FolderOps: SessionContext {
    /// List the top-level folders.
    ///
    /// # Errors
    ///
    /// Returns `Init` if the session is not ready, or `Operation` on a
    /// foreign fault.
    fn list_folders(&self) -> Result<Envelope> {
        let folders = guard("list_folders", || {
            let application = self.application()?;
            Ok(application.invoke("ListFolders", &[])?)
        })?;
        let count = folders.as_array().map_or(0, Vec::len);
        Ok(Envelope::ok(format!("{count} folder(s)")).with("folders", folders))
    }

    /// Create a folder named `name` under the default store.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name, plus the usual
    /// session/guard failures.
    fn create_folder(&self, name: &str) -> Result<Envelope> {
        non_empty("name", name)?;
        guard("create_folder", || {
            let application = self.application()?;
            application.invoke("AddFolder", &[json!(name)])?;
            Ok(())
        })?;
        Ok(Envelope::ok(format!("created folder '{name}'")).with("folder", name))
    }
}
