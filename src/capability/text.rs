//! Text operations for the word-processor service.

use serde_json::json;

use crate::envelope::Envelope;
use crate::errors::{Result, ServiceError};
use crate::ops::{guard, non_empty};
use crate::session::SessionContext;

/// Capability group name.
pub const NAME: &str = "text";

/// Operations this group contributes to a service catalog.
pub const OPERATIONS: &[&str] = &["insert_text", "replace_text", "word_count", "set_font"];

/// Text manipulation against the current document.
pub trait TextOps: SessionContext {
    /// Insert `text` at the current position.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty text, `MissingResource` without a
    /// current document, or `Operation` on a foreign fault.
    fn insert_text(&self, text: &str) -> Result<Envelope> {
        non_empty("text", text)?;
        guard("insert_text", || {
            let document = self.current_document()?;
            document.invoke("InsertText", &[json!(text)])?;
            Ok(())
        })?;
        Ok(Envelope::ok("text inserted").with("characters", text.chars().count()))
    }

    /// Replace every occurrence of `find` with `replace`.
    ///
    /// `replace` may be empty (deletion); `find` may not.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TextOps::insert_text`].
    fn replace_text(&self, find: &str, replace: &str) -> Result<Envelope> {
        non_empty("find", find)?;
        let replacements = guard("replace_text", || {
            let document = self.current_document()?;
            let count = document.invoke("ReplaceText", &[json!(find), json!(replace)])?;
            Ok(count.as_u64().unwrap_or(0))
        })?;
        Ok(Envelope::ok(format!("replaced {replacements} occurrence(s)"))
            .with("replacements", replacements))
    }

    /// Word count of the current document.
    ///
    /// # Errors
    ///
    /// Returns `MissingResource` without a current document, or
    /// `Operation` on a foreign fault.
    fn word_count(&self) -> Result<Envelope> {
        let words = guard("word_count", || {
            let document = self.current_document()?;
            let count = document.get("WordCount")?;
            Ok(count.as_u64().unwrap_or(0))
        })?;
        Ok(Envelope::ok(format!("{words} word(s)")).with("words", words))
    }

    /// Set the font for subsequent text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name or non-positive size,
    /// plus the usual document/guard failures.
    fn set_font(&self, name: &str, size: f64) -> Result<Envelope> {
        non_empty("name", name)?;
        if size <= 0.0 || !size.is_finite() {
            return Err(ServiceError::InvalidInput(
                "'size' must be a positive number".into(),
            ));
        }
        guard("set_font", || {
            let document = self.current_document()?;
            document.invoke("SetFont", &[json!(name), json!(size)])?;
            Ok(())
        })?;
        Ok(Envelope::ok(format!("font set to '{name}' {size}pt"))
            .with("font", name)
            .with("size", size))
    }
}
