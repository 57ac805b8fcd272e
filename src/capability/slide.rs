//! Slide operations for the slide-deck service.

use serde_json::json;

use crate::envelope::Envelope;
use crate::errors::{Result, ServiceError};
use crate::ops::{guard, non_empty};
use crate::session::SessionContext;

/// Capability group name.
pub const NAME: &str = "slide";

/// Operations this group contributes to a service catalog.
pub const OPERATIONS: &[&str] = &["add_slide", "set_slide_title", "slide_count"];

/// Slide manipulation against the current presentation.
pub trait SlideOps: SessionContext {
    /// Append a slide, optionally with a title.
    ///
    /// # Errors
    ///
    /// Returns `MissingResource` without a current presentation, or
    /// `Operation` on a foreign fault.
    fn add_slide(&self, title: Option<&str>) -> Result<Envelope> {
        if let Some(title) = title {
            non_empty("title", title)?;
        }
        let index = guard("add_slide", || {
            let document = self.current_document()?;
            let index = document.invoke("AddSlide", &[json!(title.unwrap_or(""))])?;
            Ok(index.as_u64().unwrap_or(0))
        })?;
        Ok(Envelope::ok(format!("added slide {index}")).with("index", index))
    }

    /// Set the title of the 1-based slide `index`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for index zero or an empty title, plus the
    /// usual presentation/guard failures.
    fn set_slide_title(&self, index: u64, title: &str) -> Result<Envelope> {
        if index == 0 {
            return Err(ServiceError::InvalidInput(
                "'index' is 1-based and must be positive".into(),
            ));
        }
        non_empty("title", title)?;
        guard("set_slide_title", || {
            let document = self.current_document()?;
            document.invoke("SetSlideTitle", &[json!(index), json!(title)])?;
            Ok(())
        })?;
        Ok(Envelope::ok(format!("slide {index} titled '{title}'"))
            .with("index", index)
            .with("title", title))
    }

    /// Number of slides in the current presentation.
    ///
    /// # Errors
    ///
    /// Returns `MissingResource` without a current presentation, or
    /// `Operation` on a foreign fault.
    fn slide_count(&self) -> Result<Envelope> {
        let slides = guard("slide_count", || {
            let document = self.current_document()?;
            let count = document.invoke("GetSlideCount", &[])?;
            Ok(count.as_u64().unwrap_or(0))
        })?;
        Ok(Envelope::ok(format!("{slides} slide(s)")).with("slides", slides))
    }
}
