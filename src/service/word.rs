//! Word-processor service: document lifecycle plus text operations.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::backend::{Application, Automation, Document};
use crate::capability::document::{self, DocumentOps};
use crate::capability::text::{self, TextOps};
use crate::config::AutomationConfig;
use crate::envelope::Envelope;
use crate::errors::{CompositionError, Result, ServiceError};
use crate::ops::{self, Catalog};
use crate::session::{Session, SessionContext, SessionState};

/// Default programmatic identifier for the word processor.
pub const DEFAULT_PROG_ID: &str = "Word.Application";

/// Composed automation service for the word processor.
pub struct WordService {
    session: Session,
    catalog: Catalog,
}

impl WordService {
    /// Compose the service. No foreign interaction happens until
    /// [`WordService::initialize`].
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] if the capability groups define a
    /// duplicate operation name.
    pub fn new(
        automation: Arc<dyn Automation>,
        config: &AutomationConfig,
    ) -> std::result::Result<Self, CompositionError> {
        let catalog = Self::compose_catalog()?;
        let prog_id = config.prog_id_for("word", DEFAULT_PROG_ID);
        Ok(Self {
            session: Session::new(automation, prog_id, config),
            catalog,
        })
    }

    /// The composed operation namespace, independent of any session.
    ///
    /// # Errors
    ///
    /// Returns [`CompositionError`] on a duplicate operation name.
    pub fn compose_catalog() -> std::result::Result<Catalog, CompositionError> {
        Catalog::compose(&[
            (document::NAME, document::OPERATIONS),
            (text::NAME, text::OPERATIONS),
        ])
    }

    /// Acquire the foreign application handle. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Init`] on acquisition failure.
    pub fn initialize(&mut self) -> Result<()> {
        self.session.initialize()
    }

    /// Tear the session down. Idempotent, best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Cleanup`] aggregating failed steps; state
    /// is `Closed` regardless.
    pub fn cleanup(&mut self) -> Result<()> {
        self.session.cleanup()
    }

    /// Session lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// The flat operation namespace.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Dispatch `operation` with a flat argument map.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MissingResource`] for an unknown
    /// operation, or whatever the operation itself raises.
    pub fn call(&mut self, operation: &str, args: &Map<String, Value>) -> Result<Envelope> {
        match operation {
            "create_document" => self.create_document(),
            "open_document" => {
                let path = ops::required_str(args, "path")?;
                self.open_document(path)
            }
            "save_document" => {
                let path = ops::optional_str(args, "path")?;
                self.save_document(path)
            }
            "close_document" => {
                let save = ops::optional_bool(args, "save", false)?;
                self.close_document(save)
            }
            "insert_text" => {
                let text = ops::required_str(args, "text")?;
                self.insert_text(text)
            }
            "replace_text" => {
                let find = ops::required_str(args, "find")?;
                let replace = ops::optional_str(args, "replace")?.unwrap_or("");
                self.replace_text(find, replace)
            }
            "word_count" => self.word_count(),
            "set_font" => {
                let name = ops::required_str(args, "name")?;
                let size = ops::required_f64(args, "size")?;
                self.set_font(name, size)
            }
            other => Err(ServiceError::MissingResource(format!(
                "unknown operation '{other}'"
            ))),
        }
    }
}

impl SessionContext for WordService {
    fn application(&self) -> Result<&dyn Application> {
        self.session.application()
    }

    fn current_document(&self) -> Result<&dyn Document> {
        self.session.current_document()
    }

    fn set_current_document(&mut self, document: Box<dyn Document>) {
        self.session.set_current_document(document);
    }

    fn clear_current_document(&mut self) {
        self.session.clear_current_document();
    }

    fn has_current_document(&self) -> bool {
        self.session.has_current_document()
    }
}

impl DocumentOps for WordService {}
impl TextOps for WordService {}
