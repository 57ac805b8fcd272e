//! Spreadsheet service: workbook lifecycle plus worksheet operations.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::backend::{Application, Automation, Document};
use crate::capability::document::{self, DocumentOps};
use crate::capability::sheet::{self, SheetOps};
use crate::config::AutomationConfig;
use crate::envelope::Envelope;
use crate::errors::{CompositionError, Result, ServiceError};
use crate::ops::{self, Catalog};
use crate::session::{Session, SessionContext, SessionState};

/// Default programmatic identifier for the spreadsheet application.
pub const DEFAULT_PROG_ID: &str = "Excel.Application";

/// Composed automation service for the spreadsheet application. The
/// "current document" here is the current workbook.
pub struct ExcelService {
    session: Session,
    catalog: Catalog,
}

impl ExcelService {
    /// Compose the service. No foreign interaction happens until
    /// [`ExcelService::initialize`].
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
        let prog_id = config.prog_id_for("excel", DEFAULT_PROG_ID);
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
            (sheet::NAME, sheet::OPERATIONS),
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
            "set_cell" => {
                let sheet = ops::required_str(args, "sheet")?;
                let cell = ops::required_str(args, "cell")?;
                let value = ops::required_value(args, "value")?.clone();
                self.set_cell(sheet, cell, &value)
            }
            "get_cell" => {
                let sheet = ops::required_str(args, "sheet")?;
                let cell = ops::required_str(args, "cell")?;
                self.get_cell(sheet, cell)
            }
            "add_sheet" => {
                let name = ops::required_str(args, "name")?;
                self.add_sheet(name)
            }
            other => Err(ServiceError::MissingResource(format!(
                "unknown operation '{other}'"
            ))),
        }
    }
}

impl SessionContext for ExcelService {
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

impl DocumentOps for ExcelService {}
impl SheetOps for ExcelService {}
