//! Mail/calendar service: mail, folder, and calendar operations.
//!
//! This target has no document concept, so the service composes a
//! distinct capability set without the document group: there are no
//! create/open/save/close operations to report "not applicable" on.
//! The session's current-document handle simply stays absent for the
//! session's whole lifetime.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::backend::{Application, Automation, Document};
use crate::capability::calendar::{self, CalendarOps};
use crate::capability::folder::{self, FolderOps};
use crate::capability::mail::{self, MailOps};
use crate::config::AutomationConfig;
use crate::envelope::Envelope;
use crate::errors::{CompositionError, Result, ServiceError};
use crate::ops::{self, Catalog};
use crate::session::{Session, SessionContext, SessionState};

/// Default programmatic identifier for the mail/calendar application.
pub const DEFAULT_PROG_ID: &str = "Outlook.Application";

/// Composed automation service for the mail/calendar client.
pub struct MailService {
    session: Session,
    catalog: Catalog,
}

impl MailService {
    /// Compose the service. No foreign interaction happens until
    /// [`MailService::initialize`].
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
        let prog_id = config.prog_id_for("mail", DEFAULT_PROG_ID);
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
            (mail::NAME, mail::OPERATIONS),
            (folder::NAME, folder::OPERATIONS),
            (calendar::NAME, calendar::OPERATIONS),
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
            "send_mail" => {
                let to = ops::required_str(args, "to")?;
                let subject = ops::required_str(args, "subject")?;
                let body = ops::optional_str(args, "body")?.unwrap_or("");
                self.send_mail(to, subject, body)
            }
            "get_mail" => {
                let id = ops::required_str(args, "id")?;
                self.get_mail(id)
            }
            "flag_mail" => {
                let id = ops::required_str(args, "id")?;
                self.flag_mail(id)
            }
            "search_mail" => {
                let query = ops::required_str(args, "query")?;
                self.search_mail(query)
            }
            "list_folders" => self.list_folders(),
            "create_folder" => {
                let name = ops::required_str(args, "name")?;
                self.create_folder(name)
            }
            "create_event" => {
                let subject = ops::required_str(args, "subject")?;
                let start = ops::required_str(args, "start")?;
                let end = ops::required_str(args, "end")?;
                self.create_event(subject, start, end)
            }
            "list_events" => {
                let date = ops::required_str(args, "date")?;
                self.list_events(date)
            }
            other => Err(ServiceError::MissingResource(format!(
                "unknown operation '{other}'"
            ))),
        }
    }
}

impl SessionContext for MailService {
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

impl MailOps for MailService {}
impl FolderOps for MailService {}
impl CalendarOps for MailService {}
