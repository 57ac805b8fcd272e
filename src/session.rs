//! Automation session: foreign handle ownership and lifecycle.
//!
//! A [`Session`] owns exactly one foreign application handle and at most
//! one current document handle, and enforces the
//! `Uninitialized → Ready → Closed` state machine. Capability modules
//! reach both handles only through the [`SessionContext`] accessors.
//!
//! Sessions are deliberately not `Send`: the automated application is an
//! external single-threaded resource, and callers must serialize access
//! to a given session. Teardown is RAII — dropping a live session runs
//! the same best-effort cleanup as an explicit [`Session::cleanup`] call.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::{Application, Automation, Document};
use crate::config::AutomationConfig;
use crate::errors::{Result, ServiceError};

/// Lifecycle state of an automation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No foreign handle acquired yet.
    Uninitialized,
    /// Application handle acquired; operations are legal.
    Ready,
    /// Session torn down; both handles invalid.
    Closed,
}

/// Accessors every capability module builds on.
///
/// This is the whole contract between a capability group and the session:
/// the two handle accessors plus current-document replacement. Modules
/// never reach into session fields directly and never learn about each
/// other.
pub trait SessionContext {
    /// The foreign application handle.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Init`] unless the session is `Ready`.
    fn application(&self) -> Result<&dyn Application>;

    /// The current document handle.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MissingResource`] if no document is set.
    fn current_document(&self) -> Result<&dyn Document>;

    /// Replace the current document handle after a create or open.
    ///
    /// Does not close any prior handle; closing is the explicit close
    /// operation's responsibility.
    fn set_current_document(&mut self, document: Box<dyn Document>);

    /// Drop the current document handle after a close.
    fn clear_current_document(&mut self);

    /// Whether a current document is set.
    fn has_current_document(&self) -> bool;
}

/// Owner of one foreign application handle and its lifecycle.
pub struct Session {
    id: Uuid,
    prog_id: String,
    visible: bool,
    suppress_alerts: bool,
    automation: Arc<dyn Automation>,
    state: SessionState,
    application: Option<Box<dyn Application>>,
    document: Option<Box<dyn Document>>,
}

impl Session {
    /// Create an unopened session for the application registered under
    /// `prog_id`. No foreign interaction happens until
    /// [`Session::initialize`].
    #[must_use]
    pub fn new(
        automation: Arc<dyn Automation>,
        prog_id: impl Into<String>,
        config: &AutomationConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            prog_id: prog_id.into(),
            visible: config.visible,
            suppress_alerts: config.suppress_alerts,
            automation,
            state: SessionState::Uninitialized,
            application: None,
            document: None,
        }
    }

    /// Session identifier used for log correlation.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Acquire the foreign application handle and transition to `Ready`.
    ///
    /// Idempotent: calling on a `Ready` session is a no-op. Acquisition
    /// suppresses foreign alert prompts and applies the configured
    /// visibility before the session becomes `Ready`; any failure leaves
    /// the state `Uninitialized` with no handle retained.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Init`] if acquisition or handle setup
    /// fails, or if the session is already `Closed`.
    pub fn initialize(&mut self) -> Result<()> {
        match self.state {
            SessionState::Ready => {
                debug!(session_id = %self.id, "session already initialized");
                return Ok(());
            }
            SessionState::Closed => {
                return Err(ServiceError::Init("session is closed".into()));
            }
            SessionState::Uninitialized => {}
        }

        let application = self.automation.launch(&self.prog_id).map_err(|fault| {
            ServiceError::Init(format!("failed to acquire '{}': {fault}", self.prog_id))
        })?;

        // Handle setup must complete before the session becomes Ready;
        // a half-configured application is quit and discarded.
        let setup = application
            .suppress_alerts(self.suppress_alerts)
            .and_then(|()| application.set_visible(self.visible));
        if let Err(fault) = setup {
            if let Err(quit_fault) = application.quit() {
                warn!(session_id = %self.id, %quit_fault, "quit after failed setup");
            }
            return Err(ServiceError::Init(format!(
                "failed to configure '{}': {fault}",
                self.prog_id
            )));
        }

        self.application = Some(application);
        self.state = SessionState::Ready;
        info!(session_id = %self.id, prog_id = %self.prog_id, "session ready");
        Ok(())
    }

    /// Best-effort multi-step teardown.
    ///
    /// Steps run independently: close the current document if any, quit
    /// the application, release the automation subsystem. Failures are
    /// collected rather than aborting, the state always ends `Closed`,
    /// and both handles are always cleared.
    ///
    /// Idempotent: calling on a `Closed` session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Cleanup`] aggregating every failed step.
    /// State has already been reset when the error is raised.
    pub fn cleanup(&mut self) -> Result<()> {
        if self.state == SessionState::Closed {
            debug!(session_id = %self.id, "session already closed");
            return Ok(());
        }

        let mut failures: Vec<String> = Vec::new();
        let had_application = self.application.is_some();

        if let Some(document) = self.document.take() {
            if let Err(fault) = document.close(false) {
                failures.push(format!("close document: {fault}"));
            }
        }

        if let Some(application) = self.application.take() {
            if let Err(fault) = application.quit() {
                failures.push(format!("quit application: {fault}"));
            }
        }

        if had_application {
            if let Err(fault) = self.automation.release() {
                failures.push(format!("release automation: {fault}"));
            }
        }

        self.state = SessionState::Closed;
        info!(session_id = %self.id, failed_steps = failures.len(), "session closed");

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Cleanup(failures.join("; ")))
        }
    }
}

impl SessionContext for Session {
    fn application(&self) -> Result<&dyn Application> {
        match (&self.state, &self.application) {
            (SessionState::Ready, Some(application)) => Ok(application.as_ref()),
            _ => Err(ServiceError::Init(
                "session is not initialized; call initialize() first".into(),
            )),
        }
    }

    fn current_document(&self) -> Result<&dyn Document> {
        self.document.as_deref().ok_or_else(|| {
            ServiceError::MissingResource(
                "no current document; create or open one first".into(),
            )
        })
    }

    fn set_current_document(&mut self, document: Box<dyn Document>) {
        debug!(session_id = %self.id, name = %document.name(), "current document replaced");
        self.document = Some(document);
    }

    fn clear_current_document(&mut self) {
        self.document = None;
    }

    fn has_current_document(&self) -> bool {
        self.document.is_some()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            if let Err(err) = self.cleanup() {
                warn!(session_id = %self.id, %err, "session teardown failed during drop");
            }
        }
    }
}
