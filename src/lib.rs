#![forbid(unsafe_code)]

//! Automation service framework for desktop office applications.
//!
//! Exposes word-processor, spreadsheet, slide-deck, and mail/calendar
//! applications as uniform, remotely invocable operations by driving
//! each application's native automation object model through a shared
//! session lifecycle, a single error-translation boundary, and
//! capability-group composition.

pub mod backend;
pub mod capability;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod ops;
pub mod service;
pub mod session;

pub use config::AutomationConfig;
pub use envelope::Envelope;
pub use errors::{CompositionError, Result, ServiceError};
pub use session::{Session, SessionContext, SessionState};
