//! Calendar operations for the mail/calendar service.

use serde_json::json;

use crate::envelope::Envelope;
use crate::errors::{Result, ServiceError};
use crate::ops::{guard, non_empty, parse_timestamp};
use crate::session::SessionContext;

/// Capability group name.
pub const NAME: &str = "calendar";

/// Operations this group contributes to a service catalog.
pub const OPERATIONS: &[&str] = &["create_event", "list_events"];

/// Appointment operations against the foreign calendar store.
pub trait CalendarOps: SessionContext {
    /// Create an appointment spanning `start`..`end` (RFC 3339).
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty subject, unparseable
    /// timestamps, or an end not after the start; `Init` if the session
    /// is not ready; `Operation` on a foreign fault.
    fn create_event(&self, subject: &str, start: &str, end: &str) -> Result<Envelope> {
        non_empty("subject", subject)?;
        let start_at = parse_timestamp("start", start)?;
        let end_at = parse_timestamp("end", end)?;
        if end_at <= start_at {
            return Err(ServiceError::InvalidInput(
                "'end' must be after 'start'".into(),
            ));
        }
        let event_id = guard("create_event", || {
            let application = self.application()?;
            Ok(application.invoke(
                "CreateAppointment",
                &[
                    json!(subject),
                    json!(start_at.to_rfc3339()),
                    json!(end_at.to_rfc3339()),
                ],
            )?)
        })?;
        Ok(Envelope::ok(format!("created event '{subject}'"))
            .with("subject", subject)
            .with("event_id", event_id))
    }

    /// List appointments on the day containing `date` (RFC 3339).
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unparseable date, plus the usual
    /// session/guard failures.
    fn list_events(&self, date: &str) -> Result<Envelope> {
        let day = parse_timestamp("date", date)?;
        let events = guard("list_events", || {
            let application = self.application()?;
            Ok(application.invoke("ListEvents", &[json!(day.to_rfc3339())])?)
        })?;
        let count = events.as_array().map_or(0, Vec::len);
        Ok(Envelope::ok(format!("{count} event(s)")).with("events", events))
    }
}
