//! Mail operations for the mail/calendar service.
//!
//! These operate on the application handle alone — the mail target has
//! no document concept, so nothing here touches the current-document
//! accessor.

use serde_json::json;

use crate::envelope::Envelope;
use crate::errors::{Result, ServiceError};
use crate::ops::{guard, non_empty};
use crate::session::SessionContext;

/// Capability group name.
pub const NAME: &str = "mail";

/// Operations this group contributes to a service catalog.
pub const OPERATIONS: &[&str] = &["send_mail", "get_mail", "flag_mail", "search_mail"];

/// Require a plausible mail address.
fn valid_address(field: &str, value: &str) -> Result<()> {
    non_empty(field, value)?;
    if !value.contains('@') {
        return Err(ServiceError::InvalidInput(format!(
            "'{field}' must be a mail address, got '{value}'"
        )));
    }
    Ok(())
}

/// Message operations against the foreign mail application.
pub trait MailOps: SessionContext {
    /// Compose and send a message.
    ///
    /// The message is fully assembled locally before the single foreign
    /// send call, so a failure never leaves a half-built draft behind.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed recipient or empty
    /// subject, `Init` if the session is not ready, or `Operation` on a
    /// foreign fault.
    fn send_mail(&self, to: &str, subject: &str, body: &str) -> Result<Envelope> {
        valid_address("to", to)?;
        non_empty("subject", subject)?;
        let message = json!({ "to": to, "subject": subject, "body": body });
        guard("send_mail", || {
            let application = self.application()?;
            application.invoke("SendMail", &[message])?;
            Ok(())
        })?;
        Ok(Envelope::ok(format!("sent '{subject}' to {to}"))
            .with("to", to)
            .with("subject", subject))
    }

    /// Look up a message by identifier.
    ///
    /// # Errors
    ///
    /// Returns `MissingResource` when the identifier matches nothing —
    /// never a null payload — plus the usual session/guard failures.
    fn get_mail(&self, id: &str) -> Result<Envelope> {
        non_empty("id", id)?;
        let item = guard("get_mail", || {
            let application = self.application()?;
            let item = application.invoke("GetItemById", &[json!(id)])?;
            if item.is_null() {
                return Err(ServiceError::MissingResource(format!(
                    "no mail item with id '{id}'"
                ))
                .into());
            }
            Ok(item)
        })?;
        Ok(Envelope::ok(format!("found mail '{id}'"))
            .with("id", id)
            .with("item", item))
    }

    /// Flag a message for follow-up.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`MailOps::get_mail`].
    fn flag_mail(&self, id: &str) -> Result<Envelope> {
        non_empty("id", id)?;
        guard("flag_mail", || {
            let application = self.application()?;
            let item = application.invoke("GetItemById", &[json!(id)])?;
            if item.is_null() {
                return Err(ServiceError::MissingResource(format!(
                    "no mail item with id '{id}'"
                ))
                .into());
            }
            application.invoke("FlagItem", &[json!(id)])?;
            Ok(())
        })?;
        Ok(Envelope::ok(format!("flagged mail '{id}'")).with("id", id))
    }

    /// Search messages by free-text query.
    ///
    /// An empty result set is a successful envelope with zero matches,
    /// not an error — only lookups by identifier fail on absence.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty query, plus the usual
    /// session/guard failures.
    fn search_mail(&self, query: &str) -> Result<Envelope> {
        non_empty("query", query)?;
        let matches = guard("search_mail", || {
            let application = self.application()?;
            Ok(application.invoke("FindItems", &[json!(query)])?)
        })?;
        let count = matches.as_array().map_or(0, Vec::len);
        Ok(Envelope::ok(format!("{count} match(es) for '{query}'"))
            .with("count", count)
            .with("matches", matches))
    }
}
