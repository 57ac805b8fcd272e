//! Worksheet operations for the spreadsheet service.

use serde_json::{json, Value};

use crate::envelope::Envelope;
use crate::errors::{Result, ServiceError};
use crate::ops::{guard, non_empty};
use crate::session::SessionContext;

/// Capability group name.
pub const NAME: &str = "sheet";

/// Operations this group contributes to a service catalog.
pub const OPERATIONS: &[&str] = &["set_cell", "get_cell", "add_sheet"];

/// Require an A1-style cell reference (letters then digits).
fn valid_cell_ref(field: &str, cell: &str) -> Result<()> {
    non_empty(field, cell)?;
    let letters = cell.chars().take_while(char::is_ascii_alphabetic).count();
    let digits = cell.chars().skip(letters).take_while(char::is_ascii_digit).count();
    if letters == 0 || digits == 0 || letters + digits != cell.chars().count() {
        return Err(ServiceError::InvalidInput(format!(
            "'{field}' must be an A1-style cell reference, got '{cell}'"
        )));
    }
    Ok(())
}

/// Cell and worksheet manipulation against the current workbook.
pub trait SheetOps: SessionContext {
    /// Write `value` into `cell` on `sheet`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty sheet name or malformed cell
    /// reference, `MissingResource` without a current workbook, or
    /// `Operation` on a foreign fault.
    fn set_cell(&self, sheet: &str, cell: &str, value: &Value) -> Result<Envelope> {
        non_empty("sheet", sheet)?;
        valid_cell_ref("cell", cell)?;
        guard("set_cell", || {
            let document = self.current_document()?;
            document.invoke("SetCell", &[json!(sheet), json!(cell), value.clone()])?;
            Ok(())
        })?;
        Ok(Envelope::ok(format!("set {sheet}!{cell}"))
            .with("sheet", sheet)
            .with("cell", cell))
    }

    /// Read the value of `cell` on `sheet`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SheetOps::set_cell`].
    fn get_cell(&self, sheet: &str, cell: &str) -> Result<Envelope> {
        non_empty("sheet", sheet)?;
        valid_cell_ref("cell", cell)?;
        let value = guard("get_cell", || {
            let document = self.current_document()?;
            Ok(document.invoke("GetCell", &[json!(sheet), json!(cell)])?)
        })?;
        Ok(Envelope::ok(format!("read {sheet}!{cell}"))
            .with("sheet", sheet)
            .with("cell", cell)
            .with("value", value))
    }

    /// Append a new worksheet named `name`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty name, plus the usual
    /// workbook/guard failures.
    fn add_sheet(&self, name: &str) -> Result<Envelope> {
        non_empty("name", name)?;
        guard("add_sheet", || {
            let document = self.current_document()?;
            document.invoke("AddSheet", &[json!(name)])?;
            Ok(())
        })?;
        Ok(Envelope::ok(format!("added sheet '{name}'")).with("sheet", name))
    }
}
