//! Capability groups: narrow, independent operation modules.
//!
//! Each module defines one trait with default method bodies written
//! against [`SessionContext`](crate::session::SessionContext) and nothing
//! else — groups never depend on each other's state; cross-cutting needs
//! go through the foreign object itself. A composed service opts into a
//! group by implementing its trait, and contributes the group's `NAME`
//! and `OPERATIONS` to its catalog.
//!
//! Every operation follows the same shape: local input validation first
//! (raising `InvalidInput` before any foreign call), then one coherent
//! unit of foreign interaction inside [`guard`](crate::ops::guard), then
//! an [`Envelope`](crate::Envelope).

pub mod calendar;
pub mod document;
pub mod folder;
pub mod mail;
pub mod sheet;
pub mod slide;
pub mod text;
