//! Composed services: one per target application.
//!
//! Each service binds one [`Session`](crate::session::Session) to a fixed
//! set of capability groups, decided when the service is built. The
//! service delegates [`SessionContext`](crate::session::SessionContext)
//! to its session, implements the capability traits it opted into, and
//! exposes the aggregated surface two ways: typed trait methods for
//! direct callers, and [`call`](word::WordService::call) dispatch over a
//! flat argument map for the outer request layer.
//!
//! Composition is checked when a service is constructed: two groups
//! defining the same operation name fail with
//! [`CompositionError`](crate::errors::CompositionError) before any
//! foreign interaction is possible.
//!
//! Callers must serialize access to a service instance — the automated
//! application is single-threaded, and services are `!Send` for exactly
//! that reason.

pub mod excel;
pub mod mail;
pub mod slides;
pub mod word;

pub use excel::ExcelService;
pub use mail::MailService;
pub use slides::SlidesService;
pub use word::WordService;
