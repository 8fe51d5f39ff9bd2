//! # lectio-store
//!
//! Local storage for weekly lesson manuals, backed by SQLite.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection` and provides typed CRUD helpers for the
//! [`Manual`] document model.  Manuals are keyed internally by UUID and
//! grouped by calendar [`Month`]; within a month they are ordered by a
//! 1-based sequence number.

pub mod database;
pub mod manuals;
pub mod migrations;
pub mod models;
pub mod month;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::{MainPoint, Manual};
pub use month::Month;
