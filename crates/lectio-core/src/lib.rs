//! # lectio-core
//!
//! Operations over the manual store: the date-driven recommendation engine,
//! month-filtered retrieval, the grouped all-manuals view, and the CRUD
//! surface the routing layer exposes.
//!
//! The crate is stateless per call: [`ManualService`] holds nothing but the
//! long-lived [`Database`](lectio_store::Database) handle injected at
//! construction, and every operation is a read-and-compute or a single
//! mutation against it.

pub mod models;
pub mod rotation;
pub mod service;

mod error;

pub use error::CoreError;
pub use models::{GroupedManuals, ManualDraft, ManualPatch, Recommendation};
pub use service::ManualService;
