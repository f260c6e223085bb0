//! Folio Core - project catalog for a single-page portfolio site
//!
//! Turns the site's static, loosely shaped project data into the canonical
//! shape its listing and detail views render, and answers detail-page
//! lookups by id.
//!
//! # Architecture
//!
//! ```text
//! projects.json → Catalog → store::unwrap_store → RawProjectRecord → normalizer → DisplayProject
//!                    │                                                  (listing view)
//!                    └─ find / detail (id) → DisplayProject / ProjectDetail
//!                                                                       (detail view)
//!                    verifier → diagnostics about the data file
//!
//! ScrollController — explicit smooth-scroll state, owned by the root layout
//! ```
//!
//! # Guarantees
//!
//! - **Total**: normalization never fails, whatever the data file holds
//! - **Order preserving**: the listing keeps the data file's order
//! - **Deterministic**: same input always produces identical output
//! - **Read-only**: the loaded store is never mutated

pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod normalizer;
pub mod record;
pub mod scroll;
pub mod store;
pub mod verifier;

pub use catalog::Catalog;
pub use config::{CatalogConfig, Labels, LookupMode};
pub use detail::ProjectDetail;
pub use error::{Error, Result};
pub use normalizer::{map_record, normalize, DisplayProject};
pub use record::RawProjectRecord;
pub use scroll::{ScrollConfig, ScrollController};
pub use store::{unwrap_store, StoreShape};
