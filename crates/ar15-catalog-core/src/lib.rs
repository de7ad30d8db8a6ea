//! # AR-15 Catalog Core
//!
//! Runtime-agnostic logic for the AR-15 parts catalog: the enumeration
//! registry, part kinds with their attribute and compatibility records,
//! group/variant models, validation, the document store abstraction, and
//! the [`catalog::Catalog`] service that implements every CRUD operation.
//!
//! This crate contains no tokio, sqlx, HTTP, or filesystem dependencies.
//! The application crate supplies a concrete [`store::DocumentStore`] and
//! the transport.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`enums`] | Closed sets of legal attribute values per category |
//! | [`parts`] | Part kinds, attributes, compatibility records |
//! | [`vendor`] | Vendor offers embedded in variants |
//! | [`models`] | Groups, variants, request inputs, response views |
//! | [`validate`] | Field-level validation against the registry |
//! | [`error`] | Error taxonomy surfaced to callers |
//! | [`schema`] | Collection declarations (uniqueness, indexes) |
//! | [`store`] | Document store trait + in-memory implementation |
//! | [`catalog`] | Group and variant management operations |

pub mod catalog;
pub mod enums;
pub mod error;
pub mod models;
pub mod parts;
pub mod schema;
pub mod store;
pub mod validate;
pub mod vendor;

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult, FieldViolation};
pub use parts::{Category, Grip, Handguard, PartKind, TriggerGuard};
