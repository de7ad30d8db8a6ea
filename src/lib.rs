//! # AR-15 Catalog
//!
//! A catalog backend for AR-15 aftermarket parts: grips, handguards, and
//! trigger guards. Parts are organized as **groups** (a named product line
//! with a shared spec sheet) and **variants** (purchasable SKUs with a
//! unique UPC, vendor offers, and an embedded compatibility record).
//!
//! The data model, validation, and CRUD operations live in
//! [`ar15_catalog_core`]; this crate adds persistence, the HTTP API, and
//! the CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌────────────────┐
//! │   HTTP   │──▶│   Catalog    │──▶│ DocumentStore  │
//! │  (axum)  │   │ (validation) │   │ SQLite/memory  │
//! └──────────┘   └──────────────┘   └────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! catalog init                  # create database
//! catalog serve                 # start HTTP server
//! catalog enums grips           # print the grip registry
//! catalog schema                # print collections and indexes
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_store`] | SQLite document store |
//! | [`server`] | REST API |
//! | [`inspect`] | Registry and schema reports |

pub mod config;
pub mod db;
pub mod inspect;
pub mod migrate;
pub mod server;
pub mod sqlite_store;

pub use ar15_catalog_core as core;
