//! # Polydoc - Document Database Communication Layer
//!
//! Polydoc is a vendor-neutral communication layer for document NoSQL
//! databases. It defines the data model, the query representation and the
//! bootstrap pipeline once, and leaves everything backend-specific to
//! adapter crates.
//!
//! ## Key Features
//!
//! - **Backend-neutral data model**: [`document::Value`],
//!   [`document::Document`] and [`document::DocumentEntity`] carry data
//!   without naming any backend
//! - **Fluent queries**: compose conditions with [`query::field`] and
//!   build immutable [`query::Query`]/[`query::DeleteQuery`] values
//! - **Pluggable backends**: adapters implement the provider traits in
//!   [`manager`] and nothing else
//! - **Lazy results**: [`stream::EntityStream`] produces entities on
//!   demand, forward-only
//! - **Clean API**: PIMPL pattern provides stable, encapsulated interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use polydoc::entity;
//! use polydoc::manager::Configuration;
//! use polydoc::query::{field, select, SortOrder};
//! use polydoc::settings::Settings;
//! use polydoc_memory_adapter::MemoryConfiguration;
//!
//! # fn main() -> polydoc::errors::PolydocResult<()> {
//! // Wire a backend: Settings -> Configuration -> ManagerFactory -> Manager
//! let settings = Settings::builder().build();
//! let factory = Configuration::new(MemoryConfiguration::new()).apply(&settings)?;
//! let manager = factory.apply("library")?;
//!
//! // Persist an entity
//! let poliana = entity!("people", {
//!     "name" => "Poliana",
//!     "city" => "Salvador"
//! })?;
//! manager.insert(poliana)?;
//!
//! // Query it back
//! let query = select("people")?
//!     .filter(field("city").eq("Salvador"))?
//!     .order_by("name", SortOrder::Ascending)?
//!     .build()?;
//! for entity in manager.select(query)? {
//!     println!("{:?}", entity?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`document`] - The value model and entity containers
//! - [`errors`] - Error types and result definitions
//! - [`manager`] - Bootstrap pipeline and the per-backend CRUD port
//! - [`query`] - Conditions, sorts and the fluent query builders
//! - [`settings`] - Opaque key/value configuration input
//! - [`stream`] - Lazy result streams

pub mod document;
pub mod errors;
pub mod manager;
pub mod query;
pub mod settings;
pub mod stream;
