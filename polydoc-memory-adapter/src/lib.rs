//! # Polydoc Memory Adapter
//!
//! The reference backend for polydoc: collections held in process memory,
//! no I/O, no external services. It exists to exercise the full
//! communication-layer contract and to serve as the template for real
//! backend adapters.
//!
//! ```rust,ignore
//! use polydoc::manager::Configuration;
//! use polydoc::settings::Settings;
//! use polydoc_memory_adapter::MemoryConfiguration;
//!
//! let settings = Settings::builder().build();
//! let factory = Configuration::new(MemoryConfiguration::new()).apply(&settings)?;
//! let manager = factory.apply("library")?;
//! ```

mod config;
mod factory;
mod manager;
mod matcher;

pub use config::{MemoryConfiguration, DEFAULT_ID_FIELD, ID_FIELD_KEY};
pub use factory::MemoryManagerFactory;
pub use manager::MemoryManager;
