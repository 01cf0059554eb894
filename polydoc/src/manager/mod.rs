//! The bootstrap pipeline and the per-backend CRUD port.
//!
//! A backend is wired in three steps: a [Configuration] validates
//! [Settings] and yields a [ManagerFactory], the factory binds a database
//! name and yields a [Manager], and the manager executes queries. Each
//! step is a capability trait behind a cloneable `Arc<dyn Provider>`
//! handle, so adapters plug in without the core naming any backend.
//!
//! [Settings]: crate::settings::Settings

mod configuration;
mod manager;

pub use configuration::{
    Configuration, ConfigurationProvider, ManagerFactory, ManagerFactoryProvider,
};
pub use manager::{Manager, ManagerProvider};
