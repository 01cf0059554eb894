use crate::errors::PolydocResult;
use crate::settings::Settings;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::sync::Arc;

/// The per-backend entry point of the bootstrap pipeline: it reads the
/// [Settings] keys it recognizes and produces a [ManagerFactory].
///
/// Implementations validate their required keys eagerly, so a
/// misconfiguration surfaces at [apply] rather than at the first
/// operation. Keys the implementation does not recognize are ignored; a
/// shared settings mapping may carry keys for several backends at once.
///
/// [apply]: ConfigurationProvider::apply
pub trait ConfigurationProvider {
    /// Validates the settings and produces a factory bound to them.
    fn apply(&self, settings: &Settings) -> PolydocResult<ManagerFactory>;
}

/// A cloneable handle over a [ConfigurationProvider] implementation.
#[derive(Clone)]
pub struct Configuration {
    inner: Arc<dyn ConfigurationProvider>,
}

impl Configuration {
    /// Creates a new `Configuration` from a provider implementation.
    pub fn new<T: ConfigurationProvider + 'static>(inner: T) -> Self {
        Configuration {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for Configuration {
    type Target = Arc<dyn ConfigurationProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for Configuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration").finish_non_exhaustive()
    }
}

/// Produces [Manager]s bound to a named database.
///
/// `apply` is idempotent with respect to the name, but each call may
/// construct a fresh native client; callers must not assume managers are
/// singletons per name.
///
/// [Manager]: crate::manager::Manager
pub trait ManagerFactoryProvider {
    /// Produces a manager for the named database.
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::Validation] if the name is empty.
    ///
    /// [ErrorKind::Validation]: crate::errors::ErrorKind::Validation
    fn apply(&self, database_name: &str) -> PolydocResult<crate::manager::Manager>;
}

/// A cloneable handle over a [ManagerFactoryProvider] implementation.
#[derive(Clone)]
pub struct ManagerFactory {
    inner: Arc<dyn ManagerFactoryProvider>,
}

impl ManagerFactory {
    /// Creates a new `ManagerFactory` from a provider implementation.
    pub fn new<T: ManagerFactoryProvider + 'static>(inner: T) -> Self {
        ManagerFactory {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for ManagerFactory {
    type Target = Arc<dyn ManagerFactoryProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for ManagerFactory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerFactory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, PolydocError};
    use crate::manager::Manager;

    struct RefusingConfiguration;

    impl ConfigurationProvider for RefusingConfiguration {
        fn apply(&self, _settings: &Settings) -> PolydocResult<ManagerFactory> {
            Err(PolydocError::new(
                "backend unavailable",
                ErrorKind::Communication,
            ))
        }
    }

    struct RefusingFactory;

    impl ManagerFactoryProvider for RefusingFactory {
        fn apply(&self, _database_name: &str) -> PolydocResult<Manager> {
            Err(PolydocError::new(
                "backend unavailable",
                ErrorKind::Communication,
            ))
        }
    }

    #[test]
    fn test_configuration_propagates_provider_error() {
        let configuration = Configuration::new(RefusingConfiguration);
        let result = configuration.apply(&Settings::builder().build());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::Communication);
    }

    #[test]
    fn test_factory_propagates_provider_error() {
        let factory = ManagerFactory::new(RefusingFactory);
        let result = factory.apply("library");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::Communication);
    }

    #[test]
    fn test_handles_have_debug_output() {
        let configuration = Configuration::new(RefusingConfiguration);
        assert!(format!("{:?}", configuration).contains("Configuration"));

        let factory = ManagerFactory::new(RefusingFactory);
        assert!(format!("{:?}", factory).contains("ManagerFactory"));
    }
}
