use crate::factory::MemoryManagerFactory;
use polydoc::errors::{ErrorKind, PolydocError, PolydocResult};
use polydoc::manager::{ConfigurationProvider, ManagerFactory};
use polydoc::settings::Settings;

/// Settings key overriding the name of the identity field the adapter
/// injects on insert.
pub const ID_FIELD_KEY: &str = "memory.id.field";

/// Identity field name used when [ID_FIELD_KEY] is not set.
pub const DEFAULT_ID_FIELD: &str = "_id";

/// In-memory backend configuration.
///
/// Reads only the `memory.*` settings keys; everything else in the
/// mapping is ignored, so a settings instance shared with other backends
/// is accepted as-is.
#[derive(Clone, Default)]
pub struct MemoryConfiguration;

impl MemoryConfiguration {
    pub fn new() -> MemoryConfiguration {
        MemoryConfiguration
    }
}

impl ConfigurationProvider for MemoryConfiguration {
    fn apply(&self, settings: &Settings) -> PolydocResult<ManagerFactory> {
        let id_field = settings
            .get_str(ID_FIELD_KEY)?
            .unwrap_or(DEFAULT_ID_FIELD)
            .to_string();
        if id_field.is_empty() {
            log::error!("Settings key {} must not be empty", ID_FIELD_KEY);
            return Err(PolydocError::new(
                &format!("Settings key {} must not be empty", ID_FIELD_KEY),
                ErrorKind::Validation,
            ));
        }

        Ok(ManagerFactory::new(MemoryManagerFactory::new(id_field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polydoc::manager::Configuration;

    #[test]
    fn test_apply_with_empty_settings() {
        let configuration = Configuration::new(MemoryConfiguration::new());
        let factory = configuration.apply(&Settings::builder().build());
        assert!(factory.is_ok());
    }

    #[test]
    fn test_apply_ignores_unknown_keys() {
        let settings = Settings::builder()
            .put("mongodb.host", "localhost:27017")
            .put("hbase.family", "person")
            .build();
        let configuration = Configuration::new(MemoryConfiguration::new());
        assert!(configuration.apply(&settings).is_ok());
    }

    #[test]
    fn test_apply_rejects_empty_id_field() {
        let settings = Settings::builder().put(ID_FIELD_KEY, "").build();
        let configuration = Configuration::new(MemoryConfiguration::new());
        let result = configuration.apply(&settings);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::Validation);
    }

    #[test]
    fn test_apply_rejects_non_string_id_field() {
        let settings = Settings::builder().put(ID_FIELD_KEY, 42i64).build();
        let configuration = Configuration::new(MemoryConfiguration::new());
        let result = configuration.apply(&settings);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidDataType);
    }
}
