use crate::manager::MemoryManager;
use polydoc::errors::{ErrorKind, PolydocError, PolydocResult};
use polydoc::manager::{Manager, ManagerFactoryProvider};

/// Produces [MemoryManager]s bound to a database name.
///
/// Each `apply` call yields a fresh manager backed by its own storage;
/// two managers never share state even when bound to the same name.
#[derive(Clone)]
pub struct MemoryManagerFactory {
    id_field: String,
}

impl MemoryManagerFactory {
    pub(crate) fn new(id_field: String) -> MemoryManagerFactory {
        MemoryManagerFactory { id_field }
    }
}

impl ManagerFactoryProvider for MemoryManagerFactory {
    fn apply(&self, database_name: &str) -> PolydocResult<Manager> {
        if database_name.is_empty() {
            log::error!("Manager does not support an empty database name");
            return Err(PolydocError::new(
                "Manager does not support an empty database name",
                ErrorKind::Validation,
            ));
        }

        Ok(Manager::new(MemoryManager::new(
            database_name,
            &self.id_field,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polydoc::entity;

    #[test]
    fn test_apply_rejects_empty_database_name() {
        let factory = MemoryManagerFactory::new("_id".to_string());
        let result = factory.apply("");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::Validation);
    }

    #[test]
    fn test_apply_binds_database_name() {
        let factory = MemoryManagerFactory::new("_id".to_string());
        let manager = factory.apply("library").unwrap();
        assert_eq!(manager.name(), "library");
    }

    #[test]
    fn test_managers_from_same_factory_do_not_share_state() {
        let factory = MemoryManagerFactory::new("_id".to_string());
        let first = factory.apply("library").unwrap();
        let second = factory.apply("library").unwrap();

        first
            .insert(entity!("people", { "name" => "Ada" }).unwrap())
            .unwrap();

        assert_eq!(first.count("people").unwrap(), 1);
        assert_eq!(second.count("people").unwrap(), 0);
    }
}
