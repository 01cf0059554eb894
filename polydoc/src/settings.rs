//! Opaque key/value configuration input for backend configurations.

use crate::document::Value;
use crate::errors::{ErrorKind, PolydocError, PolydocResult};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// An immutable mapping from configuration key to opaque value: the sole
/// input to configuration construction.
///
/// Keys are backend-specific constants (a host key, a column-family key),
/// but the mapping itself is backend-agnostic: a `Settings` instance may
/// carry keys for several backends at once, and each [Configuration] reads
/// only the keys it recognizes, ignoring the rest.
///
/// # Examples
///
/// ```rust,ignore
/// use polydoc::settings::Settings;
///
/// let settings = Settings::builder()
///     .put("memory.id.field", "_key")
///     .put("mongodb.host", "localhost:27017")
///     .build();
/// assert!(settings.contains_key("memory.id.field"));
/// ```
///
/// [Configuration]: crate::manager::Configuration
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Settings {
    entries: BTreeMap<String, Value>,
}

impl Settings {
    /// Creates a builder for assembling a settings mapping.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the value for the given key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the value for the given key as a string.
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::InvalidDataType] if the key is present but the
    /// value is not a string. An absent key yields `Ok(None)`.
    pub fn get_str(&self, key: &str) -> PolydocResult<Option<&str>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Value::String(v)) => Ok(Some(v)),
            Some(other) => {
                log::error!("Settings key {} holds {} instead of a string", key, other);
                Err(PolydocError::new(
                    &format!("Settings key {} does not hold a string", key),
                    ErrorKind::InvalidDataType,
                ))
            }
        }
    }

    /// Returns the value for the given key as an integer.
    ///
    /// # Errors
    ///
    /// Fails with [ErrorKind::InvalidDataType] if the key is present but the
    /// value is not an integer. An absent key yields `Ok(None)`.
    pub fn get_i64(&self, key: &str) -> PolydocResult<Option<i64>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => match value.as_integer() {
                Some(v) => Ok(Some(v)),
                None => {
                    log::error!("Settings key {} holds {} instead of an integer", key, value);
                    Err(PolydocError::new(
                        &format!("Settings key {} does not hold an integer", key),
                        ErrorKind::InvalidDataType,
                    ))
                }
            },
        }
    }

    /// Checks if the mapping contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Debug for Settings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

/// Builder for [Settings]; `put` is repeatable, `build` finalizes.
///
/// A repeated key overwrites the earlier value.
pub struct SettingsBuilder {
    entries: BTreeMap<String, Value>,
}

impl SettingsBuilder {
    /// Adds one key/value entry.
    pub fn put<T: Into<Value>>(mut self, key: &str, value: T) -> SettingsBuilder {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    /// Finalizes the mapping.
    pub fn build(self) -> Settings {
        Settings {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_puts_entries() {
        let settings = Settings::builder()
            .put("host", "localhost")
            .put("port", 8529i64)
            .build();

        assert_eq!(settings.len(), 2);
        assert_eq!(settings.get("host"), Some(&Value::String("localhost".to_string())));
        assert_eq!(settings.get_i64("port").unwrap(), Some(8529));
    }

    #[test]
    fn test_repeated_put_overwrites() {
        let settings = Settings::builder()
            .put("host", "a")
            .put("host", "b")
            .build();

        assert_eq!(settings.len(), 1);
        assert_eq!(settings.get_str("host").unwrap(), Some("b"));
    }

    #[test]
    fn test_get_absent_key() {
        let settings = Settings::builder().build();
        assert!(settings.get("missing").is_none());
        assert_eq!(settings.get_str("missing").unwrap(), None);
        assert_eq!(settings.get_i64("missing").unwrap(), None);
        assert!(settings.is_empty());
    }

    #[test]
    fn test_get_str_type_mismatch() {
        let settings = Settings::builder().put("port", 8529i64).build();
        let result = settings.get_str("port");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidDataType);
    }

    #[test]
    fn test_get_i64_type_mismatch() {
        let settings = Settings::builder().put("host", "localhost").build();
        let result = settings.get_i64("host");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidDataType);
    }

    #[test]
    fn test_keys_are_sorted() {
        let settings = Settings::builder()
            .put("b", 1)
            .put("a", 2)
            .build();
        let keys: Vec<&str> = settings.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_shared_superset_settings() {
        // One mapping may carry keys for several backends at once.
        let settings = Settings::builder()
            .put("hbase.family", "person")
            .put("memory.id.field", "_key")
            .build();
        assert!(settings.contains_key("hbase.family"));
        assert!(settings.contains_key("memory.id.field"));
    }
}
