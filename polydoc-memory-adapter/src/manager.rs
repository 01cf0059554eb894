use crate::matcher;
use dashmap::DashMap;
use indexmap::IndexMap;
use polydoc::document::{Document, DocumentEntity, Value};
use polydoc::errors::{ErrorKind, PolydocError, PolydocResult};
use polydoc::manager::ManagerProvider;
use polydoc::query::{DeleteQuery, Query, SortOrder};
use polydoc::stream::EntityStream;
use std::cmp::Ordering;
use uuid::Uuid;

/// In-memory manager: collections are identity-keyed entity maps.
///
/// Each manager owns its storage outright; two managers never share
/// collections even when bound to the same database name. All operations
/// are synchronous and thread-safe.
pub struct MemoryManager {
    name: String,
    id_field: String,
    collections: DashMap<String, IndexMap<String, DocumentEntity>>,
}

impl MemoryManager {
    pub(crate) fn new(name: &str, id_field: &str) -> MemoryManager {
        MemoryManager {
            name: name.to_string(),
            id_field: id_field.to_string(),
            collections: DashMap::new(),
        }
    }

    /// Returns the identity field name this manager injects and keys by.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    fn identity_key(&self, entity: &DocumentEntity) -> Option<String> {
        entity.value_of(&self.id_field).map(render_key)
    }

    fn snapshot(&self, collection_name: &str) -> Vec<DocumentEntity> {
        self.collections
            .get(collection_name)
            .map(|entities| entities.values().cloned().collect())
            .unwrap_or_default()
    }
}

/// Renders an identity value into a lossless map key.
///
/// The rendering must distinguish any two unequal values, so binary data
/// is spelled out as tagged hex rather than through its lossy `Display`
/// form, and composites are rendered element by element.
fn render_key(value: &Value) -> String {
    match value {
        Value::Bytes(bytes) => {
            let mut key = String::with_capacity(bytes.len() * 2 + 6);
            key.push_str("bytes:");
            for byte in bytes {
                key.push_str(&format!("{:02x}", byte));
            }
            key
        }
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_key).collect();
            format!("[{}]", parts.join(", "))
        }
        other => other.to_string(),
    }
}

impl ManagerProvider for MemoryManager {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn insert(&self, entity: DocumentEntity) -> PolydocResult<DocumentEntity> {
        let mut entity = entity;
        let key = match self.identity_key(&entity) {
            Some(key) => key,
            None => {
                let generated = Uuid::new_v4().to_string();
                entity.add(Document::of(&self.id_field, generated.as_str())?);
                render_key(&Value::String(generated))
            }
        };

        self.collections
            .entry(entity.collection_name().to_string())
            .or_default()
            .insert(key, entity.clone());
        Ok(entity)
    }

    fn update(&self, entity: DocumentEntity) -> PolydocResult<DocumentEntity> {
        let key = match self.identity_key(&entity) {
            Some(key) => key,
            None => {
                log::error!(
                    "Update on {} requires the identity field {}",
                    entity.collection_name(),
                    self.id_field
                );
                return Err(PolydocError::new(
                    &format!("Update requires the identity field {}", self.id_field),
                    ErrorKind::Validation,
                ));
            }
        };

        // Explicit-identity upsert: an unknown identity stores a new
        // entity rather than failing.
        self.collections
            .entry(entity.collection_name().to_string())
            .or_default()
            .insert(key, entity.clone());
        Ok(entity)
    }

    fn delete(&self, query: DeleteQuery) -> PolydocResult<()> {
        let condition = match query.condition() {
            None => {
                self.collections.remove(query.collection_name());
                return Ok(());
            }
            Some(condition) => condition,
        };

        if let Some(mut entities) = self.collections.get_mut(query.collection_name()) {
            let doomed: Vec<String> = entities
                .iter()
                .map(|(key, entity)| Ok((key.clone(), matcher::matches(condition, entity)?)))
                .collect::<PolydocResult<Vec<(String, bool)>>>()?
                .into_iter()
                .filter_map(|(key, matched)| matched.then_some(key))
                .collect();
            for key in doomed {
                entities.shift_remove(&key);
            }
        }
        Ok(())
    }

    fn select(&self, query: Query) -> PolydocResult<EntityStream> {
        let snapshot = self.snapshot(query.collection_name());

        let mut selected = Vec::with_capacity(snapshot.len());
        for entity in snapshot {
            match query.condition() {
                Some(condition) if !matcher::matches(condition, &entity)? => continue,
                _ => selected.push(entity),
            }
        }

        if !query.sorts().is_empty() {
            selected.sort_by(|a, b| {
                for sort in query.sorts() {
                    let left = matcher::resolve(a, sort.field()).unwrap_or(&Value::Null);
                    let right = matcher::resolve(b, sort.field()).unwrap_or(&Value::Null);
                    let ordering = match sort.order() {
                        SortOrder::Ascending => left.cmp(right),
                        SortOrder::Descending => right.cmp(left),
                    };
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
                Ordering::Equal
            });
        }

        // Skip, then limit, after ordering.
        let skipped = query.skip().unwrap_or(0) as usize;
        let mut selected: Vec<DocumentEntity> = selected.into_iter().skip(skipped).collect();
        if let Some(limit) = query.limit() {
            selected.truncate(limit as usize);
        }

        Ok(EntityStream::from_vec(selected))
    }

    fn count(&self, collection_name: &str) -> PolydocResult<u64> {
        Ok(self
            .collections
            .get(collection_name)
            .map(|entities| entities.len() as u64)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polydoc::entity;
    use polydoc::query::{delete, field, select};

    fn manager() -> MemoryManager {
        MemoryManager::new("library", "_id")
    }

    fn person(name: &str, city: &str, age: i32) -> DocumentEntity {
        entity!("people", {
            "name" => name,
            "city" => city,
            "age" => age
        })
        .unwrap()
    }

    #[test]
    fn test_insert_injects_generated_identity() {
        let manager = manager();
        let stored = manager.insert(person("Ada", "Salvador", 36)).unwrap();

        let id = stored.value_of("_id").unwrap();
        assert!(matches!(id, Value::String(_)));
        assert_eq!(manager.count("people").unwrap(), 1);
    }

    #[test]
    fn test_insert_keeps_caller_identity() {
        let manager = manager();
        let mut entity = person("Ada", "Salvador", 36);
        entity.add(Document::of("_id", "ada-1").unwrap());

        let stored = manager.insert(entity).unwrap();
        assert_eq!(stored.value_of("_id").unwrap().as_string(), Some("ada-1"));
    }

    #[test]
    fn test_insert_with_same_identity_replaces() {
        let manager = manager();
        let mut first = person("Ada", "Salvador", 36);
        first.add(Document::of("_id", "p1").unwrap());
        let mut second = person("Grace", "Lisbon", 45);
        second.add(Document::of("_id", "p1").unwrap());

        manager.insert(first).unwrap();
        manager.insert(second).unwrap();
        assert_eq!(manager.count("people").unwrap(), 1);
    }

    #[test]
    fn test_distinct_binary_identities_do_not_collide() {
        let manager = manager();
        let mut first = person("Ada", "Salvador", 36);
        first.add(Document::of("_id", vec![1u8, 2u8]).unwrap());
        let mut second = person("Grace", "Lisbon", 45);
        second.add(Document::of("_id", vec![3u8, 4u8]).unwrap());

        manager.insert(first).unwrap();
        manager.insert(second).unwrap();
        assert_eq!(manager.count("people").unwrap(), 2);
    }

    #[test]
    fn test_equal_binary_identities_replace() {
        let manager = manager();
        let mut first = person("Ada", "Salvador", 36);
        first.add(Document::of("_id", vec![1u8, 2u8]).unwrap());
        let mut second = person("Grace", "Lisbon", 45);
        second.add(Document::of("_id", vec![1u8, 2u8]).unwrap());

        manager.insert(first).unwrap();
        manager.insert(second).unwrap();
        assert_eq!(manager.count("people").unwrap(), 1);
    }

    #[test]
    fn test_update_requires_identity_field() {
        let manager = manager();
        let result = manager.update(person("Ada", "Salvador", 36));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::Validation);
    }

    #[test]
    fn test_update_replaces_stored_entity() {
        let manager = manager();
        let stored = manager.insert(person("Ada", "Salvador", 36)).unwrap();

        let mut updated = stored.clone();
        updated.add(Document::of("city", "Lisbon").unwrap());
        manager.update(updated).unwrap();

        let query = select("people").unwrap().build().unwrap();
        let found = manager.select(query).unwrap().first().unwrap().unwrap();
        assert_eq!(found.value_of("city").unwrap().as_string(), Some("Lisbon"));
        assert_eq!(manager.count("people").unwrap(), 1);
    }

    #[test]
    fn test_update_with_unknown_identity_stores() {
        let manager = manager();
        let mut entity = person("Ada", "Salvador", 36);
        entity.add(Document::of("_id", "fresh").unwrap());

        manager.update(entity).unwrap();
        assert_eq!(manager.count("people").unwrap(), 1);
    }

    #[test]
    fn test_delete_without_condition_clears_collection() {
        let manager = manager();
        for i in 0..5 {
            manager
                .insert(person(&format!("p{}", i), "Salvador", 20 + i))
                .unwrap();
        }

        manager.delete(delete("people").unwrap().build().unwrap()).unwrap();
        assert_eq!(manager.count("people").unwrap(), 0);
    }

    #[test]
    fn test_delete_with_condition_removes_matches_only() {
        let manager = manager();
        manager.insert(person("Ada", "Salvador", 36)).unwrap();
        manager.insert(person("Grace", "Lisbon", 45)).unwrap();

        let query = delete("people")
            .unwrap()
            .filter(field("city").eq("Salvador"))
            .unwrap()
            .build()
            .unwrap();
        manager.delete(query).unwrap();

        assert_eq!(manager.count("people").unwrap(), 1);
    }

    #[test]
    fn test_delete_zero_matches_is_success() {
        let manager = manager();
        manager.insert(person("Ada", "Salvador", 36)).unwrap();

        let query = delete("people")
            .unwrap()
            .filter(field("city").eq("Porto"))
            .unwrap()
            .build()
            .unwrap();
        assert!(manager.delete(query).is_ok());
        assert_eq!(manager.count("people").unwrap(), 1);
    }

    #[test]
    fn test_select_filters_sorts_and_paginates() {
        let manager = manager();
        manager.insert(person("Carla", "Salvador", 30)).unwrap();
        manager.insert(person("Ada", "Salvador", 36)).unwrap();
        manager.insert(person("Bruno", "Lisbon", 25)).unwrap();
        manager.insert(person("Bea", "Salvador", 28)).unwrap();

        let query = select("people")
            .unwrap()
            .filter(field("city").eq("Salvador"))
            .unwrap()
            .order_by("name", SortOrder::Ascending)
            .unwrap()
            .skip(1)
            .unwrap()
            .limit(1)
            .unwrap()
            .build()
            .unwrap();

        let names: Vec<String> = manager
            .select(query)
            .unwrap()
            .try_collect()
            .unwrap()
            .iter()
            .map(|e| e.value_of("name").unwrap().as_string().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Bea"]);
    }

    #[test]
    fn test_select_sorts_descending_with_tiebreak() {
        let manager = manager();
        manager.insert(person("Ada", "Salvador", 36)).unwrap();
        manager.insert(person("Bea", "Salvador", 36)).unwrap();
        manager.insert(person("Carla", "Lisbon", 25)).unwrap();

        let query = select("people")
            .unwrap()
            .order_by("age", SortOrder::Descending)
            .unwrap()
            .order_by("name", SortOrder::Ascending)
            .unwrap()
            .build()
            .unwrap();

        let names: Vec<String> = manager
            .select(query)
            .unwrap()
            .try_collect()
            .unwrap()
            .iter()
            .map(|e| e.value_of("name").unwrap().as_string().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Ada", "Bea", "Carla"]);
    }

    #[test]
    fn test_select_missing_sort_field_sorts_first_ascending() {
        let manager = manager();
        manager.insert(person("Ada", "Salvador", 36)).unwrap();
        manager
            .insert(entity!("people", { "name" => "Ghost" }).unwrap())
            .unwrap();

        let query = select("people")
            .unwrap()
            .order_by("age", SortOrder::Ascending)
            .unwrap()
            .build()
            .unwrap();

        let first = manager.select(query).unwrap().first().unwrap().unwrap();
        assert_eq!(first.value_of("name").unwrap().as_string(), Some("Ghost"));
    }

    #[test]
    fn test_select_absent_collection_is_empty() {
        let manager = manager();
        let query = select("nowhere").unwrap().build().unwrap();
        assert!(manager.select(query).unwrap().first().unwrap().is_none());
    }

    #[test]
    fn test_count_absent_collection_is_zero() {
        assert_eq!(manager().count("nowhere").unwrap(), 0);
    }
}
