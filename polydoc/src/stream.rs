//! Lazy result stream returned by select operations.

use crate::document::DocumentEntity;
use crate::errors::PolydocResult;

/// A lazy, finite, forward-only stream of entities.
///
/// The stream is consumed by iteration and is not restartable: adapters
/// produce each entity on demand and nothing is cached, so a second pass
/// requires executing the query again. Items are `Result`s because an
/// adapter may hit a backend failure mid-stream.
pub struct EntityStream {
    entities: Box<dyn Iterator<Item = PolydocResult<DocumentEntity>>>,
}

impl EntityStream {
    /// Wraps an adapter-produced iterator.
    pub fn new(entities: Box<dyn Iterator<Item = PolydocResult<DocumentEntity>>>) -> EntityStream {
        EntityStream { entities }
    }

    /// Creates a stream with no entities.
    pub fn empty() -> EntityStream {
        EntityStream {
            entities: Box::new(std::iter::empty()),
        }
    }

    /// Creates a stream over an already-materialized batch of entities.
    pub fn from_vec(entities: Vec<DocumentEntity>) -> EntityStream {
        EntityStream {
            entities: Box::new(entities.into_iter().map(Ok)),
        }
    }

    /// Consumes the stream and returns its first entity, if any.
    pub fn first(mut self) -> PolydocResult<Option<DocumentEntity>> {
        self.entities.next().transpose()
    }

    /// Drains the stream into a vector, stopping at the first failure.
    pub fn try_collect(self) -> PolydocResult<Vec<DocumentEntity>> {
        self.entities.collect()
    }
}

impl Iterator for EntityStream {
    type Item = PolydocResult<DocumentEntity>;

    fn next(&mut self) -> Option<Self::Item> {
        self.entities.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity;
    use crate::errors::{ErrorKind, PolydocError};

    fn person(name: &str) -> DocumentEntity {
        entity!("people", { "name" => name }).unwrap()
    }

    #[test]
    fn test_empty_stream() {
        let stream = EntityStream::empty();
        assert!(stream.first().unwrap().is_none());
    }

    #[test]
    fn test_from_vec_preserves_order() {
        let stream = EntityStream::from_vec(vec![person("Ada"), person("Poliana")]);
        let names: Vec<String> = stream
            .try_collect()
            .unwrap()
            .iter()
            .map(|e| e.value_of("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["\"Ada\"", "\"Poliana\""]);
    }

    #[test]
    fn test_first_consumes_only_one() {
        let stream = EntityStream::from_vec(vec![person("Ada"), person("Poliana")]);
        let first = stream.first().unwrap().unwrap();
        assert_eq!(
            first.value_of("name").unwrap().as_string(),
            Some("Ada")
        );
    }

    #[test]
    fn test_try_collect_stops_at_failure() {
        let items: Vec<PolydocResult<DocumentEntity>> = vec![
            Ok(person("Ada")),
            Err(PolydocError::new("backend failed", ErrorKind::Communication)),
            Ok(person("Poliana")),
        ];
        let stream = EntityStream::new(Box::new(items.into_iter()));
        let result = stream.try_collect();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::Communication);
    }

    #[test]
    fn test_stream_is_forward_only() {
        let mut stream = EntityStream::from_vec(vec![person("Ada")]);
        assert!(stream.next().is_some());
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }
}
