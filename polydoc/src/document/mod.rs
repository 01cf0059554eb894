//! The generic document data model: [Value], [Document] and [DocumentEntity].
//!
//! These are plain immutable value objects. They carry data between callers
//! and backend adapters and are safe to share across threads without
//! synchronization.

mod document;
mod entity;
mod value;

pub use document::Document;
pub use entity::DocumentEntity;
pub use value::Value;
