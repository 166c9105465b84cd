//! Entries giving access to tracked entities and their members.
//!
//! An [`EntityEntry`] tracks a live entity instance together with a snapshot of its original
//! values. Members of the entity are reached through accessor entries created by the path
//! resolver (see [`crate::path`]):
//!
//! - [`PropertyEntry`] - a scalar or complex property, possibly nested in complex properties
//! - [`ReferenceEntry`] - a navigation property to a single entity
//! - [`CollectionEntry`] - a navigation property to many entities
//! - [`MemberEntry`] - any of the above
//!
//! Reading through a null complex object yields [`crate::metadata::instance::Value::Null`];
//! writing through one fails with [`crate::Error::NullComplexObject`].

mod entity;
mod member;
mod metadata;
mod navigation;
mod property;

pub use entity::EntityEntry;
pub use member::MemberEntry;
pub use metadata::{MemberEntryType, NavigationEntryMetadata, PropertyEntryMetadata};
pub use navigation::{CollectionEntry, ReferenceEntry};
pub use property::PropertyEntry;
