use crate::{
    entry::{EntityEntry, NavigationEntryMetadata},
    metadata::instance::{InstanceRc, Value},
};

/// Access to a navigation property referring to a single entity
#[derive(Debug, Clone)]
pub struct ReferenceEntry {
    entity_entry: EntityEntry,
    metadata: NavigationEntryMetadata,
}

impl ReferenceEntry {
    pub(crate) fn new(entity_entry: EntityEntry, metadata: NavigationEntryMetadata) -> Self {
        ReferenceEntry {
            entity_entry,
            metadata,
        }
    }

    /// The navigation property name
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    /// The metadata of the navigation property
    #[must_use]
    pub fn metadata(&self) -> &NavigationEntryMetadata {
        &self.metadata
    }

    /// The entry of the entity declaring the navigation property
    #[must_use]
    pub fn entity_entry(&self) -> &EntityEntry {
        &self.entity_entry
    }

    /// The related entity, [`Value::Null`] if there is none
    #[must_use]
    pub fn current_value(&self) -> Value {
        self.entity_entry.current_value(self.name())
    }

    /// Point the navigation property to another entity, or to none
    pub fn set_current_value(&self, related: Option<InstanceRc>) {
        self.entity_entry.set_current_value(self.name(), related);
    }
}

/// Access to a navigation property referring to many entities
#[derive(Debug, Clone)]
pub struct CollectionEntry {
    entity_entry: EntityEntry,
    metadata: NavigationEntryMetadata,
}

impl CollectionEntry {
    pub(crate) fn new(entity_entry: EntityEntry, metadata: NavigationEntryMetadata) -> Self {
        CollectionEntry {
            entity_entry,
            metadata,
        }
    }

    /// The navigation property name
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    /// The metadata of the navigation property
    #[must_use]
    pub fn metadata(&self) -> &NavigationEntryMetadata {
        &self.metadata
    }

    /// The entry of the entity declaring the navigation property
    #[must_use]
    pub fn entity_entry(&self) -> &EntityEntry {
        &self.entity_entry
    }

    /// The related entities as a [`Value::Collection`], or [`Value::Null`]
    #[must_use]
    pub fn current_value(&self) -> Value {
        self.entity_entry.current_value(self.name())
    }

    /// The related entities, empty if the collection is null
    #[must_use]
    pub fn related(&self) -> Vec<InstanceRc> {
        match self.current_value() {
            Value::Collection(items) => items,
            _ => Vec::new(),
        }
    }

    /// Replace the related entities
    pub fn set_current_value(&self, related: Vec<InstanceRc>) {
        self.entity_entry
            .set_current_value(self.name(), Value::Collection(related));
    }
}
