use crate::{
    entry::{CollectionEntry, EntityEntry, MemberEntryType, PropertyEntry, ReferenceEntry},
    metadata::instance::Value,
};

/// Any member of an entity: a (possibly nested) property or a navigation property
#[derive(Debug, Clone)]
pub enum MemberEntry {
    /// A scalar or complex property
    Property(PropertyEntry),
    /// A reference navigation property
    Reference(ReferenceEntry),
    /// A collection navigation property
    Collection(CollectionEntry),
}

impl MemberEntry {
    /// The member name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            MemberEntry::Property(entry) => entry.name(),
            MemberEntry::Reference(entry) => entry.name(),
            MemberEntry::Collection(entry) => entry.name(),
        }
    }

    /// The dotted path of the member from its entity
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            MemberEntry::Property(entry) => entry.path(),
            other => other.name().to_string(),
        }
    }

    /// The entry of the owning entity
    #[must_use]
    pub fn entity_entry(&self) -> &EntityEntry {
        match self {
            MemberEntry::Property(entry) => entry.entity_entry(),
            MemberEntry::Reference(entry) => entry.entity_entry(),
            MemberEntry::Collection(entry) => entry.entity_entry(),
        }
    }

    /// The current value of the member
    #[must_use]
    pub fn current_value(&self) -> Value {
        match self {
            MemberEntry::Property(entry) => entry.current_value(),
            MemberEntry::Reference(entry) => entry.current_value(),
            MemberEntry::Collection(entry) => entry.current_value(),
        }
    }

    /// The kind of member
    #[must_use]
    pub fn member_entry_type(&self) -> MemberEntryType {
        match self {
            MemberEntry::Property(entry) => entry.metadata().member_entry_type(),
            MemberEntry::Reference(entry) => entry.metadata().member_entry_type(),
            MemberEntry::Collection(entry) => entry.metadata().member_entry_type(),
        }
    }

    /// The property entry, if this member is a property
    #[must_use]
    pub fn as_property(&self) -> Option<&PropertyEntry> {
        match self {
            MemberEntry::Property(entry) => Some(entry),
            _ => None,
        }
    }
}

impl From<PropertyEntry> for MemberEntry {
    fn from(entry: PropertyEntry) -> Self {
        MemberEntry::Property(entry)
    }
}

impl From<ReferenceEntry> for MemberEntry {
    fn from(entry: ReferenceEntry) -> Self {
        MemberEntry::Reference(entry)
    }
}

impl From<CollectionEntry> for MemberEntry {
    fn from(entry: CollectionEntry) -> Self {
        MemberEntry::Collection(entry)
    }
}
