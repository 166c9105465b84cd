use std::sync::Arc;

use crate::{
    entry::{
        entity::{snapshot_value, values_equal},
        EntityEntry, PropertyEntryMetadata,
    },
    metadata::instance::{InstanceRc, Value},
    Error::NullComplexObject,
    Result,
};

/// Access to a scalar or complex property, possibly nested inside complex properties.
///
/// Property entries are created fresh for every lookup and hold their parent chain, so the
/// values read and written always go through the objects currently assigned to the chain.
#[derive(Debug, Clone)]
pub struct PropertyEntry {
    entity_entry: EntityEntry,
    parent: Option<Arc<PropertyEntry>>,
    metadata: PropertyEntryMetadata,
}

impl PropertyEntry {
    pub(crate) fn new(
        entity_entry: EntityEntry,
        parent: Option<Arc<PropertyEntry>>,
        metadata: PropertyEntryMetadata,
    ) -> Self {
        PropertyEntry {
            entity_entry,
            parent,
            metadata,
        }
    }

    /// The property name
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    /// The metadata of the property
    #[must_use]
    pub fn metadata(&self) -> &PropertyEntryMetadata {
        &self.metadata
    }

    /// The entry of the entity owning the property chain
    #[must_use]
    pub fn entity_entry(&self) -> &EntityEntry {
        &self.entity_entry
    }

    /// The complex property containing this property, `None` for top-level properties
    #[must_use]
    pub fn parent_property(&self) -> Option<&PropertyEntry> {
        self.parent.as_deref()
    }

    /// Number of complex properties above this one
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parent.as_ref().map_or(0, |parent| parent.depth() + 1)
    }

    /// The dotted path from the entity to this property, e.g. `Departure.Airport.AirportCode`
    #[must_use]
    pub fn path(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}.{}", parent.path(), self.name()),
            None => self.name().to_string(),
        }
    }

    /// Returns `true` for complex properties
    #[must_use]
    pub fn is_complex(&self) -> bool {
        self.metadata.is_complex()
    }

    /// The current value, [`Value::Null`] if a complex object on the chain is null
    #[must_use]
    pub fn current_value(&self) -> Value {
        self.current_owner()
            .map_or(Value::Null, |owner| owner.get(self.name()))
    }

    /// Write the current value
    ///
    /// # Errors
    /// Returns [`crate::Error::NullComplexObject`] if the containing complex object is null.
    pub fn set_current_value(&self, value: impl Into<Value>) -> Result<()> {
        let owner = self.current_owner().ok_or_else(|| self.null_parent_error())?;
        owner.set(self.name(), value);
        Ok(())
    }

    /// The original value, [`Value::Null`] if a complex object on the chain was null
    #[must_use]
    pub fn original_value(&self) -> Value {
        self.original_owner()
            .map_or(Value::Null, |owner| owner.get(self.name()))
    }

    /// Write the original value
    ///
    /// # Errors
    /// Returns [`crate::Error::NullComplexObject`] if the containing complex object was null.
    pub fn set_original_value(&self, value: impl Into<Value>) -> Result<()> {
        let owner = self
            .original_owner()
            .ok_or_else(|| self.null_parent_error())?;
        let model = self.entity_entry.model().as_ref();
        owner.set(self.name(), snapshot_value(model, value.into()));
        Ok(())
    }

    /// Returns `true` if the current value differs from the original value.
    ///
    /// Complex objects are compared by content.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        let model = self.entity_entry.model().as_ref();
        !values_equal(model, &self.current_value(), &self.original_value())
    }

    fn current_owner(&self) -> Option<InstanceRc> {
        match &self.parent {
            Some(parent) => parent.current_value().as_object().cloned(),
            None => Some(self.entity_entry.entity().clone()),
        }
    }

    fn original_owner(&self) -> Option<InstanceRc> {
        match &self.parent {
            Some(parent) => parent.original_value().as_object().cloned(),
            None => Some(self.entity_entry.original_values().clone()),
        }
    }

    fn null_parent_error(&self) -> crate::Error {
        NullComplexObject {
            property: self
                .parent
                .as_ref()
                .map_or_else(String::new, |parent| parent.path()),
            path: self.path(),
        }
    }
}
