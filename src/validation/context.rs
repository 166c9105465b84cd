//! Contexts handed to validators.
//!
//! An [`EntityValidationContext`] lives for one validation run of an entity. For every
//! validator invocation it produces a [`ValidationContext`], which is what user validation code
//! sees: the display name of the validated member, its path, and the custom items of the run.

use std::{collections::HashMap, sync::Arc};

use crate::{
    entry::{EntityEntry, MemberEntry},
    metadata::{customattributes::DisplayAttribute, instance::Value},
};

/// Custom items passed to every user validator of a validation run
pub type ValidationItems = Arc<HashMap<String, Value>>;

/// Describes the member being validated to validation attributes and self-validating objects
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Type name of the entity being validated
    pub object_type: String,
    /// Name used in error messages
    pub display_name: String,
    /// Dotted path of the validated member, `None` when the entity itself is validated
    pub member_name: Option<String>,
    /// Custom items of the validation run
    pub items: ValidationItems,
}

impl ValidationContext {
    /// Create a context without custom items
    ///
    /// ## Arguments
    /// * 'object_type'  - Type name of the validated entity
    /// * 'display_name' - Name used in error messages
    /// * 'member_name'  - Path of the validated member, if any
    pub fn new(
        object_type: impl Into<String>,
        display_name: impl Into<String>,
        member_name: Option<String>,
    ) -> Self {
        ValidationContext {
            object_type: object_type.into(),
            display_name: display_name.into(),
            member_name,
            items: ValidationItems::default(),
        }
    }

    /// Attach custom items
    #[must_use]
    pub fn with_items(mut self, items: ValidationItems) -> Self {
        self.items = items;
        self
    }

    /// Look up a custom item
    #[must_use]
    pub fn item(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }
}

/// A failed validation as reported by a validation attribute or a self-validating object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// The error message
    pub message: String,
    /// Paths of the members the failure is about; empty to attribute it to the validated member
    pub member_names: Vec<String>,
}

impl ValidationFailure {
    /// A failure about the validated member
    pub fn new(message: impl Into<String>) -> Self {
        ValidationFailure {
            message: message.into(),
            member_names: Vec::new(),
        }
    }

    /// A failure about the named members, reported once per member
    pub fn with_members<I, S>(message: impl Into<String>, member_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValidationFailure {
            message: message.into(),
            member_names: member_names.into_iter().map(Into::into).collect(),
        }
    }
}

/// State of one validation run of an entity
#[derive(Debug, Clone)]
pub struct EntityValidationContext {
    entry: EntityEntry,
    items: ValidationItems,
}

impl EntityValidationContext {
    /// Create a context for validating `entry` without custom items
    #[must_use]
    pub fn new(entry: EntityEntry) -> Self {
        Self::with_items(entry, ValidationItems::default())
    }

    /// Create a context for validating `entry` with custom items
    #[must_use]
    pub fn with_items(entry: EntityEntry, items: ValidationItems) -> Self {
        EntityValidationContext { entry, items }
    }

    /// The entry being validated
    #[must_use]
    pub fn entry(&self) -> &EntityEntry {
        &self.entry
    }

    /// The custom items of the run
    #[must_use]
    pub fn items(&self) -> &ValidationItems {
        &self.items
    }

    /// Builds the context for a validator of `member` (or of the entity, for `None`).
    ///
    /// The display name is taken from `display` when it names one, otherwise it is the member
    /// path, or the entity type name at entity level.
    pub(crate) fn validation_context(
        &self,
        member: Option<&MemberEntry>,
        display: Option<&DisplayAttribute>,
    ) -> ValidationContext {
        let display_name = display.and_then(|display| display.name.clone());
        let object_type = self.entry.entity_type().to_string();

        let (display_name, member_name) = match member {
            Some(member) => {
                let path = member.path();
                (display_name.unwrap_or_else(|| path.clone()), Some(path))
            }
            None => (display_name.unwrap_or_else(|| object_type.clone()), None),
        };

        ValidationContext {
            object_type,
            display_name,
            member_name,
            items: self.items.clone(),
        }
    }
}
