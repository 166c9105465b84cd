use strum::{AsRefStr, Display};

use crate::metadata::typesystem::ClrType;

/// The kind of member an entry gives access to
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
pub enum MemberEntryType {
    /// A scalar property, mapped or not
    ScalarProperty,
    /// A complex property
    ComplexProperty,
    /// A navigation property to a single entity
    ReferenceNavigationProperty,
    /// A navigation property to many entities
    CollectionNavigationProperty,
}

/// Immutable description of a scalar or complex property reached through an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntryMetadata {
    declaring_type: String,
    element_type: ClrType,
    name: String,
    is_mapped: bool,
    is_complex: bool,
}

impl PropertyEntryMetadata {
    pub(crate) fn new(
        declaring_type: impl Into<String>,
        element_type: ClrType,
        name: impl Into<String>,
        is_mapped: bool,
        is_complex: bool,
    ) -> Self {
        PropertyEntryMetadata {
            declaring_type: declaring_type.into(),
            element_type,
            name: name.into(),
            is_mapped,
            is_complex,
        }
    }

    /// The type declaring the property
    #[must_use]
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// The declared CLR type of the property
    #[must_use]
    pub fn element_type(&self) -> &ClrType {
        &self.element_type
    }

    /// The property name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the property is part of the model, `false` for CLR-only properties
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.is_mapped
    }

    /// Returns `true` for complex properties
    #[must_use]
    pub fn is_complex(&self) -> bool {
        self.is_complex
    }

    /// The kind of member described
    #[must_use]
    pub fn member_entry_type(&self) -> MemberEntryType {
        if self.is_complex {
            MemberEntryType::ComplexProperty
        } else {
            MemberEntryType::ScalarProperty
        }
    }
}

/// Immutable description of a navigation property reached through an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntryMetadata {
    declaring_type: String,
    element_type: String,
    name: String,
    is_collection: bool,
}

impl NavigationEntryMetadata {
    pub(crate) fn new(
        declaring_type: impl Into<String>,
        element_type: impl Into<String>,
        name: impl Into<String>,
        is_collection: bool,
    ) -> Self {
        NavigationEntryMetadata {
            declaring_type: declaring_type.into(),
            element_type: element_type.into(),
            name: name.into(),
            is_collection,
        }
    }

    /// The entity type declaring the navigation property
    #[must_use]
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// The related entity type
    #[must_use]
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    /// The navigation property name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the navigation property holds many entities
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.is_collection
    }

    /// The kind of member described
    #[must_use]
    pub fn member_entry_type(&self) -> MemberEntryType {
        if self.is_collection {
            MemberEntryType::CollectionNavigationProperty
        } else {
            MemberEntryType::ReferenceNavigationProperty
        }
    }
}
