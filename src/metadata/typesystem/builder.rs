//! Builder for CLR type descriptors.
//!
//! This module provides the [`TypeBuilder`] struct, which offers a fluent API for describing a
//! CLR type: its properties in reflection order, their attributes, and the attributes and
//! self-validation logic of the type itself.
//!
//! # Example
//!
//! ```rust
//! use entityscope::metadata::customattributes::ValidationAttribute;
//! use entityscope::metadata::typesystem::{ClrType, TypeBuilder, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let airport = TypeBuilder::new("AirportDetails")
//!     .property("AirportCode", ClrType::String)
//!     .attribute(ValidationAttribute::regular_expression("^[A-Z]{3}$"))
//!     .property("CityCode", ClrType::String)
//!     .register(&registry);
//!
//! assert_eq!(airport.properties.len(), 2);
//! assert!(registry.get("AirportDetails").is_some());
//! ```

use std::sync::Arc;

use crate::{
    metadata::{
        customattributes::{Attribute, AttributeList},
        typesystem::{ClrProperty, ClrType, PropertyFlags, TypeDescriptor, TypeDescriptorRc, TypeRegistry},
    },
    validation::ValidatableObject,
};

/// Provides a fluent API for building type descriptors
pub struct TypeBuilder {
    /// Name of the type being built
    name: String,
    /// Properties added so far
    properties: Vec<ClrProperty>,
    /// Type level attributes
    attributes: AttributeList,
    /// Self-validation logic
    validatable: Option<Arc<dyn ValidatableObject>>,
}

impl TypeBuilder {
    /// Start building a type with the given name
    ///
    /// ## Arguments
    /// * 'name' - The CLR type name
    pub fn new(name: impl Into<String>) -> Self {
        TypeBuilder {
            name: name.into(),
            properties: Vec::new(),
            attributes: AttributeList::new(),
            validatable: None,
        }
    }

    /// Add a public read/write instance property
    ///
    /// ## Arguments
    /// * 'name'          - The property name
    /// * 'property_type' - The declared type of the property
    #[must_use]
    pub fn property(mut self, name: &str, property_type: ClrType) -> Self {
        self.properties.push(ClrProperty::new(name, property_type));
        self
    }

    /// Replace the flags of the last added property
    ///
    /// ## Arguments
    /// * 'flags' - The accessibility flags to use
    #[must_use]
    pub fn flags(mut self, flags: PropertyFlags) -> Self {
        if let Some(property) = self.properties.last_mut() {
            property.flags = flags;
        }
        self
    }

    /// Declare an attribute on the last added property, or on the type if none was added yet
    ///
    /// ## Arguments
    /// * 'attribute' - The attribute to declare
    #[must_use]
    pub fn attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        match self.properties.last_mut() {
            Some(property) => property.attributes.push(attribute.into()),
            None => self.attributes.push(attribute.into()),
        }
        self
    }

    /// Declare an attribute on a property added earlier; ignored if no such property exists
    ///
    /// ## Arguments
    /// * 'property'  - Name of the property
    /// * 'attribute' - The attribute to declare
    #[must_use]
    pub fn attribute_on(mut self, property: &str, attribute: impl Into<Attribute>) -> Self {
        if let Some(target) = self.properties.iter_mut().find(|p| p.name == property) {
            target.attributes.push(attribute.into());
        }
        self
    }

    /// Declare an attribute on the type itself
    ///
    /// ## Arguments
    /// * 'attribute' - The attribute to declare
    #[must_use]
    pub fn type_attribute(mut self, attribute: impl Into<Attribute>) -> Self {
        self.attributes.push(attribute.into());
        self
    }

    /// Attach self-validation logic to the type
    ///
    /// ## Arguments
    /// * 'validatable' - Called with each instance of the type during validation
    #[must_use]
    pub fn validatable(mut self, validatable: Arc<dyn ValidatableObject>) -> Self {
        self.validatable = Some(validatable);
        self
    }

    /// Finish the descriptor
    #[must_use]
    pub fn build(self) -> TypeDescriptorRc {
        Arc::new(TypeDescriptor {
            name: self.name,
            properties: self.properties,
            attributes: self.attributes,
            validatable: self.validatable,
        })
    }

    /// Finish the descriptor and add it to `registry`, replacing any type of the same name
    ///
    /// ## Arguments
    /// * 'registry' - The registry to add the type to
    pub fn register(self, registry: &TypeRegistry) -> TypeDescriptorRc {
        let descriptor = self.build();
        registry.insert(descriptor.clone());
        descriptor
    }
}
