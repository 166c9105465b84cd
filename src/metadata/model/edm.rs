use std::sync::Arc;

use strum::{AsRefStr, Display};

/// A reference-counted pointer to a [`StructuralType`]
pub type StructuralTypeRc = Arc<StructuralType>;

/// How the store generates the value of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, Display)]
pub enum StoreGeneratedPattern {
    /// The value is supplied by the application
    #[default]
    None,
    /// The value is generated on insert
    Identity,
    /// The value is generated on insert and update
    Computed,
}

/// Number of entities at the target end of a navigation property
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
pub enum Multiplicity {
    /// Exactly one related entity
    One,
    /// At most one related entity
    ZeroOrOne,
    /// Any number of related entities
    Many,
}

/// Whether a structural type is an entity type or a complex type
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
pub enum StructuralKind {
    /// An entity type, with identity and navigation properties
    Entity,
    /// A complex type, embedded in entities or other complex types
    Complex,
}

/// A mapped scalar or complex property and its facets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmProperty {
    /// The property name
    pub name: String,
    /// The complex type of the property, `None` for scalar properties
    pub complex_type: Option<String>,
    /// Nullable facet
    pub nullable: bool,
    /// Store generated facet
    pub store_generated: StoreGeneratedPattern,
    /// MaxLength facet
    pub max_length: Option<usize>,
    /// The MaxLength facet is set to the maximum the store supports
    pub is_max_length: bool,
}

impl EdmProperty {
    /// A nullable scalar property without further facets
    pub fn scalar(name: impl Into<String>) -> Self {
        EdmProperty {
            name: name.into(),
            complex_type: None,
            nullable: true,
            store_generated: StoreGeneratedPattern::None,
            max_length: None,
            is_max_length: false,
        }
    }

    /// A complex property of the given complex type. Complex properties are never nullable.
    pub fn complex(name: impl Into<String>, complex_type: impl Into<String>) -> Self {
        EdmProperty {
            complex_type: Some(complex_type.into()),
            nullable: false,
            ..Self::scalar(name)
        }
    }

    /// Mark the property as non-nullable
    #[must_use]
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Set the store generated pattern
    #[must_use]
    pub fn store_generated(mut self, pattern: StoreGeneratedPattern) -> Self {
        self.store_generated = pattern;
        self
    }

    /// Set a fixed maximum length
    #[must_use]
    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self.is_max_length = false;
        self
    }

    /// Allow the maximum length the store supports
    #[must_use]
    pub fn is_max_length(mut self) -> Self {
        self.max_length = None;
        self.is_max_length = true;
        self
    }

    /// Returns `true` if this is a complex property
    #[must_use]
    pub fn is_complex(&self) -> bool {
        self.complex_type.is_some()
    }
}

/// A navigation property of an entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationProperty {
    /// The property name
    pub name: String,
    /// The related entity type
    pub target_type: String,
    /// Multiplicity of the target end
    pub multiplicity: Multiplicity,
    /// Properties of the declaring type holding the foreign key of this relationship
    pub foreign_keys: Vec<String>,
}

impl NavigationProperty {
    /// A reference navigation property
    pub fn reference(
        name: impl Into<String>,
        target_type: impl Into<String>,
        multiplicity: Multiplicity,
    ) -> Self {
        NavigationProperty {
            name: name.into(),
            target_type: target_type.into(),
            multiplicity,
            foreign_keys: Vec::new(),
        }
    }

    /// A collection navigation property
    pub fn collection(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self::reference(name, target_type, Multiplicity::Many)
    }

    /// Add a foreign key property of the declaring type
    #[must_use]
    pub fn with_foreign_key(mut self, property: impl Into<String>) -> Self {
        self.foreign_keys.push(property.into());
        self
    }

    /// Returns `true` if the target end holds many entities
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.multiplicity == Multiplicity::Many
    }
}

/// Model metadata of an entity or complex type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralType {
    /// The type name, matching the CLR type name
    pub name: String,
    /// Entity or complex
    pub kind: StructuralKind,
    /// Mapped scalar and complex properties
    pub properties: Vec<EdmProperty>,
    /// Navigation properties, always empty for complex types
    pub navigation_properties: Vec<NavigationProperty>,
}

impl StructuralType {
    /// An entity type without properties
    pub fn entity(name: impl Into<String>) -> Self {
        StructuralType {
            name: name.into(),
            kind: StructuralKind::Entity,
            properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    /// A complex type without properties
    pub fn complex(name: impl Into<String>) -> Self {
        StructuralType {
            kind: StructuralKind::Complex,
            ..Self::entity(name)
        }
    }

    /// Add a mapped property
    #[must_use]
    pub fn with_property(mut self, property: EdmProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Add a navigation property
    #[must_use]
    pub fn with_navigation(mut self, navigation: NavigationProperty) -> Self {
        self.navigation_properties.push(navigation);
        self
    }

    /// Find a mapped property by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&EdmProperty> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// Find a navigation property by name
    #[must_use]
    pub fn navigation(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigation_properties
            .iter()
            .find(|navigation| navigation.name == name)
    }

    /// Returns `true` if `property` holds a foreign key of any navigation property
    #[must_use]
    pub fn is_foreign_key(&self, property: &str) -> bool {
        self.navigation_properties
            .iter()
            .any(|navigation| navigation.foreign_keys.iter().any(|fk| fk == property))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_facets() {
        let property = EdmProperty::scalar("FlightNumber").required().max_length(10);
        assert!(!property.nullable);
        assert_eq!(property.max_length, Some(10));
        assert!(!property.is_complex());

        let property = property.is_max_length();
        assert!(property.is_max_length);
        assert_eq!(property.max_length, None);

        let complex = EdmProperty::complex("Departure", "DepartureArrivalInfo");
        assert!(complex.is_complex());
        assert!(!complex.nullable);
    }

    #[test]
    fn test_lookup() {
        let segment = StructuralType::entity("FlightSegment")
            .with_property(EdmProperty::scalar("AircraftId"))
            .with_navigation(
                NavigationProperty::reference("Aircraft", "AircraftInfo", Multiplicity::One)
                    .with_foreign_key("AircraftId"),
            )
            .with_navigation(NavigationProperty::collection("Passengers", "Passenger"));

        assert!(segment.property("AircraftId").is_some());
        assert!(segment.property("Aircraft").is_none());
        assert!(segment.navigation("Passengers").unwrap().is_collection());
        assert!(!segment.navigation("Aircraft").unwrap().is_collection());
        assert!(segment.is_foreign_key("AircraftId"));
        assert!(!segment.is_foreign_key("Aircraft"));
    }
}
