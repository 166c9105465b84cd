use std::sync::Arc;

use crate::{
    entry::{
        CollectionEntry, EntityEntry, MemberEntry, NavigationEntryMetadata, PropertyEntry,
        PropertyEntryMetadata, ReferenceEntry,
    },
    metadata::typesystem::ClrType,
    path::{try_parse_path, ParsedPath, PathExpression},
    Error::{
        AmbiguousMember, ArgumentIsNullOrWhitespace, BadPropertyExpression, DottedPartNotComplex,
        DottedPathMustBeProperty, NotAComplexProperty, NotANavigationProperty, NotAProperty,
        NotAScalarProperty, UsedCollectionForReferenceProp, UsedReferenceForCollectionProp,
    },
    Result,
};

const PROPERTY_NAME: &str = "property_name";
const NAVIGATION_PROPERTY: &str = "navigation_property";

fn split_property_path<'a>(path: &'a str, parameter: &'static str) -> Result<Vec<&'a str>> {
    if path.trim().is_empty() {
        return Err(ArgumentIsNullOrWhitespace { parameter });
    }

    Ok(path.split('.').collect())
}

fn parse_property_selector(
    selector: &PathExpression,
    method: &'static str,
    entity_type: &str,
) -> Result<String> {
    match try_parse_path(selector.body()) {
        Some(ParsedPath::Path(path)) => Ok(path),
        _ => Err(BadPropertyExpression {
            method,
            entity_type: entity_type.to_string(),
        }),
    }
}

impl EntityEntry {
    /// Resolves a scalar or complex property, given by name or dotted path.
    ///
    /// Every segment except the last one has to be a complex property. CLR properties that are
    /// not part of the model resolve as unmapped properties.
    ///
    /// ## Arguments
    /// * 'property_name' - A property name, or a dotted path such as `Departure.Airport`
    ///
    /// # Errors
    /// - [`crate::Error::ArgumentIsNullOrWhitespace`] for empty or blank names
    /// - [`crate::Error::DottedPartNotComplex`] if a non-terminal segment is not complex
    /// - [`crate::Error::NotAScalarProperty`] if the last segment is not a property
    pub fn property(&self, property_name: &str) -> Result<PropertyEntry> {
        let segments = split_property_path(property_name, PROPERTY_NAME)?;
        self.resolve_property(None, property_name, &segments, false)
    }

    /// Resolves a complex property, given by name or dotted path.
    ///
    /// ## Arguments
    /// * 'property_name' - A property name, or a dotted path such as `Departure.Airport`
    ///
    /// # Errors
    /// As [`EntityEntry::property`], with [`crate::Error::NotAComplexProperty`] raised if the last
    /// segment is not a complex property.
    pub fn complex_property(&self, property_name: &str) -> Result<PropertyEntry> {
        let segments = split_property_path(property_name, PROPERTY_NAME)?;
        self.resolve_property(None, property_name, &segments, true)
    }

    /// Resolves any member: a navigation property by name, or a scalar or complex property by
    /// name or dotted path.
    ///
    /// ## Arguments
    /// * 'property_name' - A member name, or a dotted property path
    ///
    /// # Errors
    /// - [`crate::Error::ArgumentIsNullOrWhitespace`] for empty or blank names
    /// - [`crate::Error::NotAProperty`] if no member of that name exists
    /// - [`crate::Error::AmbiguousMember`] if the model maps the name as both a navigation and a
    ///   scalar or complex property
    /// - the errors of [`EntityEntry::property`] for dotted paths
    pub fn member(&self, property_name: &str) -> Result<MemberEntry> {
        let segments = split_property_path(property_name, PROPERTY_NAME)?;
        if segments.len() > 1 {
            return self
                .resolve_property(None, property_name, &segments, false)
                .map(MemberEntry::Property);
        }

        let navigation = self.navigation_metadata(property_name);
        let property = self.property_metadata(property_name, self.entity_type());

        match (navigation, property) {
            (Some(_), Some(_)) => Err(AmbiguousMember {
                property: property_name.to_string(),
                declaring_type: self.entity_type().to_string(),
            }),
            (Some(navigation), None) => Ok(if navigation.is_collection() {
                MemberEntry::Collection(CollectionEntry::new(self.clone(), navigation))
            } else {
                MemberEntry::Reference(ReferenceEntry::new(self.clone(), navigation))
            }),
            (None, Some(property)) => Ok(MemberEntry::Property(PropertyEntry::new(
                self.clone(),
                None,
                property,
            ))),
            (None, None) => Err(NotAProperty {
                property: property_name.to_string(),
                declaring_type: self.entity_type().to_string(),
            }),
        }
    }

    /// Resolves a reference navigation property.
    ///
    /// ## Arguments
    /// * 'navigation_property' - The navigation property name, dotted paths are rejected
    ///
    /// # Errors
    /// - [`crate::Error::ArgumentIsNullOrWhitespace`] for empty or blank names
    /// - [`crate::Error::DottedPathMustBeProperty`] for dotted paths
    /// - [`crate::Error::NotANavigationProperty`] if the name is not a navigation property
    /// - [`crate::Error::UsedReferenceForCollectionProp`] for collection navigation properties
    pub fn reference(&self, navigation_property: &str) -> Result<ReferenceEntry> {
        let metadata = self.validate_and_get_navigation_metadata(navigation_property, false)?;
        Ok(ReferenceEntry::new(self.clone(), metadata))
    }

    /// Resolves a collection navigation property.
    ///
    /// ## Arguments
    /// * 'navigation_property' - The navigation property name, dotted paths are rejected
    ///
    /// # Errors
    /// As [`EntityEntry::reference`], with [`crate::Error::UsedCollectionForReferenceProp`]
    /// raised for reference navigation properties.
    pub fn collection(&self, navigation_property: &str) -> Result<CollectionEntry> {
        let metadata = self.validate_and_get_navigation_metadata(navigation_property, true)?;
        Ok(CollectionEntry::new(self.clone(), metadata))
    }

    /// Resolves a scalar or complex property from an accessor expression
    ///
    /// # Errors
    /// Returns [`crate::Error::BadPropertyExpression`] if the expression is not a member chain,
    /// and the errors of [`EntityEntry::property`] otherwise.
    pub fn property_from_expression(&self, selector: &PathExpression) -> Result<PropertyEntry> {
        self.property(&parse_property_selector(selector, "Property", self.entity_type())?)
    }

    /// Resolves a complex property from an accessor expression
    ///
    /// # Errors
    /// Returns [`crate::Error::BadPropertyExpression`] if the expression is not a member chain,
    /// and the errors of [`EntityEntry::complex_property`] otherwise.
    pub fn complex_property_from_expression(
        &self,
        selector: &PathExpression,
    ) -> Result<PropertyEntry> {
        self.complex_property(&parse_property_selector(
            selector,
            "ComplexProperty",
            self.entity_type(),
        )?)
    }

    /// Resolves a reference navigation property from an accessor expression
    ///
    /// # Errors
    /// Returns [`crate::Error::BadPropertyExpression`] if the expression is not a member chain,
    /// and the errors of [`EntityEntry::reference`] otherwise.
    pub fn reference_from_expression(&self, selector: &PathExpression) -> Result<ReferenceEntry> {
        self.reference(&parse_property_selector(
            selector,
            "Reference",
            self.entity_type(),
        )?)
    }

    /// Resolves a collection navigation property from an accessor expression
    ///
    /// # Errors
    /// Returns [`crate::Error::BadPropertyExpression`] if the expression is not a member chain,
    /// and the errors of [`EntityEntry::collection`] otherwise.
    pub fn collection_from_expression(
        &self,
        selector: &PathExpression,
    ) -> Result<CollectionEntry> {
        self.collection(&parse_property_selector(
            selector,
            "Collection",
            self.entity_type(),
        )?)
    }

    /// Resolves `segments` one at a time, each segment looked up on the complex type of the
    /// previous one.
    pub(crate) fn resolve_property(
        &self,
        parent: Option<Arc<PropertyEntry>>,
        path: &str,
        segments: &[&str],
        require_complex: bool,
    ) -> Result<PropertyEntry> {
        let is_dotted = segments.len() > 1;
        let segment = segments[0];
        let declaring_type = match &parent {
            Some(parent) => parent
                .metadata()
                .element_type()
                .class_name()
                .unwrap_or_default()
                .to_string(),
            None => self.entity_type().to_string(),
        };

        let metadata = match self.property_metadata(segment, &declaring_type) {
            Some(metadata) if metadata.is_complex() || !(is_dotted || require_complex) => {
                metadata
            }
            _ if is_dotted => {
                return Err(DottedPartNotComplex {
                    property: segment.to_string(),
                    path: path.to_string(),
                    declaring_type,
                })
            }
            _ if require_complex => {
                return Err(NotAComplexProperty {
                    property: segment.to_string(),
                    declaring_type,
                })
            }
            _ => {
                return Err(NotAScalarProperty {
                    property: segment.to_string(),
                    declaring_type,
                })
            }
        };

        let entry = PropertyEntry::new(self.clone(), parent, metadata);
        if is_dotted {
            self.resolve_property(Some(Arc::new(entry)), path, &segments[1..], require_complex)
        } else {
            Ok(entry)
        }
    }

    /// Metadata of a scalar or complex property of `declaring_type`.
    ///
    /// Mapped properties come from the model; CLR properties missing from the model resolve as
    /// unmapped scalar properties. Navigation properties and unknown names yield `None`.
    pub(crate) fn property_metadata(
        &self,
        name: &str,
        declaring_type: &str,
    ) -> Option<PropertyEntryMetadata> {
        let model = self.model();
        let structural_type = model.structural_type(declaring_type);
        let clr_property_type = model
            .clr_type(declaring_type)
            .and_then(|descriptor| descriptor.property(name).map(|p| p.property_type.clone()));

        if let Some(edm_property) = structural_type.as_ref().and_then(|t| t.property(name)) {
            let element_type = match &edm_property.complex_type {
                Some(complex_type) => ClrType::Class(complex_type.clone()),
                None => clr_property_type
                    .unwrap_or_else(|| ClrType::Class("System.Object".to_string())),
            };

            return Some(PropertyEntryMetadata::new(
                declaring_type,
                element_type,
                name,
                true,
                edm_property.is_complex(),
            ));
        }

        if structural_type
            .as_ref()
            .is_some_and(|t| t.navigation(name).is_some())
        {
            return None;
        }

        clr_property_type.map(|element_type| {
            PropertyEntryMetadata::new(declaring_type, element_type, name, false, false)
        })
    }

    /// Metadata of a navigation property of the entity type, `None` if there is no such
    /// navigation property
    pub(crate) fn navigation_metadata(&self, name: &str) -> Option<NavigationEntryMetadata> {
        self.structural_type().navigation(name).map(|navigation| {
            NavigationEntryMetadata::new(
                self.entity_type(),
                navigation.target_type.clone(),
                name,
                navigation.is_collection(),
            )
        })
    }

    fn validate_and_get_navigation_metadata(
        &self,
        navigation_property: &str,
        require_collection: bool,
    ) -> Result<NavigationEntryMetadata> {
        let segments = split_property_path(navigation_property, NAVIGATION_PROPERTY)?;
        if segments.len() > 1 {
            return Err(DottedPathMustBeProperty {
                path: navigation_property.to_string(),
            });
        }

        let metadata =
            self.navigation_metadata(navigation_property)
                .ok_or_else(|| NotANavigationProperty {
                    property: navigation_property.to_string(),
                    declaring_type: self.entity_type().to_string(),
                })?;

        match (metadata.is_collection(), require_collection) {
            (true, false) => Err(UsedReferenceForCollectionProp {
                property: navigation_property.to_string(),
                declaring_type: self.entity_type().to_string(),
            }),
            (false, true) => Err(UsedCollectionForReferenceProp {
                property: navigation_property.to_string(),
                declaring_type: self.entity_type().to_string(),
            }),
            _ => Ok(metadata),
        }
    }
}

impl PropertyEntry {
    /// Resolves a property nested inside this complex property
    ///
    /// ## Arguments
    /// * 'property_name' - A property name or dotted path, relative to this property
    ///
    /// # Errors
    /// Returns [`crate::Error::NotAComplexProperty`] if this property is not complex, and the
    /// errors of [`EntityEntry::property`] otherwise.
    pub fn property(&self, property_name: &str) -> Result<PropertyEntry> {
        self.resolve_nested(property_name, false)
    }

    /// Resolves a complex property nested inside this complex property
    ///
    /// ## Arguments
    /// * 'property_name' - A property name or dotted path, relative to this property
    ///
    /// # Errors
    /// Returns [`crate::Error::NotAComplexProperty`] if this property is not complex, and the
    /// errors of [`EntityEntry::complex_property`] otherwise.
    pub fn complex_property(&self, property_name: &str) -> Result<PropertyEntry> {
        self.resolve_nested(property_name, true)
    }

    fn resolve_nested(&self, property_name: &str, require_complex: bool) -> Result<PropertyEntry> {
        let segments = split_property_path(property_name, PROPERTY_NAME)?;
        if !self.is_complex() {
            return Err(NotAComplexProperty {
                property: self.name().to_string(),
                declaring_type: self.metadata().declaring_type().to_string(),
            });
        }

        self.entity_entry().resolve_property(
            Some(Arc::new(self.clone())),
            property_name,
            &segments,
            require_complex,
        )
    }
}
