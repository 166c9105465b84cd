//! Construction of validator trees.
//!
//! The [`EntityValidatorBuilder`] reflects over the CLR descriptor of a type, pairs each public
//! instance property with its model metadata and builds one [`PropertyValidator`] per property
//! that needs validation:
//!
//! - **Model scalar properties** get their attribute validators plus validators inferred from
//!   facets (non-nullable, fixed maximum length), unless an equivalent attribute is declared or
//!   the property holds a foreign key
//! - **Complex properties** get their attribute validators and a nested
//!   [`ComplexTypeValidator`] built for the complex type
//! - **Navigation properties** get their attribute validators, plus a required check for
//!   references whose target multiplicity is exactly one
//! - **CLR-only properties** get their attribute validators
//!
//! Type-level attributes and self-validation logic become type-level validators. Types needing
//! no validation at all produce no validator.

use std::sync::Arc;

use log::debug;

use crate::{
    entry::EntityEntry,
    metadata::{
        customattributes::{AttributeList, ValidationAttribute, ValidationRule},
        model::{
            EdmProperty, MetadataProvider, Multiplicity, NavigationProperty,
            StoreGeneratedPattern, StructuralType,
        },
        typesystem::{ClrProperty, TypeDescriptor},
    },
    validation::{
        ComplexTypeValidator, EntityValidator, PropertyValidator, ValidatableObjectValidator,
        ValidationAttributeValidator, ValidationConfig, Validator,
    },
    Error::RecursionLimit,
    Result,
};

/// Builds validator trees from CLR descriptors, model metadata and attributes
#[derive(Debug, Clone, Default)]
pub struct EntityValidatorBuilder {
    config: ValidationConfig,
}

impl EntityValidatorBuilder {
    /// Create a builder with the given configuration
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        EntityValidatorBuilder { config }
    }

    /// The configuration of the builder
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Builds the validator for the entity type of `entry`, `None` if it needs no validation
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if a complex type of the entity is not described,
    /// and [`crate::Error::RecursionLimit`] if complex types nest too deeply.
    pub fn build_entity_validator(&self, entry: &EntityEntry) -> Result<Option<EntityValidator>> {
        if self.config.is_disabled() {
            return Ok(None);
        }

        let (property_validators, type_level_validators) = self.build_type_validator(
            entry.model().as_ref(),
            entry.clr_type(),
            entry.structural_type(),
            0,
        )?;

        if property_validators.is_empty() && type_level_validators.is_empty() {
            debug!("{} needs no validation", entry.entity_type());
            return Ok(None);
        }

        debug!(
            "Built validator for {} - {} property validators, {} type-level validators",
            entry.entity_type(),
            property_validators.len(),
            type_level_validators.len()
        );
        Ok(Some(EntityValidator::new(
            property_validators,
            type_level_validators,
        )))
    }

    /// Builds the validator of a complex type, `None` if it needs no validation
    ///
    /// ## Arguments
    /// * 'model'        - Metadata describing the complex type
    /// * 'complex_type' - Name of the complex type
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the type is not described, and
    /// [`crate::Error::RecursionLimit`] if complex types nest too deeply.
    pub fn build_complex_type_validator(
        &self,
        model: &dyn MetadataProvider,
        complex_type: &str,
    ) -> Result<Option<ComplexTypeValidator>> {
        if self.config.is_disabled() {
            return Ok(None);
        }

        self.build_complex_type_validator_at(model, complex_type, 1)
    }

    fn build_complex_type_validator_at(
        &self,
        model: &dyn MetadataProvider,
        complex_type: &str,
        depth: usize,
    ) -> Result<Option<ComplexTypeValidator>> {
        if depth > self.config.max_complex_depth {
            return Err(RecursionLimit(self.config.max_complex_depth));
        }

        let descriptor = model.require_clr_type(complex_type)?;
        let structural_type = model.require_structural_type(complex_type)?;

        let (property_validators, type_level_validators) =
            self.build_type_validator(model, &descriptor, &structural_type, depth)?;

        if property_validators.is_empty() && type_level_validators.is_empty() {
            return Ok(None);
        }

        Ok(Some(ComplexTypeValidator::new(
            property_validators,
            type_level_validators,
        )))
    }

    fn build_type_validator(
        &self,
        model: &dyn MetadataProvider,
        descriptor: &TypeDescriptor,
        structural_type: &StructuralType,
        depth: usize,
    ) -> Result<(Vec<PropertyValidator>, Vec<Arc<dyn Validator>>)> {
        let properties: Vec<&ClrProperty> = Self::public_instance_properties(descriptor).collect();
        let property_validators =
            self.build_validators_for_properties(model, &properties, structural_type, depth)?;

        let mut type_level_validators = Vec::new();
        if self.config.enable_type_level_validation {
            let display = descriptor
                .attributes
                .iter()
                .find_map(|attribute| attribute.as_display())
                .cloned();

            type_level_validators = Self::attribute_validators(&descriptor.attributes);
            if let Some(validatable) = &descriptor.validatable {
                type_level_validators.push(Arc::new(ValidatableObjectValidator::new(
                    validatable.clone(),
                    display,
                )));
            }
        }

        Ok((property_validators, type_level_validators))
    }

    /// The properties taking part in validation: public, non-static, non-indexer properties
    /// with a getter and a setter, in reflection order
    pub fn public_instance_properties(
        descriptor: &TypeDescriptor,
    ) -> impl Iterator<Item = &ClrProperty> {
        descriptor
            .properties
            .iter()
            .filter(|property| property.is_public_instance_read_write())
    }

    /// Builds a validator for each property that needs one, in the order given
    ///
    /// ## Arguments
    /// * 'model'           - Metadata used to resolve complex types
    /// * 'properties'      - The CLR properties of the type
    /// * 'structural_type' - Model metadata of the type
    /// * 'depth'           - Nesting depth of the type
    ///
    /// # Errors
    /// Returns an error if a nested complex type validator cannot be built.
    pub fn build_validators_for_properties(
        &self,
        model: &dyn MetadataProvider,
        properties: &[&ClrProperty],
        structural_type: &StructuralType,
        depth: usize,
    ) -> Result<Vec<PropertyValidator>> {
        let mut validators = Vec::new();

        for property in properties {
            let validator = if let Some(edm_property) = structural_type.property(&property.name) {
                let build_facet_validators = !structural_type.is_foreign_key(&property.name);
                self.build_property_validator(
                    model,
                    property,
                    edm_property,
                    build_facet_validators,
                    depth,
                )?
            } else if let Some(navigation) = structural_type.navigation(&property.name) {
                self.build_navigation_property_validator(property, navigation)
            } else {
                self.build_transient_property_validator(property)
            };

            validators.extend(validator);
        }

        Ok(validators)
    }

    /// Builds the validator of a model property, `None` if it needs no validation
    ///
    /// ## Arguments
    /// * 'model'                  - Metadata used to resolve complex types
    /// * 'clr_property'           - The CLR property
    /// * 'edm_property'           - The model metadata of the property
    /// * 'build_facet_validators' - Whether facet validators are inferred for scalar properties
    /// * 'depth'                  - Nesting depth of the declaring type
    ///
    /// # Errors
    /// Returns an error if the nested complex type validator cannot be built.
    pub fn build_property_validator(
        &self,
        model: &dyn MetadataProvider,
        clr_property: &ClrProperty,
        edm_property: &EdmProperty,
        build_facet_validators: bool,
        depth: usize,
    ) -> Result<Option<PropertyValidator>> {
        let mut validators = self.build_validation_attribute_validators(&clr_property.attributes);

        if let Some(complex_type) = &edm_property.complex_type {
            let complex_type_validator = self
                .build_complex_type_validator_at(model, complex_type, depth + 1)?
                .map(Arc::new);

            if validators.is_empty() && complex_type_validator.is_none() {
                return Ok(None);
            }

            return Ok(Some(PropertyValidator::Complex {
                property_name: clr_property.name.clone(),
                attribute_validators: validators,
                complex_type_validator,
            }));
        }

        if build_facet_validators {
            validators.extend(self.build_facet_validators(clr_property, edm_property));
        }

        Ok((!validators.is_empty()).then(|| PropertyValidator::Scalar {
            property_name: clr_property.name.clone(),
            attribute_validators: validators,
        }))
    }

    /// Builds the validator of a property that is not part of the model, `None` if it declares no
    /// validation attributes
    #[must_use]
    pub fn build_transient_property_validator(
        &self,
        clr_property: &ClrProperty,
    ) -> Option<PropertyValidator> {
        let validators = self.build_validation_attribute_validators(&clr_property.attributes);

        (!validators.is_empty()).then(|| PropertyValidator::Scalar {
            property_name: clr_property.name.clone(),
            attribute_validators: validators,
        })
    }

    fn build_navigation_property_validator(
        &self,
        clr_property: &ClrProperty,
        navigation: &NavigationProperty,
    ) -> Option<PropertyValidator> {
        let mut validators = self.build_validation_attribute_validators(&clr_property.attributes);

        if self.config.enable_facet_validation
            && navigation.multiplicity == Multiplicity::One
            && !self.declares(&clr_property.attributes, ValidationAttribute::is_required)
        {
            validators.push(Arc::new(ValidationAttributeValidator::new(
                ValidationAttribute::required(),
                None,
            )));
        }

        (!validators.is_empty()).then(|| PropertyValidator::Scalar {
            property_name: clr_property.name.clone(),
            attribute_validators: validators,
        })
    }

    /// Wraps each validation attribute in `attributes` into a validator; other attributes are
    /// ignored. The display attribute among them provides the display name.
    #[must_use]
    pub fn build_validation_attribute_validators(
        &self,
        attributes: &AttributeList,
    ) -> Vec<Arc<dyn Validator>> {
        if !self.config.enable_attribute_validation {
            return Vec::new();
        }

        Self::attribute_validators(attributes)
    }

    fn attribute_validators(attributes: &AttributeList) -> Vec<Arc<dyn Validator>> {
        let display = attributes
            .iter()
            .find_map(|attribute| attribute.as_display())
            .cloned();

        attributes
            .iter()
            .filter_map(|attribute| attribute.as_validation())
            .map(|attribute| -> Arc<dyn Validator> {
                Arc::new(ValidationAttributeValidator::new(
                    attribute.clone(),
                    display.clone(),
                ))
            })
            .collect()
    }

    /// Infers validators from the facets of a scalar model property.
    ///
    /// A required validator accepting empty strings is inferred for non-nullable properties,
    /// unless the store generates the value, the CLR type cannot hold null, or a `Required`
    /// attribute is declared. A maximum length validator is inferred from a fixed maximum length
    /// facet, unless a `MaxLength` or `StringLength` attribute is declared.
    #[must_use]
    pub fn build_facet_validators(
        &self,
        clr_property: &ClrProperty,
        edm_property: &EdmProperty,
    ) -> Vec<Arc<dyn Validator>> {
        if !self.config.enable_facet_validation {
            return Vec::new();
        }

        let mut facet_attributes = Vec::new();

        let is_required = !edm_property.nullable
            && edm_property.store_generated == StoreGeneratedPattern::None
            && !clr_property.property_type.is_non_nullable_value_type()
            && !self.declares(&clr_property.attributes, ValidationAttribute::is_required);
        if is_required {
            facet_attributes.push(ValidationAttribute::new(ValidationRule::Required {
                allow_empty_strings: true,
            }));
        }

        if let Some(max_length) = edm_property.max_length {
            if !edm_property.is_max_length
                && !self.declares(&clr_property.attributes, ValidationAttribute::is_length_bound)
            {
                facet_attributes.push(ValidationAttribute::max_length(Some(max_length)));
            }
        }

        facet_attributes
            .into_iter()
            .map(|attribute| -> Arc<dyn Validator> {
                Arc::new(ValidationAttributeValidator::new(attribute, None))
            })
            .collect()
    }

    /// Returns `true` if a validated attribute matching `predicate` is declared
    fn declares(
        &self,
        attributes: &AttributeList,
        predicate: fn(&ValidationAttribute) -> bool,
    ) -> bool {
        self.config.enable_attribute_validation
            && attributes
                .iter()
                .filter_map(|attribute| attribute.as_validation())
                .any(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::{
            customattributes::{Attribute, DisplayAttribute},
            instance::InstanceRc,
            typesystem::{ClrType, PrimitiveKind, PropertyFlags, TypeBuilder},
        },
        test::{airport_details_type, flight_model, flight_segment_entry, flight_segment_type},
        validation::{ValidationContext, ValidationFailure},
        BoxError, Error,
    };

    fn builder() -> EntityValidatorBuilder {
        EntityValidatorBuilder::new(ValidationConfig::default())
    }

    fn no_failures(
        _: &InstanceRc,
        _: &ValidationContext,
    ) -> std::result::Result<Vec<ValidationFailure>, BoxError> {
        Ok(Vec::new())
    }

    fn segment_with(flight_number: EdmProperty) -> StructuralType {
        StructuralType::entity("FlightSegment")
            .with_property(flight_number)
            .with_property(EdmProperty::complex("Departure", "DepartureArrivalInfo"))
    }

    #[test]
    fn test_no_validation_needed() {
        let entry = flight_segment_entry(&flight_model());
        assert!(builder().build_entity_validator(&entry).unwrap().is_none());

        let model = flight_model();
        assert!(builder()
            .build_complex_type_validator(model.as_ref(), "DepartureArrivalInfo")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_nested_complex_validators() {
        let model = flight_model();
        airport_details_type()
            .attribute_on("AirportCode", ValidationAttribute::regular_expression("^[A-Z]{3}$"))
            .register(model.types());
        let entry = flight_segment_entry(&model);

        let validator = builder().build_entity_validator(&entry).unwrap().unwrap();
        let names: Vec<_> = validator
            .property_validators()
            .iter()
            .map(PropertyValidator::property_name)
            .collect();
        assert_eq!(names, ["Departure", "Arrival"]);

        let departure = validator.property_validator("Departure").unwrap();
        assert!(departure.attribute_validators().is_empty());

        let airport = departure
            .complex_type_validator()
            .unwrap()
            .property_validator("Airport")
            .unwrap();
        let code = airport
            .complex_type_validator()
            .unwrap()
            .property_validator("AirportCode")
            .unwrap();
        assert!(matches!(code, PropertyValidator::Scalar { .. }));
        assert_eq!(code.attribute_validators().len(), 1);
        assert!(validator.type_level_validators().is_empty());
    }

    #[test]
    fn test_facet_validators() {
        let property = ClrProperty::new("FlightNumber", ClrType::String);
        let facets = EdmProperty::scalar("FlightNumber").required().max_length(10);
        assert_eq!(builder().build_facet_validators(&property, &facets).len(), 2);

        let optional = EdmProperty::scalar("FlightNumber");
        assert!(builder().build_facet_validators(&property, &optional).is_empty());

        let unbounded = EdmProperty::scalar("FlightNumber").is_max_length();
        assert!(builder().build_facet_validators(&property, &unbounded).is_empty());

        let generated = EdmProperty::scalar("FlightNumber")
            .required()
            .store_generated(StoreGeneratedPattern::Computed);
        assert!(builder().build_facet_validators(&property, &generated).is_empty());

        let value_type = ClrProperty::new(
            "FlightSegmentId",
            ClrType::Primitive(PrimitiveKind::Int32),
        );
        let required = EdmProperty::scalar("FlightSegmentId").required();
        assert!(builder().build_facet_validators(&value_type, &required).is_empty());

        let nullable_value_type = ClrProperty::new(
            "AircraftId",
            ClrType::Nullable(PrimitiveKind::Int32),
        );
        assert_eq!(
            builder()
                .build_facet_validators(&nullable_value_type, &required)
                .len(),
            1
        );
    }

    #[test]
    fn test_facets_suppressed_by_attributes() {
        let facets = EdmProperty::scalar("FlightNumber").required().max_length(10);

        let mut property = ClrProperty::new("FlightNumber", ClrType::String);
        property.attributes.push(ValidationAttribute::required().into());
        assert_eq!(builder().build_facet_validators(&property, &facets).len(), 1);

        property.attributes.push(ValidationAttribute::max_length(None).into());
        assert!(builder().build_facet_validators(&property, &facets).is_empty());

        let mut property = ClrProperty::new("FlightNumber", ClrType::String);
        property.attributes.push(ValidationAttribute::string_length(20).into());
        assert_eq!(builder().build_facet_validators(&property, &facets).len(), 1);

        // Every facet validator plus every attribute validator
        let model = flight_model();
        model.add_structural_type(segment_with(facets));
        flight_segment_type()
            .attribute_on("FlightNumber", ValidationAttribute::string_length(20))
            .attribute_on("FlightNumber", ValidationAttribute::regular_expression("QF\\d+"))
            .register(model.types());
        let entry = flight_segment_entry(&model);

        let validator = builder().build_entity_validator(&entry).unwrap().unwrap();
        let flight_number = validator.property_validator("FlightNumber").unwrap();
        assert_eq!(flight_number.attribute_validators().len(), 3);
    }

    #[test]
    fn test_foreign_keys_get_no_facets() {
        let model = flight_model();
        model.add_structural_type(
            StructuralType::entity("FlightSegment")
                .with_property(EdmProperty::scalar("AircraftId").required())
                .with_navigation(
                    NavigationProperty::reference("Aircraft", "AircraftInfo", Multiplicity::One)
                        .with_foreign_key("AircraftId"),
                ),
        );
        let entry = flight_segment_entry(&model);

        let validator = builder().build_entity_validator(&entry).unwrap().unwrap();
        assert!(validator.property_validator("AircraftId").is_none());
        assert_eq!(
            validator
                .property_validator("Aircraft")
                .unwrap()
                .attribute_validators()
                .len(),
            1
        );
    }

    #[test]
    fn test_transient_and_navigation_properties() {
        let model = flight_model();
        flight_segment_type()
            .attribute_on("Notes", ValidationAttribute::string_length(100))
            .attribute_on("Passengers", ValidationAttribute::min_length(1))
            .register(model.types());
        let entry = flight_segment_entry(&model);

        let validator = builder().build_entity_validator(&entry).unwrap().unwrap();
        assert!(validator.property_validator("Notes").is_some());
        assert!(validator.property_validator("Passengers").is_some());
        // Optional reference
        assert!(validator.property_validator("Aircraft").is_none());
    }

    #[test]
    fn test_type_level_validators() {
        let model = flight_model();
        flight_segment_type()
            .type_attribute(DisplayAttribute::named("Segment"))
            .type_attribute(ValidationAttribute::custom("FlightSegment", "Check", |_, _| Ok(None)))
            .validatable(Arc::new(no_failures))
            .register(model.types());
        let entry = flight_segment_entry(&model);

        let validator = builder().build_entity_validator(&entry).unwrap().unwrap();
        assert!(validator.property_validators().is_empty());
        assert_eq!(validator.type_level_validators().len(), 2);

        let minimal = EntityValidatorBuilder::new(ValidationConfig::minimal());
        assert!(minimal.build_entity_validator(&entry).unwrap().is_none());
    }

    #[test]
    fn test_public_instance_properties() {
        let descriptor = TypeBuilder::new("AircraftInfo")
            .property("Code", ClrType::String)
            .property("Display", ClrType::String)
            .flags(PropertyFlags::PUBLIC | PropertyFlags::CAN_READ)
            .property("Count", ClrType::String)
            .flags(PropertyFlags::default() | PropertyFlags::STATIC)
            .property("Item", ClrType::String)
            .flags(PropertyFlags::default() | PropertyFlags::INDEXER)
            .property("Secret", ClrType::String)
            .flags(PropertyFlags::CAN_READ | PropertyFlags::CAN_WRITE)
            .build();

        let names: Vec<_> = EntityValidatorBuilder::public_instance_properties(&descriptor)
            .map(|property| property.name.as_str())
            .collect();
        assert_eq!(names, ["Code"]);
    }

    #[test]
    fn test_non_validation_attributes_are_ignored() {
        let attributes: AttributeList = vec![
            Attribute::Other("KeyAttribute".to_string()),
            DisplayAttribute::named("Number").into(),
            ValidationAttribute::required().into(),
        ];
        assert_eq!(builder().build_validation_attribute_validators(&attributes).len(), 1);

        let disabled = EntityValidatorBuilder::new(ValidationConfig::disabled());
        assert!(disabled.build_validation_attribute_validators(&attributes).is_empty());
    }

    #[test]
    fn test_recursive_complex_types() {
        let model = flight_model();
        TypeBuilder::new("Node")
            .property("Child", ClrType::Class("Node".to_string()))
            .register(model.types());
        model.add_structural_type(
            StructuralType::complex("Node").with_property(EdmProperty::complex("Child", "Node")),
        );

        let strict = EntityValidatorBuilder::new(ValidationConfig::strict());
        assert!(matches!(
            strict.build_complex_type_validator(model.as_ref(), "Node"),
            Err(Error::RecursionLimit(8))
        ));
    }

    #[test]
    fn test_missing_complex_type() {
        let model = flight_model();
        model.add_structural_type(
            StructuralType::entity("FlightSegment")
                .with_property(EdmProperty::complex("Departure", "Missing")),
        );
        let entry = flight_segment_entry(&model);

        assert!(matches!(
            builder().build_entity_validator(&entry),
            Err(Error::TypeNotFound(name)) if name == "Missing"
        ));
    }

    #[test]
    fn test_disabled_builds_nothing() {
        let model = flight_model();
        airport_details_type()
            .attribute_on("AirportCode", ValidationAttribute::required())
            .register(model.types());
        let entry = flight_segment_entry(&model);

        let disabled = EntityValidatorBuilder::new(ValidationConfig::disabled());
        assert!(disabled.build_entity_validator(&entry).unwrap().is_none());
        assert!(disabled
            .build_complex_type_validator(model.as_ref(), "AirportDetails")
            .unwrap()
            .is_none());
        assert!(builder()
            .build_complex_type_validator(model.as_ref(), "AirportDetails")
            .unwrap()
            .is_some());
    }
}
