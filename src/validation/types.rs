use std::{fmt, sync::Arc};

use crate::{
    entry::{MemberEntry, PropertyEntry},
    validation::{
        EntityValidationContext, EntityValidationResult, PropertyValidator, ValidationError,
        Validator,
    },
    Result,
};

/// Property validators and type-level validators of one type
#[derive(Clone)]
struct TypeValidator {
    property_validators: Vec<PropertyValidator>,
    type_level_validators: Vec<Arc<dyn Validator>>,
}

impl TypeValidator {
    fn property_validator(&self, name: &str) -> Option<&PropertyValidator> {
        self.property_validators
            .iter()
            .find(|validator| validator.property_name() == name)
    }

    /// Type-level validation only runs once every property is valid
    fn validate_type_level(
        &self,
        context: &EntityValidationContext,
        member: Option<&MemberEntry>,
        errors: &mut Vec<ValidationError>,
    ) -> Result<()> {
        if !errors.is_empty() {
            return Ok(());
        }

        for validator in &self.type_level_validators {
            errors.extend(validator.validate(context, member)?);
        }
        Ok(())
    }
}

impl fmt::Debug for TypeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeValidator")
            .field("property_validators", &self.property_validators)
            .field("type_level_validators", &self.type_level_validators.len())
            .finish()
    }
}

/// Root of a validator tree: validates a whole entity
#[derive(Debug, Clone)]
pub struct EntityValidator {
    inner: TypeValidator,
}

impl EntityValidator {
    /// Create a validator from its parts
    #[must_use]
    pub fn new(
        property_validators: Vec<PropertyValidator>,
        type_level_validators: Vec<Arc<dyn Validator>>,
    ) -> Self {
        EntityValidator {
            inner: TypeValidator {
                property_validators,
                type_level_validators,
            },
        }
    }

    /// Validators of the entity properties, in reflection order
    #[must_use]
    pub fn property_validators(&self) -> &[PropertyValidator] {
        &self.inner.property_validators
    }

    /// Validators of the entity as a whole
    #[must_use]
    pub fn type_level_validators(&self) -> &[Arc<dyn Validator>] {
        &self.inner.type_level_validators
    }

    /// The validator of a top-level property
    #[must_use]
    pub fn property_validator(&self, name: &str) -> Option<&PropertyValidator> {
        self.inner.property_validator(name)
    }

    /// Validates the entity of `context`
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedValidation`] if user validation code fails, or a path
    /// error if the model no longer matches the validator.
    pub fn validate(&self, context: &EntityValidationContext) -> Result<EntityValidationResult> {
        let mut errors = Vec::new();
        for validator in &self.inner.property_validators {
            let member = context.entry().member(validator.property_name())?;
            errors.extend(validator.validate(context, &member)?);
        }

        self.inner.validate_type_level(context, None, &mut errors)?;

        Ok(EntityValidationResult::new(context.entry().clone(), errors))
    }
}

/// Validates the properties nested in a complex object
#[derive(Debug, Clone)]
pub struct ComplexTypeValidator {
    inner: TypeValidator,
}

impl ComplexTypeValidator {
    /// Create a validator from its parts
    #[must_use]
    pub fn new(
        property_validators: Vec<PropertyValidator>,
        type_level_validators: Vec<Arc<dyn Validator>>,
    ) -> Self {
        ComplexTypeValidator {
            inner: TypeValidator {
                property_validators,
                type_level_validators,
            },
        }
    }

    /// Validators of the nested properties, in reflection order
    #[must_use]
    pub fn property_validators(&self) -> &[PropertyValidator] {
        &self.inner.property_validators
    }

    /// Validators of the complex object as a whole
    #[must_use]
    pub fn type_level_validators(&self) -> &[Arc<dyn Validator>] {
        &self.inner.type_level_validators
    }

    /// The validator of a nested property
    #[must_use]
    pub fn property_validator(&self, name: &str) -> Option<&PropertyValidator> {
        self.inner.property_validator(name)
    }

    /// Validates the complex object held by `property`
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedValidation`] if user validation code fails, or a path
    /// error if the model no longer matches the validator.
    pub fn validate(
        &self,
        context: &EntityValidationContext,
        property: &PropertyEntry,
    ) -> Result<Vec<ValidationError>> {
        let mut errors = Vec::new();
        for validator in &self.inner.property_validators {
            let nested = MemberEntry::Property(property.property(validator.property_name())?);
            errors.extend(validator.validate(context, &nested)?);
        }

        let member = MemberEntry::Property(property.clone());
        self.inner
            .validate_type_level(context, Some(&member), &mut errors)?;

        Ok(errors)
    }
}
