use std::{fmt, sync::Arc};

use crate::{
    entry::MemberEntry,
    validation::{ComplexTypeValidator, EntityValidationContext, ValidationError, Validator},
    Result,
};

/// Validates one property of an entity or complex type
#[derive(Clone)]
pub enum PropertyValidator {
    /// A scalar, navigation or CLR-only property
    Scalar {
        /// The validated property
        property_name: String,
        /// Attribute and facet validators of the property
        attribute_validators: Vec<Arc<dyn Validator>>,
    },
    /// A complex property, with the validator of its complex type
    Complex {
        /// The validated property
        property_name: String,
        /// Attribute validators of the property
        attribute_validators: Vec<Arc<dyn Validator>>,
        /// Validator of the properties nested in the complex object, if any need validation
        complex_type_validator: Option<Arc<ComplexTypeValidator>>,
    },
}

impl PropertyValidator {
    /// The name of the validated property
    #[must_use]
    pub fn property_name(&self) -> &str {
        match self {
            PropertyValidator::Scalar { property_name, .. }
            | PropertyValidator::Complex { property_name, .. } => property_name,
        }
    }

    /// The validators run against the property value
    #[must_use]
    pub fn attribute_validators(&self) -> &[Arc<dyn Validator>] {
        match self {
            PropertyValidator::Scalar {
                attribute_validators,
                ..
            }
            | PropertyValidator::Complex {
                attribute_validators,
                ..
            } => attribute_validators,
        }
    }

    /// The nested validator of a complex property
    #[must_use]
    pub fn complex_type_validator(&self) -> Option<&Arc<ComplexTypeValidator>> {
        match self {
            PropertyValidator::Complex {
                complex_type_validator,
                ..
            } => complex_type_validator.as_ref(),
            PropertyValidator::Scalar { .. } => None,
        }
    }

    /// Validates the property reached through `member`.
    ///
    /// The nested complex type is only validated when the property's own validators pass and
    /// the complex object is not null.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedValidation`] if user validation code fails, or a path
    /// error if the model no longer matches the validator.
    pub fn validate(
        &self,
        context: &EntityValidationContext,
        member: &MemberEntry,
    ) -> Result<Vec<ValidationError>> {
        let mut errors = Vec::new();
        for validator in self.attribute_validators() {
            errors.extend(validator.validate(context, Some(member))?);
        }

        if let (Some(nested), Some(property)) = (self.complex_type_validator(), member.as_property())
        {
            if errors.is_empty() && !property.current_value().is_null() {
                errors.extend(nested.validate(context, property)?);
            }
        }

        Ok(errors)
    }
}

impl fmt::Debug for PropertyValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = match self {
            PropertyValidator::Scalar { .. } => f.debug_struct("Scalar"),
            PropertyValidator::Complex { .. } => f.debug_struct("Complex"),
        };
        debug
            .field("property_name", &self.property_name())
            .field("attribute_validators", &self.attribute_validators().len());
        if let Some(nested) = self.complex_type_validator() {
            debug.field("complex_type_validator", nested);
        }
        debug.finish()
    }
}
