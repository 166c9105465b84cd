use log::warn;

use crate::{
    entry::MemberEntry,
    metadata::{
        customattributes::{DisplayAttribute, ValidationAttribute},
        instance::Value,
    },
    validation::{result::split_validation_results, EntityValidationContext, ValidationError},
    Result,
};

/// A leaf of the validator tree.
///
/// Validators are shared between threads once built and are never mutated.
pub trait Validator: Send + Sync {
    /// Validates `member`, or the entity itself when `member` is `None`
    ///
    /// ## Arguments
    /// * 'context' - The validation run
    /// * 'member'  - The validated member
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedValidation`] if user validation code fails.
    fn validate(
        &self,
        context: &EntityValidationContext,
        member: Option<&MemberEntry>,
    ) -> Result<Vec<ValidationError>>;
}

/// The value validated for `member`: its current value, or the entity itself
pub(crate) fn validated_value(
    context: &EntityValidationContext,
    member: Option<&MemberEntry>,
) -> Value {
    member.map_or_else(
        || Value::Object(context.entry().entity().clone()),
        MemberEntry::current_value,
    )
}

/// Runs a single validation attribute
#[derive(Debug, Clone)]
pub struct ValidationAttributeValidator {
    attribute: ValidationAttribute,
    display: Option<DisplayAttribute>,
}

impl ValidationAttributeValidator {
    /// Wrap `attribute`; `display` provides the display name used in messages
    #[must_use]
    pub fn new(attribute: ValidationAttribute, display: Option<DisplayAttribute>) -> Self {
        ValidationAttributeValidator { attribute, display }
    }

    /// The wrapped attribute
    #[must_use]
    pub fn attribute(&self) -> &ValidationAttribute {
        &self.attribute
    }
}

impl Validator for ValidationAttributeValidator {
    fn validate(
        &self,
        context: &EntityValidationContext,
        member: Option<&MemberEntry>,
    ) -> Result<Vec<ValidationError>> {
        let validation_context = context.validation_context(member, self.display.as_ref());
        let value = validated_value(context, member);

        match self.attribute.validation_result(&value, &validation_context) {
            Ok(None) => Ok(Vec::new()),
            Ok(Some(failure)) => Ok(split_validation_results(
                validation_context.member_name.as_deref(),
                [failure],
            )),
            Err(source) => {
                warn!(
                    "{} failed on '{}': {source}",
                    self.attribute.type_name(),
                    validation_context.display_name
                );
                Err(unexpected_validation!(attribute
                    validation_context.display_name,
                    self.attribute.type_name(),
                    source
                ))
            }
        }
    }
}
