use std::sync::Arc;

use log::warn;

use crate::{
    entry::MemberEntry,
    metadata::{
        customattributes::DisplayAttribute,
        instance::{InstanceRc, Value},
    },
    validation::{
        attribute::validated_value, result::split_validation_results, EntityValidationContext,
        ValidationContext, ValidationError, ValidationFailure, Validator,
    },
    BoxError, Result,
};

/// Self-validation logic of a type, run against each instance of the type
///
/// Closures with the matching signature implement this trait.
pub trait ValidatableObject: Send + Sync {
    /// Validates `instance`, returning every failure found
    ///
    /// # Errors
    /// Any error is reported as [`crate::Error::UnexpectedValidation`].
    fn validate(
        &self,
        instance: &InstanceRc,
        context: &ValidationContext,
    ) -> std::result::Result<Vec<ValidationFailure>, BoxError>;
}

impl<F> ValidatableObject for F
where
    F: Fn(&InstanceRc, &ValidationContext) -> std::result::Result<Vec<ValidationFailure>, BoxError>
        + Send
        + Sync,
{
    fn validate(
        &self,
        instance: &InstanceRc,
        context: &ValidationContext,
    ) -> std::result::Result<Vec<ValidationFailure>, BoxError> {
        self(instance, context)
    }
}

/// Runs the self-validation logic of an entity or complex type
#[derive(Clone)]
pub struct ValidatableObjectValidator {
    validatable: Arc<dyn ValidatableObject>,
    display: Option<DisplayAttribute>,
}

impl ValidatableObjectValidator {
    /// Wrap `validatable`; `display` provides the display name passed to it
    #[must_use]
    pub fn new(validatable: Arc<dyn ValidatableObject>, display: Option<DisplayAttribute>) -> Self {
        ValidatableObjectValidator {
            validatable,
            display,
        }
    }
}

impl std::fmt::Debug for ValidatableObjectValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatableObjectValidator")
            .field("display", &self.display)
            .finish_non_exhaustive()
    }
}

impl Validator for ValidatableObjectValidator {
    fn validate(
        &self,
        context: &EntityValidationContext,
        member: Option<&MemberEntry>,
    ) -> Result<Vec<ValidationError>> {
        // Null complex objects have nothing to validate
        let Value::Object(instance) = validated_value(context, member) else {
            return Ok(Vec::new());
        };

        let validation_context = context.validation_context(member, self.display.as_ref());
        let failures = self
            .validatable
            .validate(&instance, &validation_context)
            .map_err(|source| {
                warn!(
                    "{}.Validate failed on '{}': {source}",
                    instance.type_name(),
                    validation_context.display_name
                );
                unexpected_validation!(validatable
                    validation_context.display_name,
                    instance.type_name(),
                    source
                )
            })?;

        Ok(split_validation_results(
            validation_context.member_name.as_deref(),
            failures,
        ))
    }
}
