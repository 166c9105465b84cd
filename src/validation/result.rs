use std::fmt;

use crate::{entry::EntityEntry, validation::ValidationFailure};

/// A validation error attributed to a property path, or to the whole entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the invalid property, `None` for entity-level errors
    pub property_name: Option<String>,
    /// The error message
    pub message: String,
}

impl ValidationError {
    /// Create an error for the given property path
    pub fn new(property_name: Option<String>, message: impl Into<String>) -> Self {
        ValidationError {
            property_name,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property_name {
            Some(property) => write!(f, "{property}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Turns failures into errors: one error per member a failure names, or a single error for
/// `property_name` when it names none.
pub(crate) fn split_validation_results(
    property_name: Option<&str>,
    failures: impl IntoIterator<Item = ValidationFailure>,
) -> Vec<ValidationError> {
    failures
        .into_iter()
        .flat_map(|failure| {
            let ValidationFailure {
                message,
                member_names,
            } = failure;

            if member_names.is_empty() {
                vec![ValidationError::new(property_name.map(str::to_string), message)]
            } else {
                member_names
                    .into_iter()
                    .map(|member| ValidationError::new(Some(member), message.clone()))
                    .collect()
            }
        })
        .collect()
}

/// The outcome of validating one entity
#[derive(Debug, Clone)]
pub struct EntityValidationResult {
    entry: EntityEntry,
    errors: Vec<ValidationError>,
}

impl EntityValidationResult {
    /// Create a result for `entry`
    #[must_use]
    pub fn new(entry: EntityEntry, errors: Vec<ValidationError>) -> Self {
        EntityValidationResult { entry, errors }
    }

    /// The validated entry
    #[must_use]
    pub fn entry(&self) -> &EntityEntry {
        &self.entry
    }

    /// The errors found, in validation order
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns `true` if no errors were found
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
