//! Annotation attribute types.
//!
//! This module contains the attribute values that can be declared on CLR properties and types:
//! validation attributes (the DataAnnotations family), display attributes, and any other
//! attribute the validator builder is expected to ignore.

use std::{fmt, sync::Arc};

use regex::Regex;
use strum::AsRefStr;

use crate::{
    metadata::instance::Value,
    validation::{ValidationContext, ValidationFailure},
    BoxError,
};

/// A vector that holds the attributes declared on a property or type
pub type AttributeList = Vec<Attribute>;

/// Signature of a user-supplied custom validation routine.
///
/// Returns `Ok(None)` on success, `Ok(Some(failure))` when the value is invalid, and `Err` when
/// the routine itself failed.
pub type CustomValidationFn = dyn Fn(&Value, &ValidationContext) -> std::result::Result<Option<ValidationFailure>, BoxError>
    + Send
    + Sync;

/// An attribute declared on a CLR property or type
#[derive(Debug, Clone)]
pub enum Attribute {
    /// A validation attribute that participates in validation
    Validation(ValidationAttribute),
    /// Display metadata, provides the display name used in error messages
    Display(DisplayAttribute),
    /// Any other attribute, identified by its type name
    Other(String),
}

impl Attribute {
    /// Returns the validation attribute, if this is one
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationAttribute> {
        match self {
            Attribute::Validation(attribute) => Some(attribute),
            _ => None,
        }
    }

    /// Returns the display attribute, if this is one
    #[must_use]
    pub fn as_display(&self) -> Option<&DisplayAttribute> {
        match self {
            Attribute::Display(attribute) => Some(attribute),
            _ => None,
        }
    }
}

impl From<ValidationAttribute> for Attribute {
    fn from(attribute: ValidationAttribute) -> Self {
        Attribute::Validation(attribute)
    }
}

impl From<DisplayAttribute> for Attribute {
    fn from(attribute: DisplayAttribute) -> Self {
        Attribute::Display(attribute)
    }
}

/// Display metadata for a property or type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayAttribute {
    /// The display name, if any
    pub name: Option<String>,
}

impl DisplayAttribute {
    /// Create a display attribute with the given name
    pub fn named(name: impl Into<String>) -> Self {
        DisplayAttribute {
            name: Some(name.into()),
        }
    }
}

/// A validation attribute: a rule plus an optional error message template.
///
/// Message templates use `{0}` for the display name and `{1}`/`{2}` for rule parameters.
#[derive(Debug, Clone)]
pub struct ValidationAttribute {
    /// The rule to apply
    pub rule: ValidationRule,
    /// Overrides the default error message of the rule
    pub error_message: Option<String>,
}

impl ValidationAttribute {
    /// Create an attribute for the given rule with the default message
    #[must_use]
    pub fn new(rule: ValidationRule) -> Self {
        ValidationAttribute {
            rule,
            error_message: None,
        }
    }

    /// A `Required` attribute rejecting null and empty strings
    #[must_use]
    pub fn required() -> Self {
        Self::new(ValidationRule::Required {
            allow_empty_strings: false,
        })
    }

    /// A `StringLength` attribute with the given maximum length
    #[must_use]
    pub fn string_length(maximum: usize) -> Self {
        Self::new(ValidationRule::StringLength {
            maximum,
            minimum: 0,
        })
    }

    /// A `MaxLength` attribute; `None` allows the maximum length the store supports
    #[must_use]
    pub fn max_length(length: Option<usize>) -> Self {
        Self::new(ValidationRule::MaxLength(length))
    }

    /// A `MinLength` attribute
    #[must_use]
    pub fn min_length(length: usize) -> Self {
        Self::new(ValidationRule::MinLength(length))
    }

    /// A `RegularExpression` attribute; the whole value has to match `pattern`
    #[must_use]
    pub fn regular_expression(pattern: &str) -> Self {
        Self::new(ValidationRule::RegularExpression(RegexRule::new(pattern)))
    }

    /// A `Range` attribute for numeric values
    #[must_use]
    pub fn range(minimum: f64, maximum: f64) -> Self {
        Self::new(ValidationRule::Range { minimum, maximum })
    }

    /// A `CustomValidation` attribute calling `method` on `validator_type`
    pub fn custom<F>(validator_type: &str, method: &str, func: F) -> Self
    where
        F: Fn(&Value, &ValidationContext) -> std::result::Result<Option<ValidationFailure>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(ValidationRule::CustomValidation(CustomValidation {
            validator_type: validator_type.to_string(),
            method: method.to_string(),
            func: Arc::new(func),
        }))
    }

    /// Replace the default error message
    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// The attribute type name, e.g. `StringLengthAttribute`
    #[must_use]
    pub fn type_name(&self) -> String {
        format!("{}Attribute", self.rule.as_ref())
    }

    /// Returns `true` for `Required` attributes
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self.rule, ValidationRule::Required { .. })
    }

    /// Returns `true` for attributes that already bound the length of a value
    #[must_use]
    pub fn is_length_bound(&self) -> bool {
        matches!(
            self.rule,
            ValidationRule::MaxLength(_) | ValidationRule::StringLength { .. }
        )
    }
}

/// The validation rules supported by [`ValidationAttribute`]
#[derive(Debug, Clone, AsRefStr)]
pub enum ValidationRule {
    /// The value must not be null (nor empty, unless allowed)
    Required {
        /// Accept empty and white space strings
        allow_empty_strings: bool,
    },
    /// String length bounds
    StringLength {
        /// Maximum number of characters
        maximum: usize,
        /// Minimum number of characters
        minimum: usize,
    },
    /// Maximum length of a string or array, `None` for the largest length allowed
    MaxLength(Option<usize>),
    /// Minimum length of a string or array
    MinLength(usize),
    /// The value must match a regular expression
    RegularExpression(RegexRule),
    /// Numeric range, inclusive on both ends
    Range {
        /// Smallest accepted value
        minimum: f64,
        /// Largest accepted value
        maximum: f64,
    },
    /// User-supplied validation routine
    CustomValidation(CustomValidation),
}

/// A regular expression rule, compiled once when the attribute is created.
///
/// An invalid pattern is kept so the failure surfaces when the attribute is evaluated.
#[derive(Debug, Clone)]
pub struct RegexRule {
    /// The pattern as declared
    pub pattern: String,
    /// The anchored, compiled pattern
    compiled: Option<Regex>,
}

impl RegexRule {
    /// Compile the pattern so that it has to match the whole value
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        RegexRule {
            pattern: pattern.to_string(),
            compiled: Regex::new(&format!("^(?:{pattern})$")).ok(),
        }
    }

    /// The compiled regex, `None` if the pattern is invalid
    #[must_use]
    pub fn regex(&self) -> Option<&Regex> {
        self.compiled.as_ref()
    }
}

/// A `CustomValidation` routine
#[derive(Clone)]
pub struct CustomValidation {
    /// The type declaring the routine
    pub validator_type: String,
    /// The routine name
    pub method: String,
    /// The routine itself
    pub func: Arc<CustomValidationFn>,
}

impl fmt::Debug for CustomValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidation")
            .field("validator_type", &self.validator_type)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}
