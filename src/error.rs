use thiserror::Error;

/// Boxed error returned by user-supplied validation code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

macro_rules! unexpected_validation {
    // Validation attribute version
    (attribute $display:expr, $attribute:expr, $source:expr) => {
        crate::Error::UnexpectedValidation {
            message: format!(
                "An unexpected exception was thrown during validation of '{}' when invoking {}.IsValid. See the inner exception for details.",
                $display, $attribute
            ),
            source: $source,
        }
    };

    // Self-validating object version
    (validatable $display:expr, $type_name:expr, $source:expr) => {
        crate::Error::UnexpectedValidation {
            message: format!(
                "An unexpected exception was thrown during validation of '{}' when invoking {}.Validate. See the inner exception for details.",
                $display, $type_name
            ),
            source: $source,
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Two families of errors exist:
///
/// ## Path and argument errors
/// Raised by the path resolver when a property name or path does not fit the shape of the
/// model metadata. They are always detectable from metadata alone and never depend on
/// property values.
/// - [`Error::ArgumentIsNullOrWhitespace`]
/// - [`Error::DottedPartNotComplex`]
/// - [`Error::NotAScalarProperty`], [`Error::NotAComplexProperty`]
/// - [`Error::DottedPathMustBeProperty`], [`Error::NotANavigationProperty`]
/// - [`Error::UsedCollectionForReferenceProp`], [`Error::UsedReferenceForCollectionProp`]
/// - [`Error::NotAProperty`], [`Error::AmbiguousMember`], [`Error::BadPropertyExpression`]
///
/// ## Validation failures
/// Ordinary validation errors are *data* (see
/// [`crate::validation::EntityValidationResult`]). The only exceptional path is
/// [`Error::UnexpectedValidation`], produced when user-supplied validation code fails.
///
/// # Examples
///
/// ```rust
/// use entityscope::Error;
///
/// fn describe(err: &Error) -> &'static str {
///     match err {
///         Error::UnexpectedValidation { .. } => "validator failed",
///         Error::DottedPartNotComplex { .. } => "bad path",
///         _ => "other",
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Argument Errors
    /// A required string argument was empty or only contained white space.
    #[error("The argument '{parameter}' cannot be null, empty or contain only white space.")]
    ArgumentIsNullOrWhitespace {
        /// Name of the offending parameter
        parameter: &'static str,
    },

    /// A non-terminal segment of a dotted path is not a complex property.
    #[error("The property '{property}' from the property path '{path}' is not a complex property on type '{declaring_type}'. Property paths must be composed of complex properties for all except the final property.")]
    DottedPartNotComplex {
        /// The offending segment
        property: String,
        /// The full path that was requested
        path: String,
        /// The type on which the segment was looked up
        declaring_type: String,
    },

    /// The terminal segment does not resolve to a scalar or complex property.
    #[error("The property '{property}' on type '{declaring_type}' is not a primitive or complex property. The Property method can only be used with primitive or complex properties. Use the Reference or Collection method.")]
    NotAScalarProperty {
        /// The offending segment
        property: String,
        /// The type on which the segment was looked up
        declaring_type: String,
    },

    /// The terminal segment does not resolve to a complex property.
    #[error("The property '{property}' on type '{declaring_type}' is not a complex property. The ComplexProperty method can only be used with complex properties.")]
    NotAComplexProperty {
        /// The offending segment
        property: String,
        /// The type on which the segment was looked up
        declaring_type: String,
    },

    /// Navigation lookups only accept a single property name.
    #[error("The path '{path}' is not valid. Only a single property name, not a dotted path, can be used with the Reference and Collection methods.")]
    DottedPathMustBeProperty {
        /// The full path that was requested
        path: String,
    },

    /// The name does not resolve to a navigation property.
    #[error("The property '{property}' on type '{declaring_type}' is not a navigation property. The Reference and Collection methods can only be used with navigation properties. Use the Property or ComplexProperty method.")]
    NotANavigationProperty {
        /// The offending property name
        property: String,
        /// The entity type
        declaring_type: String,
    },

    /// `collection` was used for a reference navigation property.
    #[error("The property '{property}' on type '{declaring_type}' is a reference navigation property. The Reference method should be used instead of the Collection method.")]
    UsedCollectionForReferenceProp {
        /// The offending property name
        property: String,
        /// The entity type
        declaring_type: String,
    },

    /// `reference` was used for a collection navigation property.
    #[error("The property '{property}' on type '{declaring_type}' is a collection navigation property. The Collection method should be used instead of the Reference method.")]
    UsedReferenceForCollectionProp {
        /// The offending property name
        property: String,
        /// The entity type
        declaring_type: String,
    },

    /// The name is neither a navigation, scalar nor complex property.
    #[error("The property '{property}' on type '{declaring_type}' is not a navigation, scalar, or complex property.")]
    NotAProperty {
        /// The offending property name
        property: String,
        /// The entity type
        declaring_type: String,
    },

    /// The model describes the same name as both a navigation and a scalar or complex property.
    #[error("The member '{property}' on type '{declaring_type}' is described as both a navigation property and a scalar or complex property.")]
    AmbiguousMember {
        /// The offending property name
        property: String,
        /// The entity type
        declaring_type: String,
    },

    /// The accessor expression is not a plain member-access chain.
    #[error("The expression passed to method '{method}' must be a valid property expression on type '{entity_type}', such as 'e => e.Property' or 'e => e.Collection.Select(x => x.Property)'.")]
    BadPropertyExpression {
        /// The calling operation
        method: &'static str,
        /// The root entity type
        entity_type: String,
    },

    // Model Errors
    /// Failed to find a CLR or model type by name.
    #[error("Failed to find type in model - {0}")]
    TypeNotFound(String),

    /// A nested value was written while its owning complex object is null.
    #[error("Cannot set the value of '{path}' because the complex object '{property}' is null.")]
    NullComplexObject {
        /// The complex property whose value is null
        property: String,
        /// The full path of the write
        path: String,
    },

    /// Recursion limit reached.
    ///
    /// Complex types referring to themselves would otherwise build unbounded validator trees.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    // Validation Errors
    /// User-supplied validation code failed while validating.
    ///
    /// Wraps the original failure so callers see which validator broke without
    /// receiving the raw third-party error.
    #[error("{message}")]
    UnexpectedValidation {
        /// Message naming the display name and the validator
        message: String,
        /// The original failure
        #[source]
        source: BoxError,
    },
}
