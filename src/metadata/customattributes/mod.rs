//! Annotation attributes declared on CLR properties and types.
//!
//! Attributes are the declarative half of validation: the validator builder reads them from the
//! [`crate::metadata::typesystem::TypeDescriptor`] of each type and wraps every
//! [`ValidationAttribute`] into a validator. This module defines the attribute values and the
//! evaluation of each [`ValidationRule`].
//!
//! # Supported Rules
//!
//! - **Required** - rejects null, and empty strings unless `allow_empty_strings` is set
//! - **StringLength** - bounds the number of characters of a string
//! - **MaxLength** / **MinLength** - bounds the length of a string or array
//! - **RegularExpression** - the whole value must match the pattern
//! - **Range** - inclusive numeric bounds
//! - **CustomValidation** - a user-supplied routine
//!
//! Every rule except `Required` accepts null values.
//!
//! # Examples
//!
//! ```rust
//! use entityscope::metadata::customattributes::ValidationAttribute;
//! use entityscope::metadata::instance::Value;
//! use entityscope::validation::ValidationContext;
//!
//! let attribute = ValidationAttribute::string_length(3);
//! let context = ValidationContext::new("Flight", "FlightNumber", None);
//!
//! let failure = attribute.validation_result(&Value::from("QF0006"), &context)?;
//! assert_eq!(
//!     failure.unwrap().message,
//!     "The field FlightNumber must be a string with a maximum length of 3."
//! );
//! # Ok::<(), entityscope::BoxError>(())
//! ```

mod rules;
mod types;

pub use types::*;
