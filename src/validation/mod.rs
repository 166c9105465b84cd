//! Declarative validation of tracked entities.
//!
//! Validation is split into two phases. The [`EntityValidatorBuilder`] turns the metadata of an
//! entity type into a tree of validators mirroring its properties: one [`PropertyValidator`]
//! per property needing validation, with nested [`ComplexTypeValidator`]s for complex
//! properties, and type-level validators at every node. Evaluating the tree against an entity
//! yields an [`EntityValidationResult`] listing every error with the dotted path of the
//! property it is about.
//!
//! # Architecture
//!
//! - [`Validator`] - leaf validators: [`ValidationAttributeValidator`] and
//!   [`ValidatableObjectValidator`]
//! - [`PropertyValidator`] - validators of one property
//! - [`EntityValidator`] / [`ComplexTypeValidator`] - validators of a type
//! - [`ValidationProvider`] - builds trees on first use and caches them per entity type
//!
//! Nested complex objects are only validated when the validators of the complex property
//! itself pass, and type-level validators only run when every property of their type is valid.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use entityscope::prelude::*;
//!
//! let model = Model::new();
//! TypeBuilder::new("Aircraft")
//!     .property("Code", ClrType::String)
//!     .attribute(ValidationAttribute::string_length(4))
//!     .register(model.types());
//! model.add_structural_type(
//!     StructuralType::entity("Aircraft").with_property(EdmProperty::scalar("Code").required()),
//! );
//!
//! let entry = EntityEntry::new(Arc::new(model), Instance::new("Aircraft"))?;
//! let provider = ValidationProvider::new(ValidationConfig::default());
//!
//! let result = provider.validate(&entry)?;
//! assert_eq!(result.errors()[0].property_name.as_deref(), Some("Code"));
//! assert_eq!(result.errors()[0].message, "The Code field is required.");
//! # Ok::<(), entityscope::Error>(())
//! ```

mod attribute;
mod builder;
mod config;
mod context;
mod property;
mod provider;
mod result;
mod types;
mod validatable;

pub use attribute::{ValidationAttributeValidator, Validator};
pub use builder::EntityValidatorBuilder;
pub use config::ValidationConfig;
pub use context::{EntityValidationContext, ValidationContext, ValidationFailure, ValidationItems};
pub use property::PropertyValidator;
pub use provider::ValidationProvider;
pub use result::{EntityValidationResult, ValidationError};
pub use types::{ComplexTypeValidator, EntityValidator};
pub use validatable::{ValidatableObject, ValidatableObjectValidator};
