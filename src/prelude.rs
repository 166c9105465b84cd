//! # entityscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the entityscope library. Import this module to get quick access to the essential
//! types for resolving property paths and validating entities.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all entityscope operations
pub use crate::Error;

/// The result type used throughout entityscope
pub use crate::Result;

/// Boxed error returned by user-supplied validation code
pub use crate::BoxError;

// ================================================================================================
// Live Objects
// ================================================================================================

/// Entities, complex objects and their values
pub use crate::metadata::instance::{Instance, InstanceExt, InstanceRc, Value};

// ================================================================================================
// Type System and Attributes
// ================================================================================================

/// CLR type descriptors
pub use crate::metadata::typesystem::{
    ClrProperty, ClrType, PrimitiveKind, PropertyFlags, TypeBuilder, TypeDescriptor,
    TypeDescriptorRc, TypeRegistry,
};

/// Annotation attributes
pub use crate::metadata::customattributes::{
    Attribute, DisplayAttribute, ValidationAttribute, ValidationRule,
};

// ================================================================================================
// Model Metadata
// ================================================================================================

/// Mapped types, properties and facets
pub use crate::metadata::model::{
    EdmProperty, MetadataProvider, Model, Multiplicity, NavigationProperty,
    StoreGeneratedPattern, StructuralKind, StructuralType,
};

// ================================================================================================
// Entries and Path Resolution
// ================================================================================================

/// Entity and member entries
pub use crate::entry::{
    CollectionEntry, EntityEntry, MemberEntry, MemberEntryType, PropertyEntry, ReferenceEntry,
};

/// Accessor expressions
pub use crate::path::{try_parse_path, ParsedPath, PathExpression};

// ================================================================================================
// Validation
// ================================================================================================

/// Validator construction and evaluation
pub use crate::validation::{
    ComplexTypeValidator, EntityValidationContext, EntityValidationResult, EntityValidator,
    EntityValidatorBuilder, PropertyValidator, ValidatableObject, ValidationConfig,
    ValidationContext, ValidationError, ValidationFailure, ValidationProvider, Validator,
};
