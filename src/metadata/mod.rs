//! Metadata describing tracked entities and the objects they are made of.
//!
//! This module contains the host abstractions the path resolver and the validator builder work
//! against: live object graphs, the CLR view of types, the annotation attributes declared on
//! them, and the model metadata mapped on top of the CLR types.
//!
//! # Key Components
//!
//! - [`instance`] - Live objects and dynamically typed values
//! - [`typesystem`] - CLR type descriptors as seen through reflection
//! - [`customattributes`] - Validation and display attributes
//! - [`model`] - Mapped properties, facets, navigation properties and the metadata provider
//!
//! # Examples
//!
//! ```rust
//! use entityscope::metadata::{
//!     customattributes::ValidationAttribute,
//!     model::{EdmProperty, MetadataProvider, Model, StructuralType},
//!     typesystem::{ClrType, TypeBuilder},
//! };
//!
//! let model = Model::new();
//! TypeBuilder::new("AircraftInfo")
//!     .property("Code", ClrType::String)
//!     .attribute(ValidationAttribute::string_length(4))
//!     .register(model.types());
//! model.add_structural_type(
//!     StructuralType::entity("AircraftInfo").with_property(EdmProperty::scalar("Code")),
//! );
//!
//! assert!(model.clr_type("AircraftInfo").is_some());
//! ```

/// Implementation of validation and display attributes
pub mod customattributes;
/// Implementation of live object graphs
pub mod instance;
/// Implementation of the mapped model metadata
pub mod model;
/// Implementation of the CLR type system
pub mod typesystem;
