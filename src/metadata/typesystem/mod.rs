//! CLR type system as seen through reflection.
//!
//! The validator builder discovers validation rules by reflecting over the CLR types of entities
//! and complex objects. This module provides that view: each type is described by a
//! [`TypeDescriptor`] listing its properties in reflection order together with the attributes
//! declared on them.
//!
//! # Key Components
//!
//! - [`TypeDescriptor`]: Properties, attributes and self-validation logic of a type
//! - [`ClrProperty`], [`ClrType`], [`PropertyFlags`]: A declared property and its shape
//! - [`TypeRegistry`]: Name-keyed registry of all described types
//! - [`TypeBuilder`]: Builder pattern for describing types
//!
//! # Examples
//!
//! ```rust
//! use entityscope::metadata::typesystem::{ClrType, PrimitiveKind, TypeBuilder, TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! TypeBuilder::new("FlightSegment")
//!     .property("FlightSegmentId", ClrType::Primitive(PrimitiveKind::Int32))
//!     .property("FlightNumber", ClrType::String)
//!     .register(&registry);
//!
//! let segment = registry.get("FlightSegment").unwrap();
//! assert!(segment.property("FlightNumber").is_some());
//! ```

mod base;
mod builder;
mod registry;

pub use base::{
    ClrProperty, ClrType, PrimitiveKind, PropertyFlags, TypeDescriptor, TypeDescriptorRc,
};
pub use builder::TypeBuilder;
pub use registry::TypeRegistry;
