// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # entityscope
//!
//! Property path resolution and declarative validation for tracked entities of an
//! object-relational model.
//!
//! `entityscope` works on two views of every type: the CLR view (the properties a class declares
//! and the attributes on them) and the model view (the scalar, complex and navigation properties
//! the model maps, with their facets). On top of these it provides:
//!
//! - **Path resolution** - turn property names, dotted paths such as
//!   `Departure.Airport.AirportCode` and accessor expressions into typed entries that read and
//!   write the live object graph
//! - **Validator trees** - build, once per entity type, a tree of validators from validation
//!   attributes, model facets and self-validation logic
//! - **Evaluation** - run a tree against an entity and collect every error with the dotted path
//!   of the property it is about
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use entityscope::prelude::*;
//!
//! let model = Model::new();
//! TypeBuilder::new("FlightSegment")
//!     .property("FlightNumber", ClrType::String)
//!     .attribute(ValidationAttribute::string_length(6))
//!     .property("Departure", ClrType::Class("AirportDetails".to_string()))
//!     .register(model.types());
//! TypeBuilder::new("AirportDetails")
//!     .property("AirportCode", ClrType::String)
//!     .attribute(ValidationAttribute::regular_expression("^[A-Z]{3}$"))
//!     .register(model.types());
//! model.add_structural_type(
//!     StructuralType::entity("FlightSegment")
//!         .with_property(EdmProperty::scalar("FlightNumber"))
//!         .with_property(EdmProperty::complex("Departure", "AirportDetails")),
//! );
//! model.add_structural_type(
//!     StructuralType::complex("AirportDetails").with_property(EdmProperty::scalar("AirportCode")),
//! );
//!
//! let segment = Instance::new("FlightSegment")
//!     .with("FlightNumber", "QF0006")
//!     .with("Departure", Instance::new("AirportDetails").with("AirportCode", "yvr"));
//! let entry = EntityEntry::new(Arc::new(model), segment)?;
//!
//! let provider = ValidationProvider::new(ValidationConfig::default());
//! let result = provider.validate(&entry)?;
//! assert_eq!(
//!     result.errors()[0].property_name.as_deref(),
//!     Some("Departure.AirportCode")
//! );
//!
//! entry.property("Departure.AirportCode")?.set_current_value("YVR")?;
//! assert!(provider.validate(&entry)?.is_valid());
//! # Ok::<(), entityscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata`] - Live objects, CLR types, attributes and model metadata
//! - [`entry`] - Entity, property and navigation entries
//! - [`path`] - Name, dotted path and accessor expression resolution
//! - [`validation`] - Validator tree construction, evaluation and caching
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: validator construction at `debug`, cache hits at
//! `trace`, and failing user validation code at `warn`. Install any `log` implementation to see
//! these records.
//!
//! ## Error Handling
//!
//! Validation errors are data, reported through
//! [`validation::EntityValidationResult`]. Operations return [`Error`] only when a request does
//! not fit the model, or when user-supplied validation code fails:
//!
//! ```rust
//! use entityscope::Error;
//!
//! fn report(err: &Error) -> String {
//!     match err {
//!         Error::UnexpectedValidation { message, .. } => format!("validator failed: {message}"),
//!         Error::DottedPartNotComplex { path, .. } => format!("bad path: {path}"),
//!         other => other.to_string(),
//!     }
//! }
//! ```

#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the entityscope library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use entityscope::prelude::*;
///
/// let config = ValidationConfig::default();
/// let provider = ValidationProvider::new(config);
/// assert!(provider.config().enable_attribute_validation);
/// ```
pub mod prelude;

/// Live objects, CLR type descriptors, annotation attributes and model metadata
///
/// These are the host abstractions everything else works against. A [`metadata::model::Model`]
/// combines a [`metadata::typesystem::TypeRegistry`] of CLR types with the structural types the
/// model maps, and serves both through the [`metadata::model::MetadataProvider`] trait.
pub mod metadata;

/// Entries for tracked entities and their members
///
/// See [`entry::EntityEntry`] for the root of every lookup.
pub mod entry;

/// Resolution of property names, dotted paths and accessor expressions
pub mod path;

/// Validator trees: construction, evaluation and caching
///
/// # Key Types
///
/// - [`validation::EntityValidatorBuilder`] - Builds validator trees from metadata
/// - [`validation::EntityValidator`] - The root of a validator tree
/// - [`validation::ValidationProvider`] - Caches trees per entity type and validates entries
/// - [`validation::ValidationConfig`] - Selects which validation sources are used
pub mod validation;

/// `entityscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use entityscope::{entry::EntityEntry, entry::PropertyEntry, Result};
///
/// fn airport_code(entry: &EntityEntry) -> Result<PropertyEntry> {
///     entry.property("Departure.Airport.AirportCode")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `entityscope` Error type
///
/// The main error type for all operations in this crate. Path and argument errors describe
/// requests that do not fit the model, `UnexpectedValidation` wraps failing user code.
pub use error::Error;

/// Boxed error returned by user-supplied validation code
pub use error::BoxError;
