//! Model metadata: the mapped shape of entity and complex types.
//!
//! Where [`crate::metadata::typesystem`] describes what the CLR classes declare, this module
//! describes what the model maps: scalar and complex properties with their facets
//! (nullability, store generation, maximum length) and navigation properties with their
//! multiplicity. The validator builder combines both views.
//!
//! # Example
//!
//! ```rust
//! use entityscope::metadata::model::{EdmProperty, MetadataProvider, Model, StructuralType};
//!
//! let model = Model::new();
//! model.add_structural_type(
//!     StructuralType::entity("FlightSegment")
//!         .with_property(EdmProperty::scalar("FlightNumber").required().max_length(10))
//!         .with_property(EdmProperty::complex("Departure", "DepartureArrivalInfo")),
//! );
//!
//! let segment = model.structural_type("FlightSegment").unwrap();
//! assert!(segment.property("Departure").unwrap().is_complex());
//! ```

mod edm;
mod provider;

pub use edm::{
    EdmProperty, Multiplicity, NavigationProperty, StoreGeneratedPattern, StructuralKind,
    StructuralType, StructuralTypeRc,
};
pub use provider::{MetadataProvider, Model};
