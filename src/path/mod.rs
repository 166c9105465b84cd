//! Path resolution: turning property names, dotted paths and accessor expressions into entries.
//!
//! The resolver is implemented as methods on [`crate::entry::EntityEntry`] and
//! [`crate::entry::PropertyEntry`]. It checks the shape of a request against model metadata only
//! and never looks at property values.
//!
//! | operation | dotted paths | terminal kind |
//! |---|---|---|
//! | `property` | yes | scalar or complex |
//! | `complex_property` | yes | complex |
//! | `member` | yes | scalar, complex or navigation |
//! | `reference` | no | reference navigation |
//! | `collection` | no | collection navigation |
//!
//! Accessor expressions ([`PathExpression`]) are accepted when they form a plain member chain,
//! optionally through `Select` projections (see [`try_parse_path`]).
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use entityscope::prelude::*;
//!
//! let model = Model::new();
//! TypeBuilder::new("Order")
//!     .property("Shipping", ClrType::Class("Address".to_string()))
//!     .register(model.types());
//! TypeBuilder::new("Address")
//!     .property("City", ClrType::String)
//!     .register(model.types());
//! model.add_structural_type(
//!     StructuralType::entity("Order").with_property(EdmProperty::complex("Shipping", "Address")),
//! );
//! model.add_structural_type(
//!     StructuralType::complex("Address").with_property(EdmProperty::scalar("City")),
//! );
//!
//! let order = Instance::new("Order")
//!     .with("Shipping", Instance::new("Address").with("City", "Vancouver"));
//! let entry = EntityEntry::new(Arc::new(model), order)?;
//!
//! let city = entry.property("Shipping.City")?;
//! assert_eq!(city.current_value(), Value::from("Vancouver"));
//! assert_eq!(city.parent_property().unwrap().name(), "Shipping");
//!
//! let selector = PathExpression::lambda(
//!     "o",
//!     PathExpression::parameter("o").member("Shipping").member("City"),
//! );
//! assert_eq!(entry.property_from_expression(&selector)?.path(), "Shipping.City");
//! # Ok::<(), entityscope::Error>(())
//! ```

mod expression;
mod resolver;

pub use expression::{try_parse_path, ParsedPath, PathExpression};

#[cfg(test)]
mod tests {
    use crate::{
        entry::{MemberEntry, MemberEntryType},
        metadata::{
            model::{EdmProperty, NavigationProperty, StructuralType},
            typesystem::ClrType,
        },
        path::PathExpression,
        test::{flight_model, flight_segment_entry},
        Error,
    };

    #[test]
    fn test_dotted_path_builds_parent_chain() {
        let entry = flight_segment_entry(&flight_model());
        let code = entry.property("Departure.Airport.AirportCode").unwrap();

        assert_eq!(code.name(), "AirportCode");
        assert!(!code.is_complex());
        assert_eq!(code.metadata().declaring_type(), "AirportDetails");
        assert_eq!(code.metadata().element_type(), &ClrType::String);

        let airport = code.parent_property().unwrap();
        assert_eq!(airport.name(), "Airport");
        assert!(airport.is_complex());

        let departure = airport.parent_property().unwrap();
        assert_eq!(departure.name(), "Departure");
        assert!(departure.parent_property().is_none());
        assert!(code.entity_entry().ptr_eq(&entry));
    }

    #[test]
    fn test_lookups_are_independent() {
        let entry = flight_segment_entry(&flight_model());
        let first = entry.property("Departure.Airport").unwrap();
        let second = entry.property("Departure.Airport").unwrap();

        assert_eq!(first.path(), second.path());
        assert_eq!(first.metadata(), second.metadata());
        assert!(!std::ptr::eq(
            first.parent_property().unwrap(),
            second.parent_property().unwrap()
        ));
    }

    #[test]
    fn test_non_complex_segment_in_path() {
        let entry = flight_segment_entry(&flight_model());

        let err = entry.property("FlightNumber.Length").unwrap_err();
        assert!(matches!(
            err,
            Error::DottedPartNotComplex { ref property, ref path, ref declaring_type }
                if property == "FlightNumber"
                    && path == "FlightNumber.Length"
                    && declaring_type == "FlightSegment"
        ));

        let err = entry.property("Departure.Time.Ticks").unwrap_err();
        assert!(matches!(
            err,
            Error::DottedPartNotComplex { ref property, ref declaring_type, .. }
                if property == "Time" && declaring_type == "DepartureArrivalInfo"
        ));

        let err = entry.property("Aircraft.Code").unwrap_err();
        assert!(matches!(err, Error::DottedPartNotComplex { ref property, .. } if property == "Aircraft"));

        let err = entry.property("Missing.Code").unwrap_err();
        assert!(matches!(err, Error::DottedPartNotComplex { ref property, .. } if property == "Missing"));
    }

    #[test]
    fn test_terminal_kind_errors() {
        let entry = flight_segment_entry(&flight_model());

        assert!(matches!(
            entry.property("Aircraft"),
            Err(Error::NotAScalarProperty { ref property, .. }) if property == "Aircraft"
        ));
        assert!(matches!(
            entry.property("Departure.Airport.Missing"),
            Err(Error::NotAScalarProperty { ref declaring_type, .. }) if declaring_type == "AirportDetails"
        ));
        assert!(matches!(
            entry.complex_property("FlightNumber"),
            Err(Error::NotAComplexProperty { ref property, .. }) if property == "FlightNumber"
        ));
        assert!(matches!(
            entry.complex_property("Departure.Airport.AirportCode"),
            Err(Error::NotAComplexProperty { ref property, .. }) if property == "AirportCode"
        ));
        assert!(entry.complex_property("Departure.Airport").unwrap().is_complex());
    }

    #[test]
    fn test_blank_names() {
        let entry = flight_segment_entry(&flight_model());

        for name in ["", "  "] {
            assert!(matches!(
                entry.property(name),
                Err(Error::ArgumentIsNullOrWhitespace { parameter: "property_name" })
            ));
            assert!(matches!(
                entry.member(name),
                Err(Error::ArgumentIsNullOrWhitespace { parameter: "property_name" })
            ));
            assert!(matches!(
                entry.reference(name),
                Err(Error::ArgumentIsNullOrWhitespace { parameter: "navigation_property" })
            ));
            assert!(matches!(
                entry.collection(name),
                Err(Error::ArgumentIsNullOrWhitespace { parameter: "navigation_property" })
            ));
        }
    }

    #[test]
    fn test_unmapped_clr_property() {
        let entry = flight_segment_entry(&flight_model());
        let notes = entry.property("Notes").unwrap();

        assert!(!notes.metadata().is_mapped());
        assert!(!notes.is_complex());
        assert!(entry.property("FlightNumber").unwrap().metadata().is_mapped());
    }

    #[test]
    fn test_navigation_lookups() {
        let entry = flight_segment_entry(&flight_model());

        let aircraft = entry.reference("Aircraft").unwrap();
        assert_eq!(aircraft.metadata().element_type(), "AircraftInfo");
        assert!(!aircraft.metadata().is_collection());

        assert!(matches!(
            entry.reference("Passengers"),
            Err(Error::UsedReferenceForCollectionProp { .. })
        ));
        assert!(matches!(
            entry.collection("Aircraft"),
            Err(Error::UsedCollectionForReferenceProp { .. })
        ));
        assert!(matches!(
            entry.reference("FlightNumber"),
            Err(Error::NotANavigationProperty { ref property, .. }) if property == "FlightNumber"
        ));
        assert!(matches!(
            entry.reference("Aircraft.Code"),
            Err(Error::DottedPathMustBeProperty { ref path }) if path == "Aircraft.Code"
        ));
        assert!(matches!(
            entry.collection("Passengers.Name"),
            Err(Error::DottedPathMustBeProperty { .. })
        ));

        // Rejected even though the path resolves to a complex property
        assert!(entry.complex_property("Departure.Airport").is_ok());
        assert!(matches!(
            entry.reference("Departure.Airport"),
            Err(Error::DottedPathMustBeProperty { ref path }) if path == "Departure.Airport"
        ));
        assert!(matches!(
            entry.collection("Departure.Airport"),
            Err(Error::DottedPathMustBeProperty { ref path }) if path == "Departure.Airport"
        ));
    }

    #[test]
    fn test_member() {
        let entry = flight_segment_entry(&flight_model());

        let member = entry.member("Aircraft").unwrap();
        assert_eq!(member.member_entry_type(), MemberEntryType::ReferenceNavigationProperty);

        let member = entry.member("Passengers").unwrap();
        assert!(matches!(member, MemberEntry::Collection(_)));

        let member = entry.member("Departure").unwrap();
        assert_eq!(member.member_entry_type(), MemberEntryType::ComplexProperty);

        let member = entry.member("Departure.Airport.CityCode").unwrap();
        assert_eq!(member.path(), "Departure.Airport.CityCode");

        assert!(matches!(
            entry.member("Missing"),
            Err(Error::NotAProperty { ref property, ref declaring_type })
                if property == "Missing" && declaring_type == "FlightSegment"
        ));
    }

    #[test]
    fn test_member_ambiguity() {
        let model = flight_model();
        model.add_structural_type(
            StructuralType::entity("FlightSegment")
                .with_property(EdmProperty::scalar("Aircraft"))
                .with_navigation(NavigationProperty::collection("Aircraft", "AircraftInfo")),
        );
        let entry = flight_segment_entry(&model);

        assert!(matches!(
            entry.member("Aircraft"),
            Err(Error::AmbiguousMember { ref property, .. }) if property == "Aircraft"
        ));
    }

    #[test]
    fn test_nested_lookup_from_property_entry() {
        let entry = flight_segment_entry(&flight_model());
        let departure = entry.complex_property("Departure").unwrap();

        let code = departure.property("Airport.AirportCode").unwrap();
        assert_eq!(code.path(), "Departure.Airport.AirportCode");
        assert_eq!(code.depth(), 2);

        let airport = departure.complex_property("Airport").unwrap();
        assert_eq!(airport.path(), "Departure.Airport");

        let flight_number = entry.property("FlightNumber").unwrap();
        assert!(matches!(
            flight_number.property("Length"),
            Err(Error::NotAComplexProperty { ref property, .. }) if property == "FlightNumber"
        ));
    }

    #[test]
    fn test_expression_lookups() {
        let entry = flight_segment_entry(&flight_model());
        let e = || PathExpression::parameter("e");

        let selector = PathExpression::lambda("e", e().member("Departure").member("Airport"));
        assert_eq!(entry.property_from_expression(&selector).unwrap().path(), "Departure.Airport");
        assert!(entry.complex_property_from_expression(&selector).unwrap().is_complex());

        let selector = PathExpression::lambda("e", e().member("Aircraft"));
        assert_eq!(entry.reference_from_expression(&selector).unwrap().name(), "Aircraft");

        let selector = PathExpression::lambda("e", e().member("Passengers").convert());
        assert_eq!(entry.collection_from_expression(&selector).unwrap().name(), "Passengers");

        let selector = PathExpression::lambda("e", e());
        assert!(matches!(
            entry.property_from_expression(&selector),
            Err(Error::BadPropertyExpression { method: "Property", ref entity_type })
                if entity_type == "FlightSegment"
        ));

        let selector = PathExpression::lambda(
            "e",
            e().member("Passengers").call("First", vec![]).member("Name"),
        );
        assert!(matches!(
            entry.reference_from_expression(&selector),
            Err(Error::BadPropertyExpression { method: "Reference", .. })
        ));

        // Select projections form paths the navigation lookups reject
        let selector = PathExpression::lambda(
            "e",
            e().member("Passengers").select("p", |p| p.member("Name")),
        );
        assert!(matches!(
            entry.collection_from_expression(&selector),
            Err(Error::DottedPathMustBeProperty { ref path }) if path == "Passengers.Name"
        ));
    }
}
