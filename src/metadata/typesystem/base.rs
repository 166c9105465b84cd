use std::{fmt, sync::Arc};

use bitflags::bitflags;
use strum::{AsRefStr, Display, EnumString};

use crate::{
    metadata::customattributes::{AttributeList, DisplayAttribute, ValidationAttribute},
    validation::ValidatableObject,
};

/// A reference-counted pointer to a [`TypeDescriptor`]
pub type TypeDescriptorRc = Arc<TypeDescriptor>;

/// Built-in value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
pub enum PrimitiveKind {
    /// `System.Boolean`
    Boolean,
    /// `System.Byte`
    Byte,
    /// `System.Int16`
    Int16,
    /// `System.Int32`
    Int32,
    /// `System.Int64`
    Int64,
    /// `System.Single`
    Single,
    /// `System.Double`
    Double,
    /// `System.Decimal`
    Decimal,
    /// `System.DateTime`
    DateTime,
    /// `System.Guid`
    Guid,
}

/// The declared type of a CLR property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClrType {
    /// A primitive value type, never null
    Primitive(PrimitiveKind),
    /// `Nullable<T>` of a primitive value type
    Nullable(PrimitiveKind),
    /// `System.String`
    String,
    /// `System.Byte[]`
    Bytes,
    /// A class, identified by its name
    Class(String),
    /// A collection of the named element type
    Collection(String),
}

impl ClrType {
    /// Returns `true` for value types that cannot hold null.
    ///
    /// `Nullable<T>` is a value type but accepts null, so it is not included.
    #[must_use]
    pub fn is_non_nullable_value_type(&self) -> bool {
        matches!(self, ClrType::Primitive(_))
    }

    /// The name of the class or collection element type, if any
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        match self {
            ClrType::Class(name) | ClrType::Collection(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ClrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClrType::Primitive(kind) => write!(f, "System.{kind}"),
            ClrType::Nullable(kind) => write!(f, "System.Nullable<System.{kind}>"),
            ClrType::String => f.write_str("System.String"),
            ClrType::Bytes => f.write_str("System.Byte[]"),
            ClrType::Class(name) => f.write_str(name),
            ClrType::Collection(name) => write!(f, "ICollection<{name}>"),
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Accessibility and shape of a CLR property
    pub struct PropertyFlags: u32 {
        /// Property has a public accessor
        const PUBLIC = 0x0001;
        /// Property is static
        const STATIC = 0x0002;
        /// Property has a getter
        const CAN_READ = 0x0004;
        /// Property has a setter
        const CAN_WRITE = 0x0008;
        /// Property takes index parameters
        const INDEXER = 0x0010;
    }
}

impl Default for PropertyFlags {
    fn default() -> Self {
        PropertyFlags::PUBLIC | PropertyFlags::CAN_READ | PropertyFlags::CAN_WRITE
    }
}

/// A property as declared on a CLR type
#[derive(Debug, Clone)]
pub struct ClrProperty {
    /// The property name
    pub name: String,
    /// The declared type
    pub property_type: ClrType,
    /// Accessibility flags
    pub flags: PropertyFlags,
    /// Declared attributes, in declaration order
    pub attributes: AttributeList,
}

impl ClrProperty {
    /// Create a public read/write property without attributes
    pub fn new(name: impl Into<String>, property_type: ClrType) -> Self {
        ClrProperty {
            name: name.into(),
            property_type,
            flags: PropertyFlags::default(),
            attributes: AttributeList::new(),
        }
    }

    /// Returns `true` for public, non-static, non-indexer properties with a getter and a setter
    #[must_use]
    pub fn is_public_instance_read_write(&self) -> bool {
        self.flags
            .contains(PropertyFlags::PUBLIC | PropertyFlags::CAN_READ | PropertyFlags::CAN_WRITE)
            && !self
                .flags
                .intersects(PropertyFlags::STATIC | PropertyFlags::INDEXER)
    }

    /// The validation attributes declared on this property
    pub fn validation_attributes(&self) -> impl Iterator<Item = &ValidationAttribute> {
        self.attributes.iter().filter_map(|attr| attr.as_validation())
    }

    /// The display attribute of this property, if declared
    #[must_use]
    pub fn display(&self) -> Option<&DisplayAttribute> {
        self.attributes.iter().find_map(|attr| attr.as_display())
    }
}

/// The CLR view of a type: the properties reflection reports and the attributes it declares.
///
/// Properties are kept in reflection order, which is the order validators are built and run.
pub struct TypeDescriptor {
    /// The type name
    pub name: String,
    /// Declared properties, in reflection order
    pub properties: Vec<ClrProperty>,
    /// Type level attributes
    pub attributes: AttributeList,
    /// Self-validation logic, for types implementing `IValidatableObject`
    pub validatable: Option<Arc<dyn ValidatableObject>>,
}

impl TypeDescriptor {
    /// Find a property by name
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ClrProperty> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// The validation attributes declared on the type itself
    pub fn validation_attributes(&self) -> impl Iterator<Item = &ValidationAttribute> {
        self.attributes.iter().filter_map(|attr| attr.as_validation())
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .field("attributes", &self.attributes)
            .field("validatable", &self.validatable.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_nullable_value_types() {
        assert!(ClrType::Primitive(PrimitiveKind::Int32).is_non_nullable_value_type());
        assert!(!ClrType::Nullable(PrimitiveKind::Int32).is_non_nullable_value_type());
        assert!(!ClrType::String.is_non_nullable_value_type());
        assert!(!ClrType::Bytes.is_non_nullable_value_type());
        assert!(!ClrType::Class("AircraftInfo".to_string()).is_non_nullable_value_type());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(
            ClrType::Primitive(PrimitiveKind::DateTime).to_string(),
            "System.DateTime"
        );
        assert_eq!(
            ClrType::Nullable(PrimitiveKind::Int32).to_string(),
            "System.Nullable<System.Int32>"
        );
        assert_eq!(
            ClrType::Collection("FlightSegment".to_string()).to_string(),
            "ICollection<FlightSegment>"
        );
        assert_eq!("Guid".parse::<PrimitiveKind>().unwrap(), PrimitiveKind::Guid);
    }

    #[test]
    fn test_public_instance_read_write() {
        let mut property = ClrProperty::new("Code", ClrType::String);
        assert!(property.is_public_instance_read_write());

        property.flags.remove(PropertyFlags::CAN_WRITE);
        assert!(!property.is_public_instance_read_write());

        property.flags = PropertyFlags::default() | PropertyFlags::STATIC;
        assert!(!property.is_public_instance_read_write());

        property.flags = PropertyFlags::default() | PropertyFlags::INDEXER;
        assert!(!property.is_public_instance_read_write());

        property.flags = PropertyFlags::CAN_READ | PropertyFlags::CAN_WRITE;
        assert!(!property.is_public_instance_read_write());
    }
}
