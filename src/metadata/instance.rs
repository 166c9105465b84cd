//! Live object graphs for tracked entities.
//!
//! Entities and complex objects are represented as [`Instance`]s: a CLR type name plus a set of
//! named field values. Instances are shared through [`InstanceRc`], so cloning a
//! [`Value::Object`] shares the underlying object the same way a reference-typed property would.
//! Object values compare by identity; comparing complex objects by content needs the model (see
//! [`crate::entry::EntityEntry`]).
//!
//! # Example
//!
//! ```rust
//! use entityscope::metadata::instance::{Instance, InstanceExt, Value};
//!
//! let airport = Instance::new("AirportDetails").with("AirportCode", "YVR");
//! let info = Instance::new("DepartureArrivalInfo").with("Airport", airport.clone());
//!
//! assert_eq!(info.get("Airport"), Value::Object(airport));
//! ```

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

/// A reference-counted pointer to an [`Instance`]
pub type InstanceRc = Arc<Instance>;

/// A dynamically typed property value
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Absent value (`null`)
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integral value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Binary value
    Bytes(Vec<u8>),
    /// Reference to a complex object or related entity
    Object(InstanceRc),
    /// Set of related entities
    Collection(Vec<InstanceRc>),
}

impl Value {
    /// Returns `true` if this is [`Value::Null`]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the contained string, if any
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the contained object, if any
    #[must_use]
    pub fn as_object(&self) -> Option<&InstanceRc> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    /// Returns the contained value as a float if it is numeric
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Collection(a), Value::Collection(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(value) => write!(f, "{}", if *value { "True" } else { "False" }),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
            Value::Bytes(value) => write!(f, "System.Byte[{}]", value.len()),
            Value::Object(instance) => f.write_str(instance.type_name()),
            Value::Collection(items) => write!(f, "Collection[{}]", items.len()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<InstanceRc> for Value {
    fn from(value: InstanceRc) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// A live object: an entity or a complex object.
///
/// Field values are stored behind a lock so entries can update them through shared references.
/// Fields that were never set read as [`Value::Null`].
pub struct Instance {
    /// CLR type name of the object
    type_name: String,
    /// Current field values
    fields: RwLock<HashMap<String, Value>>,
}

impl Instance {
    /// Create a new, empty instance of the given type
    ///
    /// ## Arguments
    /// * 'type_name' - The CLR type name of the object
    pub fn new(type_name: impl Into<String>) -> InstanceRc {
        Arc::new(Instance {
            type_name: type_name.into(),
            fields: RwLock::new(HashMap::new()),
        })
    }

    /// The CLR type name of this object
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Reads a field value, [`Value::Null`] if it was never set
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        read_lock!(self.fields)
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Writes a field value
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        write_lock!(self.fields).insert(name.to_string(), value.into());
    }

    /// A copy of all field values
    #[must_use]
    pub fn fields(&self) -> HashMap<String, Value> {
        read_lock!(self.fields).clone()
    }

    /// Creates a new instance of the same type with every field value passed through `map`.
    ///
    /// The fields are copied before `map` runs, so `map` may read this instance again.
    pub fn copy_with(&self, mut map: impl FnMut(Value) -> Value) -> InstanceRc {
        let fields = self
            .fields()
            .into_iter()
            .map(|(name, value)| (name, map(value)))
            .collect();

        Arc::new(Instance {
            type_name: self.type_name.clone(),
            fields: RwLock::new(fields),
        })
    }
}

/// Builder-style setter for constructing object graphs
pub trait InstanceExt {
    /// Sets a field and returns the instance, for chained construction
    #[must_use]
    fn with(self, name: &str, value: impl Into<Value>) -> Self;
}

impl InstanceExt for InstanceRc {
    fn with(self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

        self.type_name == other.type_name && *read_lock!(self.fields) == *read_lock!(other.fields)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("fields", &*read_lock!(self.fields))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_read_as_null() {
        let instance = Instance::new("AircraftInfo");
        assert!(instance.get("Code").is_null());

        instance.set("Code", "A380");
        assert_eq!(instance.get("Code"), Value::from("A380"));
    }

    #[test]
    fn test_objects_are_shared() {
        let airport = Instance::new("AirportDetails");
        let info = Instance::new("DepartureArrivalInfo").with("Airport", airport.clone());

        airport.set("AirportCode", "SYD");

        let nested = info.get("Airport");
        assert_eq!(
            nested.as_object().unwrap().get("AirportCode"),
            Value::from("SYD")
        );
    }

    #[test]
    fn test_copy_with_shares_nested_objects() {
        let airport = Instance::new("AirportDetails").with("AirportCode", "SYD");
        let info = Instance::new("DepartureArrivalInfo")
            .with("Airport", airport.clone())
            .with("Time", "10:05");

        let copy = info.copy_with(|value| value);
        assert!(!Arc::ptr_eq(&copy, &info));
        assert_eq!(*copy, *info);
        assert_eq!(copy.get("Airport"), Value::Object(airport));

        info.set("Time", "11:30");
        assert_eq!(copy.get("Time"), Value::from("10:05"));
        assert_ne!(*copy, *info);
    }

    #[test]
    fn test_objects_compare_by_identity() {
        let first = Instance::new("AirportDetails").with("AirportCode", "SYD");
        let second = Instance::new("AirportDetails").with("AirportCode", "SYD");

        assert_eq!(Value::Object(first.clone()), Value::Object(first.clone()));
        assert_ne!(Value::Object(first), Value::Object(second));
    }

    #[test]
    fn test_self_reference_is_comparable() {
        let person = Instance::new("Person");
        person.set("Self", person.clone());

        let copy = person.copy_with(|value| value);
        assert_eq!(*copy, *person);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(true).to_string(), "True");
        assert_eq!(Value::Null.to_string(), "");
    }
}
