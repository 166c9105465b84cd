//! Central registry of CLR type descriptors.
//!
//! The registry maps type names to [`TypeDescriptor`]s. It is backed by a `DashMap`, so lookups
//! and insertions can happen concurrently from several validation threads.

use dashmap::DashMap;

use crate::{
    metadata::typesystem::{TypeDescriptor, TypeDescriptorRc},
    Error::TypeNotFound,
    Result,
};

/// Thread-safe registry of CLR type descriptors, keyed by type name
#[derive(Default)]
pub struct TypeRegistry {
    types: DashMap<String, TypeDescriptorRc>,
}

impl TypeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        TypeRegistry {
            types: DashMap::new(),
        }
    }

    /// Add a type, replacing any type of the same name
    ///
    /// ## Arguments
    /// * 'descriptor' - The type to add
    pub fn insert(&self, descriptor: TypeDescriptorRc) {
        self.types.insert(descriptor.name.clone(), descriptor);
    }

    /// Look up a type by name
    ///
    /// ## Arguments
    /// * 'name' - The CLR type name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TypeDescriptorRc> {
        self.types.get(name).map(|entry| entry.value().clone())
    }

    /// Look up a type by name, failing if it is not registered
    ///
    /// ## Arguments
    /// * 'name' - The CLR type name
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if no type of that name exists.
    pub fn require(&self, name: &str) -> Result<TypeDescriptorRc> {
        self.get(name).ok_or_else(|| TypeNotFound(name.to_string()))
    }

    /// Returns `true` if a type of that name is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of registered types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Names of all registered types, in no particular order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.types.iter().map(|entry| entry.key().clone()).collect()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.names())
            .finish()
    }
}

impl FromIterator<TypeDescriptor> for TypeRegistry {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let registry = TypeRegistry::new();
        for descriptor in iter {
            registry.insert(std::sync::Arc::new(descriptor));
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::typesystem::{ClrType, TypeBuilder};

    #[test]
    fn test_insert_and_lookup() {
        let registry = TypeRegistry::new();
        assert!(registry.is_empty());

        TypeBuilder::new("AircraftInfo")
            .property("Code", ClrType::String)
            .register(&registry);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("AircraftInfo"));
        assert_eq!(registry.require("AircraftInfo").unwrap().properties.len(), 1);
        assert!(matches!(
            registry.require("Missing"),
            Err(crate::Error::TypeNotFound(name)) if name == "Missing"
        ));
    }

    #[test]
    fn test_insert_replaces() {
        let registry = TypeRegistry::new();
        TypeBuilder::new("AircraftInfo").register(&registry);
        TypeBuilder::new("AircraftInfo")
            .property("Code", ClrType::String)
            .register(&registry);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("AircraftInfo").unwrap().properties.len(), 1);
    }
}
