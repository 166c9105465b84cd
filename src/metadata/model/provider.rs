use std::sync::Arc;

use dashmap::DashMap;

use crate::{
    metadata::{
        model::{StructuralType, StructuralTypeRc},
        typesystem::{TypeDescriptorRc, TypeRegistry},
    },
    Error::TypeNotFound,
    Result,
};

/// Read access to CLR type descriptors and model metadata.
///
/// Entries, the path resolver and the validator builder only ever see the model through this
/// trait, so any metadata source can back them.
pub trait MetadataProvider: Send + Sync {
    /// The CLR descriptor of the named type
    fn clr_type(&self, name: &str) -> Option<TypeDescriptorRc>;

    /// The model metadata of the named entity or complex type
    fn structural_type(&self, name: &str) -> Option<StructuralTypeRc>;

    /// The CLR descriptor of the named type, failing if it is unknown
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the type is not described.
    fn require_clr_type(&self, name: &str) -> Result<TypeDescriptorRc> {
        self.clr_type(name).ok_or_else(|| TypeNotFound(name.to_string()))
    }

    /// The model metadata of the named type, failing if it is not mapped
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the type is not part of the model.
    fn require_structural_type(&self, name: &str) -> Result<StructuralTypeRc> {
        self.structural_type(name)
            .ok_or_else(|| TypeNotFound(name.to_string()))
    }
}

/// In-memory model: a [`TypeRegistry`] of CLR types plus the mapped structural types
#[derive(Debug, Default)]
pub struct Model {
    types: TypeRegistry,
    structural_types: DashMap<String, StructuralTypeRc>,
}

impl Model {
    /// Create an empty model
    #[must_use]
    pub fn new() -> Self {
        Model::default()
    }

    /// The CLR type registry, used to describe the classes of the model
    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Map a structural type, replacing any type of the same name
    ///
    /// ## Arguments
    /// * 'structural_type' - Model metadata of an entity or complex type
    pub fn add_structural_type(&self, structural_type: StructuralType) -> StructuralTypeRc {
        let structural_type = Arc::new(structural_type);
        self.structural_types
            .insert(structural_type.name.clone(), structural_type.clone());
        structural_type
    }
}

impl MetadataProvider for Model {
    fn clr_type(&self, name: &str) -> Option<TypeDescriptorRc> {
        self.types.get(name)
    }

    fn structural_type(&self, name: &str) -> Option<StructuralTypeRc> {
        self.structural_types
            .get(name)
            .map(|entry| entry.value().clone())
    }
}
