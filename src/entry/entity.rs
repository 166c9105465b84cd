use std::{collections::HashSet, fmt, sync::Arc};

use crate::{
    metadata::{
        instance::{Instance, InstanceRc, Value},
        model::{MetadataProvider, StructuralKind, StructuralTypeRc},
        typesystem::TypeDescriptorRc,
    },
    Error::TypeNotFound,
    Result,
};

struct EntityEntryInner {
    entity: InstanceRc,
    original: InstanceRc,
    clr_type: TypeDescriptorRc,
    structural_type: StructuralTypeRc,
    model: Arc<dyn MetadataProvider>,
}

/// A tracked entity: the live instance, a snapshot of its original values, and the metadata
/// describing its type.
///
/// Cloning an entry is cheap and yields a handle to the same tracked entity.
#[derive(Clone)]
pub struct EntityEntry {
    inner: Arc<EntityEntryInner>,
}

impl EntityEntry {
    /// Start tracking `entity`, snapshotting its current values as the original values.
    ///
    /// Complex objects are copied into the snapshot. Related entities and any other objects stay
    /// shared, so the original value of a reference navigation is the related entity itself.
    ///
    /// ## Arguments
    /// * 'model'  - The metadata describing the entity type
    /// * 'entity' - The live entity instance
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the type of `entity` is not a mapped entity type
    /// with a CLR descriptor.
    pub fn new(model: Arc<dyn MetadataProvider>, entity: InstanceRc) -> Result<Self> {
        let type_name = entity.type_name();
        let structural_type = model.require_structural_type(type_name)?;
        if structural_type.kind != StructuralKind::Entity {
            return Err(TypeNotFound(format!("{type_name} is not an entity type")));
        }
        let clr_type = model.require_clr_type(type_name)?;

        Ok(EntityEntry {
            inner: Arc::new(EntityEntryInner {
                original: snapshot_instance(model.as_ref(), &entity),
                entity,
                clr_type,
                structural_type,
                model,
            }),
        })
    }

    /// The live entity instance
    #[must_use]
    pub fn entity(&self) -> &InstanceRc {
        &self.inner.entity
    }

    /// Name of the entity type
    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.inner.clr_type.name
    }

    /// The CLR descriptor of the entity type
    #[must_use]
    pub fn clr_type(&self) -> &TypeDescriptorRc {
        &self.inner.clr_type
    }

    /// The model metadata of the entity type
    #[must_use]
    pub fn structural_type(&self) -> &StructuralTypeRc {
        &self.inner.structural_type
    }

    /// The metadata provider the entry was created with
    #[must_use]
    pub fn model(&self) -> &Arc<dyn MetadataProvider> {
        &self.inner.model
    }

    /// The snapshot of original values
    #[must_use]
    pub fn original_values(&self) -> &InstanceRc {
        &self.inner.original
    }

    /// Current value of a top-level property
    #[must_use]
    pub fn current_value(&self, name: &str) -> Value {
        self.inner.entity.get(name)
    }

    /// Write the current value of a top-level property
    pub fn set_current_value(&self, name: &str, value: impl Into<Value>) {
        self.inner.entity.set(name, value);
    }

    /// Original value of a top-level property
    #[must_use]
    pub fn original_value(&self, name: &str) -> Value {
        self.inner.original.get(name)
    }

    /// Write the original value of a top-level property
    pub fn set_original_value(&self, name: &str, value: impl Into<Value>) {
        self.inner
            .original
            .set(name, snapshot_value(self.inner.model.as_ref(), value.into()));
    }

    /// Returns `true` if both handles track the same entity
    #[must_use]
    pub fn ptr_eq(&self, other: &EntityEntry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn is_complex_object(model: &dyn MetadataProvider, instance: &Instance) -> bool {
    model
        .structural_type(instance.type_name())
        .is_some_and(|structural_type| structural_type.kind == StructuralKind::Complex)
}

fn snapshot_instance(model: &dyn MetadataProvider, instance: &Instance) -> InstanceRc {
    instance.copy_with(|value| snapshot_value(model, value))
}

/// Copies complex objects contained in `value`, sharing everything else
pub(crate) fn snapshot_value(model: &dyn MetadataProvider, value: Value) -> Value {
    match value {
        Value::Object(instance) if is_complex_object(model, &instance) => {
            Value::Object(snapshot_instance(model, &instance))
        }
        other => other,
    }
}

/// Compares two values, complex objects by content and all other objects by identity
pub(crate) fn values_equal(model: &dyn MetadataProvider, left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Object(a), Value::Object(b))
            if !Arc::ptr_eq(a, b)
                && a.type_name() == b.type_name()
                && is_complex_object(model, a) =>
        {
            let (a, b) = (a.fields(), b.fields());
            let names: HashSet<&String> = a.keys().chain(b.keys()).collect();
            names.into_iter().all(|name| {
                values_equal(
                    model,
                    a.get(name).unwrap_or(&Value::Null),
                    b.get(name).unwrap_or(&Value::Null),
                )
            })
        }
        _ => left == right,
    }
}

impl fmt::Debug for EntityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityEntry")
            .field("entity_type", &self.entity_type())
            .field("entity", &self.inner.entity)
            .finish_non_exhaustive()
    }
}
