//! Cached validation of tracked entities.
//!
//! The [`ValidationProvider`] builds the validator tree of each entity type once and keeps it
//! (or the fact that the type needs no validation) in a concurrent cache keyed by type name.
//! Cached trees are read-only, so entities can be validated from several threads at once.

use std::{collections::HashMap, sync::Arc};

use dashmap::DashMap;
use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    entry::{EntityEntry, MemberEntry, PropertyEntry},
    metadata::instance::Value,
    validation::{
        EntityValidationContext, EntityValidationResult, EntityValidator, EntityValidatorBuilder,
        PropertyValidator, ValidationConfig, ValidationError, ValidationItems,
    },
    Result,
};

/// Validates entities with cached validator trees.
///
/// A provider caches by entity type name and is meant to be used with a single model.
#[derive(Debug, Default)]
pub struct ValidationProvider {
    builder: EntityValidatorBuilder,
    cache: DashMap<String, Option<Arc<EntityValidator>>>,
}

impl ValidationProvider {
    /// Create a provider building validators with `config`
    #[must_use]
    pub fn new(config: ValidationConfig) -> Self {
        ValidationProvider {
            builder: EntityValidatorBuilder::new(config),
            cache: DashMap::new(),
        }
    }

    /// The configuration validators are built with
    #[must_use]
    pub fn config(&self) -> &ValidationConfig {
        self.builder.config()
    }

    /// The validator for the entity type of `entry`, built on first use
    ///
    /// # Errors
    /// Returns the errors of [`EntityValidatorBuilder::build_entity_validator`]. Failed builds
    /// are not cached.
    pub fn entity_validator(&self, entry: &EntityEntry) -> Result<Option<Arc<EntityValidator>>> {
        if let Some(cached) = self.cache.get(entry.entity_type()) {
            trace!("Validator cache hit for {}", entry.entity_type());
            return Ok(cached.value().clone());
        }

        let validator = self.builder.build_entity_validator(entry)?.map(Arc::new);
        let validator = self
            .cache
            .entry(entry.entity_type().to_string())
            .or_insert(validator)
            .value()
            .clone();

        debug!("Cached validator for {}", entry.entity_type());
        Ok(validator)
    }

    /// Validates an entity
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedValidation`] if user validation code fails, or an error
    /// if the validator cannot be built.
    pub fn validate(&self, entry: &EntityEntry) -> Result<EntityValidationResult> {
        self.validate_in(&EntityValidationContext::new(entry.clone()))
    }

    /// Validates an entity, passing `items` to every user validator
    ///
    /// # Errors
    /// As [`ValidationProvider::validate`].
    pub fn validate_with_items(
        &self,
        entry: &EntityEntry,
        items: HashMap<String, Value>,
    ) -> Result<EntityValidationResult> {
        let items: ValidationItems = Arc::new(items);
        self.validate_in(&EntityValidationContext::with_items(entry.clone(), items))
    }

    /// Validates many entities in parallel; results are in the order of `entries`
    ///
    /// # Errors
    /// Returns the first error encountered.
    pub fn validate_entries(&self, entries: &[EntityEntry]) -> Result<Vec<EntityValidationResult>> {
        entries.par_iter().map(|entry| self.validate(entry)).collect()
    }

    /// The validator of a property, walking down from the entity validator for nested
    /// properties. `None` if the property needs no validation.
    ///
    /// # Errors
    /// Returns an error if the entity validator cannot be built.
    pub fn property_validator(&self, member: &MemberEntry) -> Result<Option<PropertyValidator>> {
        let Some(entity_validator) = self.entity_validator(member.entity_entry())? else {
            return Ok(None);
        };

        Ok(match member {
            MemberEntry::Property(property) => {
                Self::nested_property_validator(&entity_validator, property)
            }
            other => entity_validator.property_validator(other.name()).cloned(),
        })
    }

    /// Validates a single (possibly nested) property
    ///
    /// # Errors
    /// Returns [`crate::Error::UnexpectedValidation`] if user validation code fails, or an error
    /// if the validator cannot be built.
    pub fn validate_property(&self, member: &MemberEntry) -> Result<Vec<ValidationError>> {
        match self.property_validator(member)? {
            Some(validator) => validator.validate(
                &EntityValidationContext::new(member.entity_entry().clone()),
                member,
            ),
            None => Ok(Vec::new()),
        }
    }

    fn validate_in(&self, context: &EntityValidationContext) -> Result<EntityValidationResult> {
        match self.entity_validator(context.entry())? {
            Some(validator) => validator.validate(context),
            None => Ok(EntityValidationResult::new(
                context.entry().clone(),
                Vec::new(),
            )),
        }
    }

    fn nested_property_validator(
        entity_validator: &EntityValidator,
        property: &PropertyEntry,
    ) -> Option<PropertyValidator> {
        match property.parent_property() {
            None => entity_validator.property_validator(property.name()).cloned(),
            Some(parent) => Self::nested_property_validator(entity_validator, parent)?
                .complex_type_validator()?
                .property_validator(property.name())
                .cloned(),
        }
    }
}
