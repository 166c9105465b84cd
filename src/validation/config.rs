//! Validation configuration for validator tree construction
//!
//! This module provides configuration options that decide which validator families the builder
//! adds to a validator tree, and how deep nested complex types may be.

/// Configuration for building validator trees
///
/// Attribute validators come from validation attributes declared on properties, facet validators
/// are inferred from model metadata (nullability, maximum length, required navigation
/// properties), and type-level validators come from attributes and self-validation logic
/// declared on the types themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ValidationConfig {
    /// Build validators for validation attributes declared on properties
    pub enable_attribute_validation: bool,

    /// Build validators inferred from model facets
    /// Suppressed per property when an equivalent attribute is declared
    pub enable_facet_validation: bool,

    /// Build type-level validators (type attributes and self-validating types)
    pub enable_type_level_validation: bool,

    /// Maximum nesting depth of complex types (default: 32)
    /// Guards against complex types that contain themselves
    pub max_complex_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enable_attribute_validation: true,
            enable_facet_validation: true,
            enable_type_level_validation: true,
            max_complex_depth: 32,
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration that builds no validators at all
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enable_attribute_validation: false,
            enable_facet_validation: false,
            enable_type_level_validation: false,
            max_complex_depth: 0,
        }
    }

    /// Creates a configuration that only validates declared property attributes
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            enable_attribute_validation: true,
            enable_facet_validation: false,
            enable_type_level_validation: false,
            max_complex_depth: 32,
        }
    }

    /// Creates a configuration with all validators enabled and a shallow nesting bound
    ///
    /// Models nesting complex types deeper than 8 levels fail to build with
    /// [`crate::Error::RecursionLimit`].
    #[must_use]
    pub fn strict() -> Self {
        Self {
            enable_attribute_validation: true,
            enable_facet_validation: true,
            enable_type_level_validation: true,
            max_complex_depth: 8,
        }
    }

    /// Returns `true` if no validator family is enabled
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        !self.enable_attribute_validation
            && !self.enable_facet_validation
            && !self.enable_type_level_validation
    }
}
