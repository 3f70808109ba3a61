//! Per-dialect type-map registry.
//!
//! A [`TypeMap`] resolves a [`GenericType`] plus a requested size to a SQL
//! type template. Each generic type may have any number of size-bounded
//! entries and one unbounded default. Resolution picks the bounded entry with
//! the smallest ceiling that still fits the size, and falls back to the
//! default when the size is unspecified (`0`) or larger than every ceiling.
//!
//! Templates may contain the placeholders `$size` and `$precision`, which are
//! replaced with the requested values.
//!
//! Maps are populated through a [`TypeMapBuilder`] and are read-only once
//! built.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::types::GenericType;

const SIZE_PLACEHOLDER: &str = "$size";
const PRECISION_PLACEHOLDER: &str = "$precision";

#[derive(Debug, Clone, Default)]
struct Templates {
    /// Keyed by inclusive size ceiling.
    bounded: BTreeMap<u32, String>,
    unbounded: Option<String>,
}

/// Collects type-map entries before freezing them into a [`TypeMap`].
#[derive(Debug, Clone)]
pub struct TypeMapBuilder {
    dialect: &'static str,
    entries: HashMap<GenericType, Templates>,
}

impl TypeMapBuilder {
    /// Creates an empty builder for the named dialect.
    #[must_use]
    pub fn new(dialect: &'static str) -> Self {
        Self {
            dialect,
            entries: HashMap::new(),
        }
    }

    /// Registers the unbounded default template for a type.
    #[must_use]
    pub fn set(mut self, ty: GenericType, template: impl Into<String>) -> Self {
        self.entries.entry(ty).or_default().unbounded = Some(template.into());
        self
    }

    /// Registers a template used for sizes up to and including `max_size`.
    #[must_use]
    pub fn set_bounded(mut self, ty: GenericType, template: impl Into<String>, max_size: u32) -> Self {
        self.entries
            .entry(ty)
            .or_default()
            .bounded
            .insert(max_size, template.into());
        self
    }

    /// Freezes the registered entries.
    #[must_use]
    pub fn build(self) -> TypeMap {
        TypeMap {
            dialect: self.dialect,
            entries: self.entries,
        }
    }
}

/// An immutable registry of type templates for one dialect.
#[derive(Debug, Clone)]
pub struct TypeMap {
    dialect: &'static str,
    entries: HashMap<GenericType, Templates>,
}

impl TypeMap {
    /// Starts a new map for the named dialect.
    #[must_use]
    pub fn builder(dialect: &'static str) -> TypeMapBuilder {
        TypeMapBuilder::new(dialect)
    }

    /// Returns the name of the dialect this map belongs to.
    #[must_use]
    pub const fn dialect(&self) -> &'static str {
        self.dialect
    }

    /// Returns the raw template that `resolve` would use, without
    /// substituting placeholders.
    #[must_use]
    pub fn template(&self, ty: GenericType, size: u32) -> Option<&str> {
        let templates = self.entries.get(&ty)?;
        let bounded = if size == 0 {
            None
        } else {
            templates.bounded.range(size..).next().map(|(_, t)| t)
        };
        bounded.or(templates.unbounded.as_ref()).map(String::as_str)
    }

    /// Resolves a generic type to SQL, substituting `$size` and `$precision`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnmappedType`] when no bounded entry fits and there
    /// is no default for the type.
    pub fn resolve(&self, ty: GenericType, size: u32, precision: u32) -> Result<String> {
        let template = self.template(ty, size).ok_or(Error::UnmappedType {
            dialect: self.dialect,
            generic_type: ty,
            size,
        })?;
        Ok(template
            .replace(SIZE_PLACEHOLDER, &size.to_string())
            .replace(PRECISION_PLACEHOLDER, &precision.to_string()))
    }

    /// Returns true if any entry exists for the type.
    #[must_use]
    pub fn contains(&self, ty: GenericType) -> bool {
        self.entries.contains_key(&ty)
    }
}
