//! Ordered lists of type names.

use crate::errors::{CodecError, CodecResult};
use crate::registry::TypeRegistry;
use crate::value::Value;

/// Ordered list of type names describing a fixed layout.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Template(Vec<String>);

impl Template {
    /// Constructs a new instance.
    pub fn new(entries: Vec<String>) -> Self {
        Self(entries)
    }

    /// Builds a template that fits a list of values, using
    /// [`TypeRegistry::resolve_type`] for each.
    pub fn infer(registry: &TypeRegistry, values: &[Value]) -> CodecResult<Self> {
        values
            .iter()
            .map(|v| {
                registry
                    .resolve_type(v)
                    .map(str::to_owned)
                    .ok_or_else(|| CodecError::Unresolvable(v.clone()))
            })
            .collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the entries.
    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Iterates over the entry names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Computes the total encoded length against a registry.
    pub fn byte_len(&self, registry: &TypeRegistry) -> CodecResult<usize> {
        self.iter().try_fold(0usize, |acc, name| {
            let size = registry.size_of(name)?;
            acc.checked_add(size).ok_or(CodecError::OutOfBounds {
                offset: i64::MAX,
                len: usize::MAX,
            })
        })
    }
}

impl FromIterator<String> for Template {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for Template {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_owned).collect()
    }
}

impl From<Vec<String>> for Template {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl From<&[&str]> for Template {
    fn from(v: &[&str]) -> Self {
        v.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for Template {
    fn from(v: [&str; N]) -> Self {
        v.into_iter().collect()
    }
}
