//! Annotations: named metadata values attached to model elements
//!
//! Every annotation records the configuration source that set it. A value
//! set by a weaker source never replaces one set by a stronger source, so
//! conventions can run repeatedly without clobbering explicit configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ModelError;

/// Where a piece of configuration came from
///
/// Ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationSource {
    /// Set by a model-building convention
    Convention,

    /// Set from an attribute/annotation on the mapped type
    DataAnnotation,

    /// Set explicitly by the user
    Explicit,
}

impl ConfigurationSource {
    /// Whether configuration from `self` may replace configuration from `existing`
    pub fn overrides(self, existing: ConfigurationSource) -> bool {
        self >= existing
    }
}

impl fmt::Display for ConfigurationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Convention => write!(f, "convention"),
            Self::DataAnnotation => write!(f, "data annotation"),
            Self::Explicit => write!(f, "explicit"),
        }
    }
}

/// Annotation payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    TextList(Vec<String>),
}

impl AnnotationValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Text(s) => write!(f, "{:?}", s),
            Self::TextList(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for AnnotationValue {
    fn from(value: Vec<String>) -> Self {
        Self::TextList(value)
    }
}

/// A named annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation name
    pub name: String,

    /// Annotation value
    pub value: AnnotationValue,

    /// Source of the value
    pub source: ConfigurationSource,
}

/// Name-ordered annotation bag with a read-only switch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    annotations: BTreeMap<String, Annotation>,
    read_only: bool,
}

impl AnnotationSet {
    /// Create an empty, writable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether writes are rejected
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Reject all further writes. Cannot be undone.
    pub fn freeze(&mut self) {
        self.read_only = true;
    }

    /// Consume the set and return it frozen
    pub fn into_frozen(mut self) -> Self {
        self.freeze();
        self
    }

    /// Look up an annotation by name
    pub fn get(&self, name: &str) -> Option<&Annotation> {
        self.annotations.get(name)
    }

    /// Look up an annotation value by name
    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.annotations.get(name).map(|a| &a.value)
    }

    /// Set an annotation
    ///
    /// Returns `Ok(false)` without changing anything when an existing
    /// annotation was set by a stronger source.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AnnotationValue>,
        source: ConfigurationSource,
    ) -> Result<bool, ModelError> {
        let name = name.into();
        self.ensure_mutable(&name)?;

        if let Some(existing) = self.annotations.get(&name) {
            if !source.overrides(existing.source) {
                return Ok(false);
            }
        }

        let value = value.into();
        self.annotations.insert(name.clone(), Annotation { name, value, source });
        Ok(true)
    }

    /// Remove an annotation
    ///
    /// Returns `Ok(None)` when the annotation is absent or was set by a
    /// stronger source than `source`.
    pub fn remove(&mut self, name: &str, source: ConfigurationSource) -> Result<Option<Annotation>, ModelError> {
        self.ensure_mutable(name)?;

        match self.annotations.get(name) {
            Some(existing) if source.overrides(existing.source) => Ok(self.annotations.remove(name)),
            _ => Ok(None),
        }
    }

    /// Iterate annotations in name order
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.values()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    fn ensure_mutable(&self, name: &str) -> Result<(), ModelError> {
        if self.read_only {
            return Err(ModelError::read_only(format!("annotation '{}'", name)));
        }
        Ok(())
    }
}
