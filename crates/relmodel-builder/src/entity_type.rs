//! Builder-phase entity types

use relmodel_core::{Annotation, AnnotationSet, AnnotationValue, ConfigurationSource, EntityTypeId, ModelError};

/// An entity type while the model is being built
///
/// Becomes read-only when the model builder finalizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    id: EntityTypeId,
    name: String,
    annotations: AnnotationSet,
}

impl EntityType {
    pub(crate) fn new(id: EntityTypeId, name: String) -> Self {
        Self {
            id,
            name,
            annotations: AnnotationSet::new(),
        }
    }

    pub fn id(&self) -> EntityTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_read_only(&self) -> bool {
        self.annotations.is_read_only()
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn find_annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations.get(name)
    }

    /// Set an annotation on the entity type itself
    pub fn set_annotation(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AnnotationValue>,
        source: ConfigurationSource,
    ) -> Result<bool, ModelError> {
        self.annotations
            .set(name, value, source)
            .map_err(|_| self.read_only_error())
    }

    pub fn remove_annotation(
        &mut self,
        name: &str,
        source: ConfigurationSource,
    ) -> Result<Option<Annotation>, ModelError> {
        self.annotations
            .remove(name, source)
            .map_err(|_| self.read_only_error())
    }

    pub(crate) fn freeze(&mut self) {
        self.annotations.freeze();
    }

    pub(crate) fn read_only_error(&self) -> ModelError {
        ModelError::read_only(format!("entity type '{}'", self.name))
    }

    pub(crate) fn into_parts(self) -> (EntityTypeId, String, AnnotationSet) {
        (self.id, self.name, self.annotations)
    }
}
