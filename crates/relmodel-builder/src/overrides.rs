//! Builder-phase override records
//!
//! An override record holds facet values that replace an entity type's
//! defaults when it is mapped to one particular store object. Records are
//! created through [`ModelBuilder::get_or_create_overrides`] and freeze
//! together with their entity type.
//!
//! [`ModelBuilder::get_or_create_overrides`]: crate::ModelBuilder::get_or_create_overrides

use relmodel_core::{
    Annotation, AnnotationSet, AnnotationValue, ConfigurationSource, EntityTypeId, ModelError,
    OverridesView, StoreObjectIdentifier,
};

/// Mutable facet overrides of an entity type for one store object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeOverrides {
    entity_type: EntityTypeId,
    store_object: StoreObjectIdentifier,
    annotations: AnnotationSet,
}

impl EntityTypeOverrides {
    pub(crate) fn new(entity_type: EntityTypeId, store_object: StoreObjectIdentifier) -> Self {
        Self {
            entity_type,
            store_object,
            annotations: AnnotationSet::new(),
        }
    }

    /// Set an override facet
    ///
    /// Returns `Ok(false)` when a stronger source already set the facet.
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

    /// Remove an override facet
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

    pub(crate) fn into_parts(self) -> (StoreObjectIdentifier, AnnotationSet) {
        (self.store_object, self.annotations)
    }

    fn read_only_error(&self) -> ModelError {
        ModelError::read_only(format!(
            "overrides of entity type {} for {}",
            self.entity_type, self.store_object
        ))
    }
}

impl OverridesView for EntityTypeOverrides {
    fn entity_type(&self) -> EntityTypeId {
        self.entity_type
    }

    fn store_object(&self) -> &StoreObjectIdentifier {
        &self.store_object
    }

    fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }
}
