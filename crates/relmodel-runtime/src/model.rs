//! Runtime model: entity types plus their per-store-object overrides

use std::collections::{BTreeMap, HashMap};

use relmodel_core::{EntityTypeId, ModelError, OverridesView, StoreObjectIdentifier};

use crate::entity_type::RuntimeEntityType;
use crate::overrides::RuntimeEntityTypeOverrides;

/// A finalized model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeModel {
    /// Entity types keyed by id (ids follow insertion order)
    entity_types: BTreeMap<EntityTypeId, RuntimeEntityType>,

    /// Entity type name -> id
    names: HashMap<String, EntityTypeId>,

    /// Side-table: entity type -> store object -> overrides
    overrides: HashMap<EntityTypeId, BTreeMap<StoreObjectIdentifier, RuntimeEntityTypeOverrides>>,
}

impl RuntimeModel {
    /// Assemble a runtime model
    ///
    /// Fails if two entity types share an id or a name, if an override
    /// record points at an entity type that is not part of the model, or if
    /// two records share an (entity type, store object) pair.
    pub fn from_parts(
        entity_types: impl IntoIterator<Item = RuntimeEntityType>,
        overrides: impl IntoIterator<Item = RuntimeEntityTypeOverrides>,
    ) -> Result<Self, ModelError> {
        let mut model = Self::default();

        for entity_type in entity_types {
            if model.names.contains_key(entity_type.name())
                || model.entity_types.contains_key(&entity_type.id())
            {
                return Err(ModelError::DuplicateEntityType(entity_type.name().to_string()));
            }
            model.names.insert(entity_type.name().to_string(), entity_type.id());
            model.entity_types.insert(entity_type.id(), entity_type);
        }

        for record in overrides {
            let owner = record.entity_type();
            if !model.entity_types.contains_key(&owner) {
                return Err(ModelError::UnknownEntityType(owner.to_string()));
            }

            let map = model.overrides.entry(owner).or_default();
            if map.contains_key(record.store_object()) {
                return Err(ModelError::DuplicateOverrides {
                    entity_type: owner.to_string(),
                    store_object: record.store_object().to_string(),
                });
            }
            map.insert(record.store_object().clone(), record);
        }

        Ok(model)
    }

    pub fn entity_type(&self, id: EntityTypeId) -> Option<&RuntimeEntityType> {
        self.entity_types.get(&id)
    }

    pub fn entity_type_by_name(&self, name: &str) -> Option<&RuntimeEntityType> {
        self.names.get(name).and_then(|id| self.entity_types.get(id))
    }

    /// All entity types in insertion order
    pub fn entity_types(&self) -> impl Iterator<Item = &RuntimeEntityType> {
        self.entity_types.values()
    }

    /// Overrides of `entity_type` for exactly `store_object`
    pub fn find_overrides(
        &self,
        entity_type: EntityTypeId,
        store_object: &StoreObjectIdentifier,
    ) -> Option<&RuntimeEntityTypeOverrides> {
        self.overrides.get(&entity_type)?.get(store_object)
    }

    /// All overrides of `entity_type`, ordered by store object name
    ///
    /// `None` if the entity type never had overrides configured.
    pub fn overrides(
        &self,
        entity_type: EntityTypeId,
    ) -> Option<impl Iterator<Item = &RuntimeEntityTypeOverrides>> {
        self.overrides.get(&entity_type).map(|map| map.values())
    }
}
