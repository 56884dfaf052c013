//! Model builder: the mutable phase of a relational model
//!
//! The builder owns every entity type and a side-table of override records
//! keyed by (entity type, store object). Each entity type can be finalized
//! on its own, which freezes it and all of its override records; consuming
//! the builder with [`ModelBuilder::finalize`] compiles the whole model into
//! an immutable [`RuntimeModel`].

use std::collections::{BTreeMap, HashMap};

use relmodel_core::{Config, EntityTypeId, ModelError, StoreObjectIdentifier};
use relmodel_runtime::{RuntimeEntityType, RuntimeEntityTypeOverrides, RuntimeModel};

use crate::entity_type::EntityType;
use crate::overrides::EntityTypeOverrides;

/// Store object -> overrides, ordered by store object name
type OverridesMap = BTreeMap<StoreObjectIdentifier, EntityTypeOverrides>;

/// Builder-phase model context
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    /// Configuration the model is built with
    config: Config,

    /// Entity types, indexed by id
    entity_types: Vec<EntityType>,

    /// Entity type name -> id
    names: HashMap<String, EntityTypeId>,

    /// Side-table of override records per entity type
    overrides: HashMap<EntityTypeId, OverridesMap>,
}

impl ModelBuilder {
    /// Create an empty builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Add an entity type; names must be unique
    pub fn add_entity_type(&mut self, name: impl Into<String>) -> Result<EntityTypeId, ModelError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(ModelError::DuplicateEntityType(name));
        }

        let id = EntityTypeId(self.entity_types.len() as u32);
        tracing::debug!(entity_type = %name, %id, "added entity type");

        self.names.insert(name.clone(), id);
        self.entity_types.push(EntityType::new(id, name));
        Ok(id)
    }

    pub fn entity_type(&self, id: EntityTypeId) -> Option<&EntityType> {
        self.entity_types.get(id.0 as usize)
    }

    pub fn entity_type_by_name(&self, name: &str) -> Option<&EntityType> {
        self.names.get(name).and_then(|id| self.entity_type(*id))
    }

    /// Mutable access to an entity type that has not been finalized
    pub fn entity_type_mut(&mut self, id: EntityTypeId) -> Result<&mut EntityType, ModelError> {
        let entity_type = self
            .entity_types
            .get_mut(id.0 as usize)
            .ok_or_else(|| ModelError::UnknownEntityType(id.to_string()))?;

        if entity_type.is_read_only() {
            return Err(entity_type.read_only_error());
        }
        Ok(entity_type)
    }

    /// All entity types in insertion order
    pub fn entity_types(&self) -> impl Iterator<Item = &EntityType> {
        self.entity_types.iter()
    }

    /// Overrides of `entity_type` for exactly `store_object`
    pub fn find_overrides(
        &self,
        entity_type: EntityTypeId,
        store_object: &StoreObjectIdentifier,
    ) -> Option<&EntityTypeOverrides> {
        self.overrides.get(&entity_type)?.get(store_object)
    }

    /// All overrides of `entity_type`, ordered by store object name
    ///
    /// `None` if no override was ever created for the entity type.
    pub fn overrides(
        &self,
        entity_type: EntityTypeId,
    ) -> Option<impl Iterator<Item = &EntityTypeOverrides>> {
        self.overrides.get(&entity_type).map(|map| map.values())
    }

    /// Return the overrides of `entity_type` for `store_object`, creating an
    /// empty record on first access
    pub fn get_or_create_overrides(
        &mut self,
        entity_type: EntityTypeId,
        store_object: StoreObjectIdentifier,
    ) -> Result<&mut EntityTypeOverrides, ModelError> {
        self.ensure_writable(entity_type)?;
        if store_object.name.is_empty() {
            return Err(ModelError::InvalidStoreObject(format!(
                "{} name must not be empty",
                store_object.object_type
            )));
        }

        let map = self.overrides.entry(entity_type).or_default();
        let record = map.entry(store_object).or_insert_with_key(|key| {
            tracing::debug!(entity_type = %entity_type, store_object = %key, "created entity type overrides");
            EntityTypeOverrides::new(entity_type, key.clone())
        });
        Ok(record)
    }

    /// Mutable access to existing overrides, without creating them
    pub fn overrides_mut(
        &mut self,
        entity_type: EntityTypeId,
        store_object: &StoreObjectIdentifier,
    ) -> Result<Option<&mut EntityTypeOverrides>, ModelError> {
        self.ensure_writable(entity_type)?;
        Ok(self
            .overrides
            .get_mut(&entity_type)
            .and_then(|map| map.get_mut(store_object)))
    }

    /// Remove the overrides of `entity_type` for `store_object`
    ///
    /// The entity type's map is dropped once its last record goes, so
    /// [`overrides`](Self::overrides) reports `None` again.
    pub fn remove_overrides(
        &mut self,
        entity_type: EntityTypeId,
        store_object: &StoreObjectIdentifier,
    ) -> Result<Option<EntityTypeOverrides>, ModelError> {
        self.ensure_writable(entity_type)?;

        let Some(map) = self.overrides.get_mut(&entity_type) else {
            return Ok(None);
        };
        let removed = map.remove(store_object);
        if map.is_empty() {
            self.overrides.remove(&entity_type);
        }

        if removed.is_some() {
            tracing::debug!(entity_type = %entity_type, store_object = %store_object, "removed entity type overrides");
        }
        Ok(removed)
    }

    /// Make an entity type and all of its overrides read-only
    ///
    /// Calling this again for the same entity type has no effect.
    pub fn finalize_entity_type(&mut self, id: EntityTypeId) -> Result<(), ModelError> {
        let entity_type = self
            .entity_types
            .get_mut(id.0 as usize)
            .ok_or_else(|| ModelError::UnknownEntityType(id.to_string()))?;
        if entity_type.is_read_only() {
            return Ok(());
        }

        entity_type.freeze();
        if let Some(map) = self.overrides.get_mut(&id) {
            map.values_mut().for_each(EntityTypeOverrides::freeze);
        }

        tracing::debug!(entity_type = %entity_type.name(), %id, "finalized entity type");
        Ok(())
    }

    /// Compile the model into its immutable runtime form
    pub fn finalize(self) -> Result<RuntimeModel, ModelError> {
        let runtime_types: Vec<RuntimeEntityType> = self
            .entity_types
            .into_iter()
            .map(|entity_type| {
                let (id, name, annotations) = entity_type.into_parts();
                RuntimeEntityType::new(id, name, annotations)
            })
            .collect();

        let mut records = Vec::new();
        for (owner, map) in self.overrides {
            let runtime_owner = runtime_types
                .get(owner.0 as usize)
                .ok_or_else(|| ModelError::UnknownEntityType(owner.to_string()))?;

            for overrides in map.into_values() {
                let (store_object, annotations) = overrides.into_parts();
                records.push(RuntimeEntityTypeOverrides::new(runtime_owner, store_object, annotations));
            }
        }

        tracing::info!(
            entity_types = runtime_types.len(),
            overrides = records.len(),
            "finalized model"
        );
        RuntimeModel::from_parts(runtime_types, records)
    }

    fn ensure_writable(&self, id: EntityTypeId) -> Result<(), ModelError> {
        let entity_type = self
            .entity_type(id)
            .ok_or_else(|| ModelError::UnknownEntityType(id.to_string()))?;
        if entity_type.is_read_only() {
            return Err(entity_type.read_only_error());
        }
        Ok(())
    }
}
