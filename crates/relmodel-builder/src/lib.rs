//! Relational model building
//!
//! This crate handles:
//! - Registering entity types and their annotations
//! - Per-store-object override records (find, enumerate, get-or-create)
//! - Finalizing entity types and compiling the runtime model
//! - Loading model definitions from TOML

pub mod builder;
pub mod definition;
pub mod entity_type;
pub mod overrides;

pub use builder::ModelBuilder;
pub use definition::{DefinitionError, EntityTypeDefinition, ModelDefinition, OverridesDefinition};
pub use entity_type::EntityType;
pub use overrides::EntityTypeOverrides;
pub use relmodel_core::OverridesView;
