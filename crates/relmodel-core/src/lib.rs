//! relmodel Core
//!
//! Value types shared by the building and runtime phases of a relational
//! model: store object identifiers, annotations and configuration.

pub mod annotation;
pub mod config;
pub mod entity;
pub mod error;
pub mod store_object;

pub use annotation::{Annotation, AnnotationSet, AnnotationValue, ConfigurationSource};
pub use config::{Config, ConfigError, OutputFormat};
pub use entity::{EntityTypeId, OverridesView};
pub use error::ModelError;
pub use store_object::{StoreObjectIdentifier, StoreObjectType};
