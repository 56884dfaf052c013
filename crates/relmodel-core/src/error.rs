//! Model error types

/// Errors raised while building or mutating a model
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("{element} is read-only and cannot be modified")]
    ReadOnly { element: String },

    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("Entity type '{0}' already exists in the model")]
    DuplicateEntityType(String),

    #[error("Entity type {entity_type} already has overrides for {store_object}")]
    DuplicateOverrides {
        entity_type: String,
        store_object: String,
    },

    #[error("Invalid store object: {0}")]
    InvalidStoreObject(String),
}

impl ModelError {
    /// Read-only violation for the named model element
    pub fn read_only(element: impl Into<String>) -> Self {
        Self::ReadOnly {
            element: element.into(),
        }
    }
}
