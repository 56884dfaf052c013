//! Finalized, read-only relational model
//!
//! Everything in this crate is immutable once constructed. A runtime model
//! is produced by compiling a builder-phase model and can be shared across
//! threads freely.

pub mod entity_type;
pub mod model;
pub mod overrides;

pub use entity_type::RuntimeEntityType;
pub use model::RuntimeModel;
pub use overrides::RuntimeEntityTypeOverrides;
