//! Store object identifiers
//!
//! A store object is the physical target an entity type maps to: a table,
//! a view, a raw SQL query, a database function or one of the stored
//! procedures used for modification.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Kind of store object an entity type can be mapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreObjectType {
    /// A table
    Table,

    /// A view
    View,

    /// A SQL query used as a source
    SqlQuery,

    /// A table-valued database function
    Function,

    /// Stored procedure used to insert rows
    InsertStoredProcedure,

    /// Stored procedure used to delete rows
    DeleteStoredProcedure,

    /// Stored procedure used to update rows
    UpdateStoredProcedure,
}

impl StoreObjectType {
    /// Stable lowercase identifier, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::View => "view",
            Self::SqlQuery => "sql_query",
            Self::Function => "function",
            Self::InsertStoredProcedure => "insert_stored_procedure",
            Self::DeleteStoredProcedure => "delete_stored_procedure",
            Self::UpdateStoredProcedure => "update_stored_procedure",
        }
    }

    /// Whether store objects of this kind can carry a schema
    pub fn is_schema_qualified(&self) -> bool {
        !matches!(self, Self::SqlQuery | Self::Function)
    }
}

impl fmt::Display for StoreObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreObjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "view" => Ok(Self::View),
            "sql_query" => Ok(Self::SqlQuery),
            "function" => Ok(Self::Function),
            "insert_stored_procedure" => Ok(Self::InsertStoredProcedure),
            "delete_stored_procedure" => Ok(Self::DeleteStoredProcedure),
            "update_stored_procedure" => Ok(Self::UpdateStoredProcedure),
            other => Err(format!("unknown store object kind '{}'", other)),
        }
    }
}

/// Identifies a table-like store object
///
/// Two identifiers are equal when name, schema and kind all match.
/// Ordering compares the name first with ordinal (byte-wise) comparison,
/// then schema, then kind, so enumeration over an ordered map is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreObjectIdentifier {
    /// Object name
    pub name: String,

    /// Schema name, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Object kind
    #[serde(rename = "kind")]
    pub object_type: StoreObjectType,
}

impl StoreObjectIdentifier {
    /// Create an identifier of an arbitrary kind
    pub fn new(object_type: StoreObjectType, name: impl Into<String>, schema: Option<String>) -> Self {
        Self {
            name: name.into(),
            schema,
            object_type,
        }
    }

    /// Identifier for a table
    pub fn table(name: impl Into<String>, schema: Option<String>) -> Self {
        Self::new(StoreObjectType::Table, name, schema)
    }

    /// Identifier for a view
    pub fn view(name: impl Into<String>, schema: Option<String>) -> Self {
        Self::new(StoreObjectType::View, name, schema)
    }

    /// Identifier for a SQL query (never schema-qualified)
    pub fn sql_query(name: impl Into<String>) -> Self {
        Self::new(StoreObjectType::SqlQuery, name, None)
    }

    /// Identifier for a database function
    pub fn function(name: impl Into<String>) -> Self {
        Self::new(StoreObjectType::Function, name, None)
    }

    /// Identifier for an insert stored procedure
    pub fn insert_stored_procedure(name: impl Into<String>, schema: Option<String>) -> Self {
        Self::new(StoreObjectType::InsertStoredProcedure, name, schema)
    }

    /// Identifier for a delete stored procedure
    pub fn delete_stored_procedure(name: impl Into<String>, schema: Option<String>) -> Self {
        Self::new(StoreObjectType::DeleteStoredProcedure, name, schema)
    }

    /// Identifier for an update stored procedure
    pub fn update_stored_procedure(name: impl Into<String>, schema: Option<String>) -> Self {
        Self::new(StoreObjectType::UpdateStoredProcedure, name, schema)
    }

    /// Schema-qualified name (`schema.name`, or just `name`)
    pub fn display_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Fill in `schema` when the identifier has none and its kind allows one
    pub fn with_default_schema(mut self, default_schema: Option<&str>) -> Self {
        if self.schema.is_none() && self.object_type.is_schema_qualified() {
            self.schema = default_schema.map(str::to_string);
        }
        self
    }
}

impl Ord for StoreObjectIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .as_bytes()
            .cmp(other.name.as_bytes())
            .then_with(|| self.schema.cmp(&other.schema))
            .then_with(|| self.object_type.cmp(&other.object_type))
    }
}

impl PartialOrd for StoreObjectIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StoreObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.object_type, self.display_name())
    }
}
