//! Error types for node schemas and node trees

use thiserror::Error;

/// Result type for crate-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while declaring a node type.
///
/// A type that fails to compile never exists, so none of these can be
/// observed on an instance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Expected default of {expected} for {field}, got {actual}.")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Attribute override cannot be used on schema field: {field}")]
    OverrideOnSchemaField { field: String },

    #[error("{type_name} assigns a default to undeclared field: {field}")]
    UndeclaredField { type_name: String, field: String },

    #[error("{type_name} extends conflicting node kinds: {first} and {second}")]
    ConflictingKinds {
        type_name: String,
        first: String,
        second: String,
    },

    #[error("{type_name} must declare exactly one value field, found {count}")]
    ValueFieldCount { type_name: String, count: usize },

    #[error("Invalid identifier for {type_name}: {identifier:?}")]
    InvalidIdentifier {
        type_name: String,
        identifier: String,
    },

    #[error("{type_name} key refers to unknown field: {field}")]
    UnknownKeyField { type_name: String, field: String },
}

/// Errors raised while constructing, appending to or editing a node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("{type_name} takes {expected} arguments, but {given} were given.")]
    Arity {
        type_name: String,
        expected: usize,
        given: usize,
    },

    #[error("Missing required argument: {field}")]
    MissingArgument { field: String },

    #[error("Expected {expected} for {field}, got {actual}.")]
    ArgumentType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Node base types cannot be directly instantiated: {type_name}")]
    Instantiation { type_name: String },

    #[error("{type_name} has no value for schema field: {field}")]
    MissingSchemaValue { type_name: String, field: String },

    #[error("{type_name} has no field: {field}")]
    UnknownField { type_name: String, field: String },

    #[error("{type_name} is a {kind} node and does not support {operation}")]
    WrongKind {
        type_name: String,
        kind: String,
        operation: &'static str,
    },
}

/// Crate-level errors
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
