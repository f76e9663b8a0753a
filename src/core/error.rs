//! Typed error handling for the resolver binder
//!
//! Every failure is detected while the stack is being defined and aborts the
//! definition before anything is handed to the deployment engine.
//!
//! # Error Categories
//!
//! - [`ConfigurationError`]: invalid bindings, rule parameters or stack wiring
//! - [`SchemaError`]: the GraphQL schema document could not be loaded
//!
//! # Example
//!
//! ```rust,ignore
//! use binder::prelude::*;
//!
//! match registry.register(binding) {
//!     Ok(()) => {}
//!     Err(ConfigurationError::DuplicateBinding { key }) => {
//!         eprintln!("{} is already bound", key);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::operation::FieldKey;
use std::fmt;

/// The main error type for the binder
#[derive(Debug)]
pub enum BinderError {
    /// Invalid declarative description
    Configuration(ConfigurationError),

    /// Schema loading errors
    Schema(SchemaError),
}

impl fmt::Display for BinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinderError::Configuration(e) => write!(f, "{}", e),
            BinderError::Schema(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BinderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BinderError::Configuration(e) => Some(e),
            BinderError::Schema(e) => Some(e),
        }
    }
}

impl BinderError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BinderError::Configuration(_) => "CONFIGURATION_ERROR",
            BinderError::Schema(_) => "SCHEMA_ERROR",
        }
    }

    /// The (operation type, field name) pair this error is about, if any
    pub fn field_key(&self) -> Option<&FieldKey> {
        match self {
            BinderError::Configuration(e) => e.field_key(),
            BinderError::Schema(_) => None,
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while validating the declarative stack description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The (operation type, field name) pair is not declared in the schema
    UnknownField { key: FieldKey },

    /// A second binding was registered for the same pair
    DuplicateBinding { key: FieldKey },

    /// A mapping rule parameter is missing or invalid
    InvalidRuleParameter {
        key: FieldKey,
        parameter: String,
        message: String,
    },

    /// A resource or field name does not follow the naming rules
    InvalidName {
        kind: String,
        name: String,
        message: String,
    },

    /// The stack was built without an API definition
    MissingApi,

    /// A data source references a table that was never declared
    UnknownTable {
        data_source: String,
        table: String,
    },

    /// The same table name was declared twice
    DuplicateTable { table: String },

    /// A resolver references a data source that was never declared
    UnknownDataSource { key: FieldKey, data_source: String },

    /// The same data source name was declared twice
    DuplicateDataSource { data_source: String },

    /// A table already has a data source binding
    TableAlreadyBound {
        table: String,
        existing: String,
        data_source: String,
    },

    /// Two declarations would synthesize resources with the same logical id
    LogicalIdCollision {
        logical_id: String,
        first: String,
        second: String,
    },
}

impl ConfigurationError {
    /// The (operation type, field name) pair this error is about, if any
    pub fn field_key(&self) -> Option<&FieldKey> {
        match self {
            ConfigurationError::UnknownField { key }
            | ConfigurationError::DuplicateBinding { key }
            | ConfigurationError::InvalidRuleParameter { key, .. }
            | ConfigurationError::UnknownDataSource { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::UnknownField { key } => {
                write!(f, "Field '{}' is not declared in the schema", key)
            }
            ConfigurationError::DuplicateBinding { key } => {
                write!(f, "A resolver is already bound to '{}'", key)
            }
            ConfigurationError::InvalidRuleParameter {
                key,
                parameter,
                message,
            } => {
                write!(
                    f,
                    "Invalid mapping rule parameter '{}' for '{}': {}",
                    parameter, key, message
                )
            }
            ConfigurationError::InvalidName {
                kind,
                name,
                message,
            } => {
                write!(f, "Invalid {} name '{}': {}", kind, name, message)
            }
            ConfigurationError::MissingApi => {
                write!(f, "No API definition was provided")
            }
            ConfigurationError::UnknownTable { data_source, table } => {
                write!(
                    f,
                    "Data source '{}' references unknown table '{}'",
                    data_source, table
                )
            }
            ConfigurationError::DuplicateTable { table } => {
                write!(f, "Table '{}' is declared more than once", table)
            }
            ConfigurationError::UnknownDataSource { key, data_source } => {
                write!(
                    f,
                    "Resolver for '{}' references unknown data source '{}'",
                    key, data_source
                )
            }
            ConfigurationError::DuplicateDataSource { data_source } => {
                write!(f, "Data source '{}' is declared more than once", data_source)
            }
            ConfigurationError::TableAlreadyBound {
                table,
                existing,
                data_source,
            } => {
                write!(
                    f,
                    "Table '{}' is already bound to data source '{}', cannot bind '{}'",
                    table, existing, data_source
                )
            }
            ConfigurationError::LogicalIdCollision {
                logical_id,
                first,
                second,
            } => {
                write!(
                    f,
                    "Logical id '{}' of {} collides with {}",
                    logical_id, second, first
                )
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<ConfigurationError> for BinderError {
    fn from(err: ConfigurationError) -> Self {
        BinderError::Configuration(err)
    }
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Errors related to loading the GraphQL schema document
#[derive(Debug)]
pub enum SchemaError {
    /// The SDL document could not be parsed
    Parse {
        file: Option<String>,
        message: String,
    },

    /// The `schema` block names a root type that is never defined
    UndefinedRootType { operation: String, type_name: String },

    /// A type declares the same field twice, possibly through an extension
    DuplicateField { type_name: String, field: String },

    /// IO error while reading the schema file
    Io { path: String, message: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Parse { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse schema file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse schema: {}", message)
                }
            }
            SchemaError::UndefinedRootType {
                operation,
                type_name,
            } => {
                write!(
                    f,
                    "Schema declares {} root type '{}' but never defines it",
                    operation, type_name
                )
            }
            SchemaError::DuplicateField { type_name, field } => {
                write!(
                    f,
                    "Field '{}' is declared more than once on type '{}'",
                    field, type_name
                )
            }
            SchemaError::Io { path, message } => {
                write!(f, "Cannot read schema file '{}': {}", path, message)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<SchemaError> for BinderError {
    fn from(err: SchemaError) -> Self {
        BinderError::Schema(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operation::OperationType;

    #[test]
    fn test_error_message_names_the_pair() {
        let err = ConfigurationError::DuplicateBinding {
            key: FieldKey::new(OperationType::Query, "getDemos"),
        };
        assert_eq!(err.to_string(), "A resolver is already bound to 'Query.getDemos'");
    }

    #[test]
    fn test_error_codes() {
        let err: BinderError = ConfigurationError::MissingApi.into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.field_key().is_none());

        let err: BinderError = SchemaError::Parse {
            file: None,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
    }

    #[test]
    fn test_field_key_is_exposed() {
        let key = FieldKey::new(OperationType::Mutation, "addDemo");
        let err: BinderError = ConfigurationError::UnknownField { key: key.clone() }.into();
        assert_eq!(err.field_key(), Some(&key));
    }
}
