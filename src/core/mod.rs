//! Core module containing the schema, resource and mapping-rule types

pub mod auth;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod naming;
pub mod operation;
pub mod resource;
pub mod schema;

pub use auth::AuthorizationMode;
pub use error::{BinderError, ConfigurationError, SchemaError};
pub use mapping::{KeyStrategy, RequestRule, ResponseRule, ValueProjection};
pub use operation::{FieldKey, OperationType};
pub use resource::{ApiDefinition, AttributeType, DataSourceBinding, KeyAttribute, TableDefinition};
pub use schema::{FieldSignature, GraphQLSchema};
