//! Definitions of the managed resources wired together by the binder

use crate::core::auth::AuthorizationMode;
use crate::core::schema::GraphQLSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Type of a key attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

impl AttributeType {
    /// DynamoDB scalar type code (`S`, `N`, `B`)
    pub fn code(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
            AttributeType::Binary => "B",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::String => f.write_str("string"),
            AttributeType::Number => f.write_str("number"),
            AttributeType::Binary => f.write_str("binary"),
        }
    }
}

/// A named, typed key attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAttribute {
    pub name: String,

    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::String)
    }
}

/// A key-value table with a partition key and no secondary indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name, also used as its logical id
    pub name: String,

    pub partition_key: KeyAttribute,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>, partition_key: KeyAttribute) -> Self {
        Self {
            name: name.into(),
            partition_key,
        }
    }
}

/// A GraphQL API definition
///
/// Immutable once built; a different definition means a new deployment.
#[derive(Debug, Clone)]
pub struct ApiDefinition {
    name: String,
    schema: Arc<GraphQLSchema>,
    authorization: AuthorizationMode,
    xray_enabled: bool,
}

impl ApiDefinition {
    /// Create an API with the default authorization mode and tracing off
    pub fn new(name: impl Into<String>, schema: GraphQLSchema) -> Self {
        Self {
            name: name.into(),
            schema: Arc::new(schema),
            authorization: AuthorizationMode::default(),
            xray_enabled: false,
        }
    }

    pub fn with_authorization(mut self, mode: AuthorizationMode) -> Self {
        self.authorization = mode;
        self
    }

    pub fn with_xray(mut self, enabled: bool) -> Self {
        self.xray_enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Arc<GraphQLSchema> {
        &self.schema
    }

    pub fn authorization(&self) -> AuthorizationMode {
        self.authorization
    }

    pub fn xray_enabled(&self) -> bool {
        self.xray_enabled
    }
}

/// Grants the API read/write access to one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceBinding {
    /// Data source name (e.g., "demoDataSource")
    pub name: String,

    /// Name of the bound table
    pub table: String,
}

impl DataSourceBinding {
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
        }
    }
}
