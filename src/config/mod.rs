//! Configuration loading and management

use crate::core::auth::AuthorizationMode;
use crate::core::mapping::{KeyStrategy, RequestRule, ResponseRule, ValueProjection};
use crate::core::operation::OperationType;
use crate::core::resource::{ApiDefinition, DataSourceBinding, KeyAttribute, TableDefinition};
use crate::core::schema::GraphQLSchema;
use crate::stack::{ResolverBinding, StackBuilder, StackDefinition};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Schema of the demo stack
pub const DEMO_SCHEMA: &str = r#"type Demo {
  id: String!
  version: String!
}

type Query {
  getDemos: [Demo!]
}

input DemoInput {
  version: String!
}

type Mutation {
  addDemo(input: DemoInput!): Demo
}
"#;

/// Where the GraphQL schema comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaSource {
    /// SDL file, relative to the configuration file
    File(PathBuf),

    /// SDL text embedded in the configuration
    Inline(String),
}

/// Configuration for the GraphQL API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub name: String,

    #[serde(with = "serde_yaml::with::singleton_map")]
    pub schema: SchemaSource,

    #[serde(default)]
    pub authorization: AuthorizationMode,

    #[serde(default)]
    pub xray_enabled: bool,
}

/// Complete configuration of a stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    /// Stack name
    pub stack: String,

    pub api: ApiConfig,

    #[serde(default)]
    pub tables: Vec<TableDefinition>,

    #[serde(default)]
    pub data_sources: Vec<DataSourceBinding>,

    #[serde(default)]
    pub resolvers: Vec<ResolverBinding>,
}

impl StackConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read stack config '{}'", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse stack config '{}'", path.display()))?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load the schema, resolving file paths against `base_dir`
    pub fn load_schema(&self, base_dir: &Path) -> Result<GraphQLSchema> {
        let schema = match &self.api.schema {
            SchemaSource::File(path) => GraphQLSchema::from_file(base_dir.join(path))?,
            SchemaSource::Inline(sdl) => GraphQLSchema::parse(sdl.as_str())?,
        };
        Ok(schema)
    }

    /// Turn the configuration into a builder
    pub fn into_builder(self, base_dir: &Path) -> Result<StackBuilder> {
        let schema = self.load_schema(base_dir)?;
        let api = ApiDefinition::new(self.api.name, schema)
            .with_authorization(self.api.authorization)
            .with_xray(self.api.xray_enabled);

        let mut builder = StackBuilder::new(self.stack).with_api(api);
        for table in self.tables {
            builder = builder.with_table(table);
        }
        for ds in self.data_sources {
            builder = builder.with_data_source(ds.name, ds.table);
        }
        Ok(builder.with_resolvers(self.resolvers))
    }

    /// Validate the configuration and build the stack definition
    pub fn build(self, base_dir: &Path) -> Result<StackDefinition> {
        let stack = self.into_builder(base_dir)?.build()?;
        Ok(stack)
    }

    /// Load a YAML file and build the stack it describes
    pub fn load_stack(path: impl AsRef<Path>) -> Result<StackDefinition> {
        let path = path.as_ref();
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_yaml_file(path)?
            .build(base_dir)
            .with_context(|| format!("Invalid stack config '{}'", path.display()))
    }

    /// The demo stack: a `demo` API over `DemoTable`, with IAM auth and tracing
    pub fn default_config() -> Self {
        Self {
            stack: "DemoStack".to_string(),
            api: ApiConfig {
                name: "demo".to_string(),
                schema: SchemaSource::Inline(DEMO_SCHEMA.to_string()),
                authorization: AuthorizationMode::Iam,
                xray_enabled: true,
            },
            tables: vec![TableDefinition::new("DemoTable", KeyAttribute::string("id"))],
            data_sources: vec![DataSourceBinding::new("demoDataSource", "DemoTable")],
            resolvers: vec![
                ResolverBinding::new(
                    OperationType::Query,
                    "getDemos",
                    "demoDataSource",
                    RequestRule::scan_all(),
                    ResponseRule::ResultList,
                ),
                ResolverBinding::new(
                    OperationType::Mutation,
                    "addDemo",
                    "demoDataSource",
                    RequestRule::put_item(
                        KeyStrategy::AutoGenerate,
                        ValueProjection::argument("input"),
                    ),
                    ResponseRule::ResultItem,
                ),
            ],
        }
    }
}
