//! StackBuilder for a fluent API to define a GraphQL API over key-value tables

use super::registry::{ResolverBinding, ResolverRegistry};
use crate::core::auth::AuthorizationMode;
use crate::core::error::{BinderError, ConfigurationError};
use crate::core::ids;
use crate::core::naming::NameKind;
use crate::core::operation::FieldKey;
use crate::core::resource::{ApiDefinition, DataSourceBinding, TableDefinition};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Builder for a validated stack definition
///
/// Nothing is checked until [`StackBuilder::build`]; declarations can be
/// added in any order.
///
/// # Example
///
/// ```ignore
/// let stack = StackBuilder::new("DemoStack")
///     .with_api(ApiDefinition::new("demo", schema))
///     .with_table(TableDefinition::new("DemoTable", KeyAttribute::string("id")))
///     .with_data_source("demoDataSource", "DemoTable")
///     .with_resolver(ResolverBinding::new(
///         OperationType::Query,
///         "getDemos",
///         "demoDataSource",
///         RequestRule::scan_all(),
///         ResponseRule::ResultList,
///     ))
///     .build()?;
/// ```
pub struct StackBuilder {
    name: String,
    api: Option<ApiDefinition>,
    tables: Vec<TableDefinition>,
    data_sources: Vec<DataSourceBinding>,
    resolvers: Vec<ResolverBinding>,
}

impl StackBuilder {
    /// Create a new StackBuilder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api: None,
            tables: Vec::new(),
            data_sources: Vec::new(),
            resolvers: Vec::new(),
        }
    }

    /// Set the API (required)
    pub fn with_api(mut self, api: ApiDefinition) -> Self {
        self.api = Some(api);
        self
    }

    /// Declare a table
    pub fn with_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// Bind a declared table to the API as a data source
    pub fn with_data_source(mut self, name: impl Into<String>, table: impl Into<String>) -> Self {
        self.data_sources.push(DataSourceBinding::new(name, table));
        self
    }

    /// Declare a resolver
    pub fn with_resolver(mut self, binding: ResolverBinding) -> Self {
        self.resolvers.push(binding);
        self
    }

    /// Declare several resolvers
    pub fn with_resolvers(mut self, bindings: impl IntoIterator<Item = ResolverBinding>) -> Self {
        self.resolvers.extend(bindings);
        self
    }

    /// Validate every declaration and produce the stack definition
    ///
    /// The first invalid declaration aborts the build.
    pub fn build(self) -> Result<StackDefinition, BinderError> {
        let api = self.api.ok_or(ConfigurationError::MissingApi)?;
        NameKind::Api.validate(api.name())?;

        let tables = Self::index_tables(&self.tables)?;
        let data_source_tables = Self::bind_data_sources(&self.data_sources, &tables)?;

        let mut registry = ResolverRegistry::new(api.schema().clone(), data_source_tables);
        for binding in self.resolvers {
            let key = binding.key();
            if let Err(err) = registry.register(binding) {
                tracing::warn!(field = %key, "Rejected resolver: {}", err);
                return Err(err.into());
            }
        }

        Self::claim_logical_ids(&api, &self.tables, &self.data_sources, registry.iter())?;

        for key in registry.unbound_fields() {
            tracing::debug!(field = %key, "Schema field has no resolver");
        }

        tracing::info!(
            stack = %self.name,
            api = %api.name(),
            tables = self.tables.len(),
            data_sources = self.data_sources.len(),
            resolvers = registry.len(),
            "Stack definition built"
        );

        Ok(StackDefinition {
            name: self.name,
            api,
            tables: self.tables,
            data_sources: self.data_sources,
            resolvers: registry.into_bindings(),
        })
    }

    fn index_tables(
        tables: &[TableDefinition],
    ) -> Result<HashMap<&str, &TableDefinition>, ConfigurationError> {
        let mut index = HashMap::new();
        for table in tables {
            NameKind::Table.validate(&table.name)?;
            if ids::table_id(&table.name).is_empty() {
                return Err(ConfigurationError::InvalidName {
                    kind: "table".to_string(),
                    name: table.name.clone(),
                    message: "must contain at least one letter or digit".to_string(),
                });
            }
            NameKind::Attribute.validate(&table.partition_key.name)?;
            if index.insert(table.name.as_str(), table).is_some() {
                return Err(ConfigurationError::DuplicateTable {
                    table: table.name.clone(),
                });
            }
        }
        Ok(index)
    }

    /// Every synthesized resource needs its own logical id
    fn claim_logical_ids<'a>(
        api: &ApiDefinition,
        tables: &[TableDefinition],
        data_sources: &[DataSourceBinding],
        resolvers: impl Iterator<Item = &'a ResolverBinding>,
    ) -> Result<(), ConfigurationError> {
        let mut owners = LogicalIds::default();

        owners.claim(ids::API_ID.to_string(), || format!("API '{}'", api.name()))?;
        owners.claim(ids::schema_id(), || "the API schema".to_string())?;
        if api.authorization() == AuthorizationMode::ApiKey {
            owners.claim(ids::api_key_id(), || "the default API key".to_string())?;
        }

        for table in tables {
            owners.claim(ids::table_id(&table.name), || format!("table '{}'", table.name))?;
        }

        for ds in data_sources {
            owners.claim(ids::role_id(&ds.name), || {
                format!("the service role of data source '{}'", ds.name)
            })?;
            owners.claim(ids::policy_id(&ds.name), || {
                format!("the policy of data source '{}'", ds.name)
            })?;
            owners.claim(ids::data_source_id(&ds.name), || {
                format!("data source '{}'", ds.name)
            })?;
        }

        for binding in resolvers {
            let key = binding.key();
            owners.claim(ids::resolver_id(&key), || format!("resolver '{}'", key))?;
        }

        Ok(())
    }

    /// Maps data source name -> bound table, one data source per table
    fn bind_data_sources(
        data_sources: &[DataSourceBinding],
        tables: &HashMap<&str, &TableDefinition>,
    ) -> Result<HashMap<String, TableDefinition>, ConfigurationError> {
        let mut bound: HashMap<&str, &str> = HashMap::new();
        let mut names = HashSet::new();
        let mut result = HashMap::new();

        for ds in data_sources {
            NameKind::DataSource.validate(&ds.name)?;

            if !names.insert(ds.name.as_str()) {
                return Err(ConfigurationError::DuplicateDataSource {
                    data_source: ds.name.clone(),
                });
            }

            let Some(table) = tables.get(ds.table.as_str()) else {
                return Err(ConfigurationError::UnknownTable {
                    data_source: ds.name.clone(),
                    table: ds.table.clone(),
                });
            };

            if let Some(existing) = bound.insert(ds.table.as_str(), ds.name.as_str()) {
                return Err(ConfigurationError::TableAlreadyBound {
                    table: ds.table.clone(),
                    existing: existing.to_string(),
                    data_source: ds.name.clone(),
                });
            }

            result.insert(ds.name.clone(), (*table).clone());
        }

        Ok(result)
    }
}

/// Logical id -> the declaration that owns it
#[derive(Default)]
struct LogicalIds(HashMap<String, String>);

impl LogicalIds {
    fn claim(
        &mut self,
        logical_id: String,
        owner: impl FnOnce() -> String,
    ) -> Result<(), ConfigurationError> {
        match self.0.entry(logical_id) {
            Entry::Occupied(entry) => Err(ConfigurationError::LogicalIdCollision {
                logical_id: entry.key().clone(),
                first: entry.get().clone(),
                second: owner(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(owner());
                Ok(())
            }
        }
    }
}

/// A validated stack: one API, its tables, data sources and resolvers
///
/// This is the declarative description handed to the deployment engine.
#[derive(Debug, Clone)]
pub struct StackDefinition {
    name: String,
    api: ApiDefinition,
    tables: Vec<TableDefinition>,
    data_sources: Vec<DataSourceBinding>,
    resolvers: Vec<ResolverBinding>,
}

impl StackDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn api(&self) -> &ApiDefinition {
        &self.api
    }

    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }

    pub fn data_sources(&self) -> &[DataSourceBinding] {
        &self.data_sources
    }

    /// Resolvers ordered by (operation type, field name)
    pub fn resolvers(&self) -> &[ResolverBinding] {
        &self.resolvers
    }

    /// Get the resolver bound to a key
    pub fn resolver(&self, key: &FieldKey) -> Option<&ResolverBinding> {
        self.resolvers
            .iter()
            .find(|r| r.operation == key.operation && r.field == key.field)
    }

    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn data_source(&self, name: &str) -> Option<&DataSourceBinding> {
        self.data_sources.iter().find(|d| d.name == name)
    }

    /// The table behind a data source
    pub fn table_for(&self, data_source: &str) -> Option<&TableDefinition> {
        self.data_source(data_source)
            .and_then(|ds| self.table(&ds.table))
    }
}
