//! Resolver registry
//!
//! Holds at most one resolver binding per (operation type, field name) pair
//! and rejects anything the schema or the bound table cannot serve.

use crate::core::error::ConfigurationError;
use crate::core::mapping::{RequestRule, ResponseRule};
use crate::core::operation::{FieldKey, OperationType};
use crate::core::resource::TableDefinition;
use crate::core::schema::GraphQLSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A schema field bound to a data source through a pair of mapping rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverBinding {
    #[serde(rename = "type")]
    pub operation: OperationType,

    pub field: String,

    /// Name of the data source serving the field
    pub data_source: String,

    pub request: RequestRule,

    pub response: ResponseRule,
}

impl ResolverBinding {
    pub fn new(
        operation: OperationType,
        field: impl Into<String>,
        data_source: impl Into<String>,
        request: RequestRule,
        response: ResponseRule,
    ) -> Self {
        Self {
            operation,
            field: field.into(),
            data_source: data_source.into(),
            request,
            response,
        }
    }

    /// The key this binding is registered under
    pub fn key(&self) -> FieldKey {
        FieldKey::new(self.operation, self.field.clone())
    }
}

/// Registry of resolver bindings for one API
///
/// Iteration is ordered by key, so the registered set does not depend on
/// the order bindings were declared in.
pub struct ResolverRegistry {
    schema: Arc<GraphQLSchema>,
    /// Maps data source name -> bound table
    tables: HashMap<String, TableDefinition>,
    bindings: BTreeMap<FieldKey, ResolverBinding>,
}

impl ResolverRegistry {
    /// Create an empty registry for a schema and its data sources
    pub fn new(schema: Arc<GraphQLSchema>, tables: HashMap<String, TableDefinition>) -> Self {
        Self {
            schema,
            tables,
            bindings: BTreeMap::new(),
        }
    }

    /// Register a binding
    ///
    /// Fails without touching the registry when the field is not declared by
    /// the schema, is already bound, names an unknown data source, or when a
    /// mapping rule parameter does not fit the field or the table.
    pub fn register(&mut self, binding: ResolverBinding) -> Result<(), ConfigurationError> {
        let key = binding.key();

        let Some(field) = self.schema.field(&key) else {
            return Err(ConfigurationError::UnknownField { key });
        };

        if self.bindings.contains_key(&key) {
            return Err(ConfigurationError::DuplicateBinding { key });
        }

        let Some(table) = self.tables.get(&binding.data_source) else {
            return Err(ConfigurationError::UnknownDataSource {
                key,
                data_source: binding.data_source.clone(),
            });
        };

        binding.request.validate(&key, field, table)?;

        if !binding.response.fits(&binding.request) {
            tracing::warn!(
                field = %key,
                request = %binding.request,
                response = %binding.response,
                "Unusual mapping rule combination"
            );
        }

        tracing::debug!(
            field = %key,
            data_source = %binding.data_source,
            request = %binding.request,
            response = %binding.response,
            "Registered resolver"
        );

        self.bindings.insert(key, binding);
        Ok(())
    }

    /// Get the binding registered for a key
    pub fn get(&self, key: &FieldKey) -> Option<&ResolverBinding> {
        self.bindings.get(key)
    }

    pub fn contains(&self, key: &FieldKey) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bindings, ordered by key
    pub fn iter(&self) -> impl Iterator<Item = &ResolverBinding> {
        self.bindings.values()
    }

    /// Schema fields that have no resolver yet
    pub fn unbound_fields(&self) -> Vec<FieldKey> {
        self.schema
            .field_keys()
            .filter(|key| !self.bindings.contains_key(key))
            .collect()
    }

    /// Get the underlying schema
    pub fn schema(&self) -> &GraphQLSchema {
        &self.schema
    }

    /// Consume the registry, keeping the ordered bindings
    pub fn into_bindings(self) -> Vec<ResolverBinding> {
        self.bindings.into_values().collect()
    }
}
