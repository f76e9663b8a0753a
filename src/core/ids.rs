//! Logical ids of the synthesized resources
//!
//! Ids are derived from declaration names by dropping every character that
//! is not an ASCII letter or digit, so distinct names can map to the same id.
//! The stack builder claims every id before synthesis and rejects collisions.

use crate::core::operation::FieldKey;

/// Logical id of the GraphQL API resource
pub const API_ID: &str = "Api";

/// Logical ids are alphanumeric only
pub fn logical_id(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|p| p.chars())
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

pub fn schema_id() -> String {
    logical_id(&[API_ID, "Schema"])
}

pub fn api_key_id() -> String {
    logical_id(&[API_ID, "DefaultApiKey"])
}

pub fn table_id(table: &str) -> String {
    logical_id(&[table])
}

pub fn data_source_id(data_source: &str) -> String {
    logical_id(&[API_ID, data_source])
}

/// Service role assumed by the API to reach the data source's table
pub fn role_id(data_source: &str) -> String {
    logical_id(&[API_ID, data_source, "ServiceRole"])
}

pub fn policy_id(data_source: &str) -> String {
    logical_id(&[&role_id(data_source), "DefaultPolicy"])
}

pub fn resolver_id(key: &FieldKey) -> String {
    logical_id(&[API_ID, &key.resolver_id()])
}
