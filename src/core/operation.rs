//! GraphQL operation types and the (operation type, field name) key

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root operation type of a GraphQL schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    /// All operation types, in schema order
    pub const ALL: [OperationType; 3] = [
        OperationType::Query,
        OperationType::Mutation,
        OperationType::Subscription,
    ];

    /// The name GraphQL uses when no `schema` block overrides it
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Query => "Query",
            OperationType::Mutation => "Mutation",
            OperationType::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Query" | "query" => Ok(OperationType::Query),
            "Mutation" | "mutation" => Ok(OperationType::Mutation),
            "Subscription" | "subscription" => Ok(OperationType::Subscription),
            other => Err(format!("unknown operation type '{}'", other)),
        }
    }
}

/// Unique key of a resolver binding
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldKey {
    /// The root operation type (e.g., `Query`)
    pub operation: OperationType,

    /// The field on that root type (e.g., `getDemos`)
    pub field: String,
}

impl FieldKey {
    pub fn new(operation: OperationType, field: impl Into<String>) -> Self {
        Self {
            operation,
            field: field.into(),
        }
    }

    /// Logical resource id, e.g. `QueryGetDemosResolver`
    pub fn resolver_id(&self) -> String {
        let mut chars = self.field.chars();
        let field = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("{}{}Resolver", self.operation, field)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.operation, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operation_type() {
        assert_eq!("Query".parse::<OperationType>(), Ok(OperationType::Query));
        assert_eq!("mutation".parse::<OperationType>(), Ok(OperationType::Mutation));
        assert!("Update".parse::<OperationType>().is_err());
    }

    #[test]
    fn test_resolver_id() {
        let key = FieldKey::new(OperationType::Query, "getDemos");
        assert_eq!(key.resolver_id(), "QueryGetDemosResolver");

        let key = FieldKey::new(OperationType::Mutation, "addDemo");
        assert_eq!(key.resolver_id(), "MutationAddDemoResolver");
    }

    #[test]
    fn test_keys_order_by_operation_then_field() {
        let mut keys = vec![
            FieldKey::new(OperationType::Mutation, "addDemo"),
            FieldKey::new(OperationType::Query, "getDemos"),
            FieldKey::new(OperationType::Query, "allDemos"),
        ];
        keys.sort();
        assert_eq!(keys[0].to_string(), "Query.allDemos");
        assert_eq!(keys[2].to_string(), "Mutation.addDemo");
    }
}
