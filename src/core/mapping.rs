//! Mapping rules between GraphQL operations and a key-value table
//!
//! A rule is a closed, parameterized selector. It is validated against the
//! bound field and the table before deployment and rendered to the provider's
//! DynamoDB mapping-template text; it is never executed here.

use crate::core::error::ConfigurationError;
use crate::core::naming::is_graphql_name;
use crate::core::operation::FieldKey;
use crate::core::resource::{AttributeType, TableDefinition};
use crate::core::schema::FieldSignature;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the DynamoDB mapping template format
pub const TEMPLATE_VERSION: &str = "2017-02-28";

/// How the partition key of a new item is produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Generate a unique id for every new item
    AutoGenerate,

    /// Read the key from an argument path such as `input.id`
    FromField { field: String },
}

impl KeyStrategy {
    pub fn from_field(path: impl Into<String>) -> Self {
        KeyStrategy::FromField { field: path.into() }
    }

    fn value_expression(&self) -> String {
        match self {
            KeyStrategy::AutoGenerate => "$util.autoId()".to_string(),
            KeyStrategy::FromField { field } => format!("$ctx.args.{}", field),
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStrategy::AutoGenerate => f.write_str("auto-generate"),
            KeyStrategy::FromField { field } => write!(f, "from-field({:?})", field),
        }
    }
}

/// Which part of the arguments becomes the item's attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum ValueProjection {
    /// Project one argument (usually an input object)
    ProjectArgument { argument: String },

    /// Project every argument of the field
    ProjectAllArguments,
}

impl ValueProjection {
    pub fn argument(name: impl Into<String>) -> Self {
        ValueProjection::ProjectArgument {
            argument: name.into(),
        }
    }

    fn container(&self) -> String {
        match self {
            ValueProjection::ProjectArgument { argument } => format!("$ctx.args.{}", argument),
            ValueProjection::ProjectAllArguments => "$ctx.args".to_string(),
        }
    }
}

impl fmt::Display for ValueProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueProjection::ProjectArgument { argument } => {
                write!(f, "project-argument({:?})", argument)
            }
            ValueProjection::ProjectAllArguments => f.write_str("project-all-arguments"),
        }
    }
}

/// Converts an operation invocation into a table request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestRule {
    /// Scan the whole table
    ScanAll {
        #[serde(default)]
        consistent_read: bool,
    },

    /// Write one item
    PutItem {
        key: KeyStrategy,
        values: ValueProjection,
    },
}

impl RequestRule {
    /// Eventually consistent full scan
    pub fn scan_all() -> Self {
        RequestRule::ScanAll {
            consistent_read: false,
        }
    }

    /// Strongly consistent full scan
    pub fn consistent_scan() -> Self {
        RequestRule::ScanAll {
            consistent_read: true,
        }
    }

    pub fn put_item(key: KeyStrategy, values: ValueProjection) -> Self {
        RequestRule::PutItem { key, values }
    }

    /// Check the rule's parameters against the bound field and the table
    pub fn validate(
        &self,
        key: &FieldKey,
        field: &FieldSignature,
        table: &TableDefinition,
    ) -> Result<(), ConfigurationError> {
        let RequestRule::PutItem {
            key: strategy,
            values,
        } = self
        else {
            return Ok(());
        };

        let invalid = |parameter: &str, message: String| ConfigurationError::InvalidRuleParameter {
            key: key.clone(),
            parameter: parameter.to_string(),
            message,
        };

        match strategy {
            KeyStrategy::AutoGenerate => {
                if table.partition_key.attribute_type != AttributeType::String {
                    return Err(invalid(
                        "key",
                        format!(
                            "auto-generated ids are strings but partition key '{}' of table '{}' is {}",
                            table.partition_key.name,
                            table.name,
                            table.partition_key.attribute_type
                        ),
                    ));
                }
            }
            KeyStrategy::FromField { field: path } => {
                let root = path.split('.').next().unwrap_or_default();
                if path.is_empty() || !path.split('.').all(is_graphql_name) {
                    return Err(invalid(
                        "key",
                        format!("'{}' is not a valid argument path", path),
                    ));
                }
                if !field.has_argument(root) {
                    return Err(invalid(
                        "key",
                        format!("field '{}' has no argument '{}'", field.name, root),
                    ));
                }
            }
        }

        match values {
            ValueProjection::ProjectArgument { argument } => {
                if !is_graphql_name(argument) {
                    return Err(invalid(
                        "values",
                        format!("'{}' is not a valid argument name", argument),
                    ));
                }
                if !field.has_argument(argument) {
                    return Err(invalid(
                        "values",
                        format!("field '{}' has no argument '{}'", field.name, argument),
                    ));
                }
            }
            ValueProjection::ProjectAllArguments => {
                if field.arguments.is_empty() {
                    return Err(invalid(
                        "values",
                        format!("field '{}' declares no arguments to project", field.name),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Render the request mapping template for a table
    pub fn render(&self, table: &TableDefinition) -> String {
        match self {
            RequestRule::ScanAll { consistent_read } => format!(
                "{{\"version\" : \"{}\", \"operation\" : \"Scan\", \"consistentRead\": {}}}",
                TEMPLATE_VERSION, consistent_read
            ),
            RequestRule::PutItem { key, values } => format!(
                concat!(
                    "#set($input = {container})\n",
                    "{{\n",
                    "  \"version\": \"{version}\",\n",
                    "  \"operation\": \"PutItem\",\n",
                    "  \"key\" : {{\n",
                    "    \"{name}\" : $util.dynamodb.toDynamoDBJson({value})\n",
                    "  }},\n",
                    "  \"attributeValues\": $util.dynamodb.toMapValuesJson($input)\n",
                    "}}"
                ),
                container = values.container(),
                version = TEMPLATE_VERSION,
                name = table.partition_key.name,
                value = key.value_expression(),
            ),
        }
    }
}

impl fmt::Display for RequestRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestRule::ScanAll {
                consistent_read: false,
            } => f.write_str("scan-all"),
            RequestRule::ScanAll {
                consistent_read: true,
            } => f.write_str("scan-all(consistent)"),
            RequestRule::PutItem { key, values } => write!(f, "put-item({}, {})", key, values),
        }
    }
}

/// Converts a table response into an operation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseRule {
    /// Every item of the result
    ResultList,

    /// The single item of the result
    ResultItem,
}

impl ResponseRule {
    /// Render the response mapping template
    pub fn render(&self) -> String {
        match self {
            ResponseRule::ResultList => "$util.toJson($ctx.result.items)".to_string(),
            ResponseRule::ResultItem => "$util.toJson($ctx.result)".to_string(),
        }
    }

    /// Check whether this response shape is the natural one for a request rule
    pub fn fits(&self, request: &RequestRule) -> bool {
        matches!(
            (request, self),
            (RequestRule::ScanAll { .. }, ResponseRule::ResultList)
                | (RequestRule::PutItem { .. }, ResponseRule::ResultItem)
        )
    }
}

impl fmt::Display for ResponseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseRule::ResultList => f.write_str("result-list"),
            ResponseRule::ResultItem => f.write_str("result-item"),
        }
    }
}
