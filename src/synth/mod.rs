//! Template synthesis
//!
//! Turns a validated [`StackDefinition`] into a CloudFormation-shaped
//! template. Resources are kept in insertion order so the output is stable.

use crate::core::auth::AuthorizationMode;
use crate::core::error::{BinderError, ConfigurationError};
use crate::core::ids::{self, API_ID};
use crate::core::resource::TableDefinition;
use crate::stack::StackDefinition;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Value, json};

/// Table actions granted to the API through a data source
pub const READ_WRITE_ACTIONS: [&str; 12] = [
    "dynamodb:BatchGetItem",
    "dynamodb:GetRecords",
    "dynamodb:GetShardIterator",
    "dynamodb:Query",
    "dynamodb:GetItem",
    "dynamodb:Scan",
    "dynamodb:ConditionCheckItem",
    "dynamodb:BatchWriteItem",
    "dynamodb:PutItem",
    "dynamodb:UpdateItem",
    "dynamodb:DeleteItem",
    "dynamodb:DescribeTable",
];

/// A synthesized template
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    pub description: String,
    pub resources: IndexMap<String, Resource>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub outputs: IndexMap<String, Output>,
}

/// A single provider resource
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: String,

    pub properties: Value,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<String>,
}

impl Resource {
    fn new(resource_type: &str, properties: Value) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            properties,
            depends_on: Vec::new(),
            update_replace_policy: None,
            deletion_policy: None,
        }
    }

    fn depends_on(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.depends_on.extend(ids);
        self
    }

    fn retained(mut self) -> Self {
        self.update_replace_policy = Some("Retain".to_string());
        self.deletion_policy = Some("Retain".to_string());
        self
    }
}

/// A stack output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub value: Value,
    pub description: String,
}

impl Template {
    /// Get a resource by logical id
    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    /// Logical ids of every resource of a type
    pub fn resources_of_type<'a>(&'a self, resource_type: &'a str) -> impl Iterator<Item = &'a str> {
        self.resources
            .iter()
            .filter(move |(_, r)| r.resource_type == resource_type)
            .map(|(id, _)| id.as_str())
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn get_att(id: &str, attribute: &str) -> Value {
    json!({ "Fn::GetAtt": [id, attribute] })
}

fn reference(id: &str) -> Value {
    json!({ "Ref": id })
}

impl StackDefinition {
    /// Synthesize the deployment template for this stack
    pub fn synthesize(&self) -> Result<Template, BinderError> {
        synthesize(self)
    }
}

/// Synthesize the deployment template for a stack
///
/// Fails when a resolver's data source has no table, which a definition
/// produced by the stack builder never has.
pub fn synthesize(stack: &StackDefinition) -> Result<Template, BinderError> {
    let api = stack.api();
    let schema_id = ids::schema_id();
    let mut resources = IndexMap::new();
    let mut outputs = IndexMap::new();

    resources.insert(
        API_ID.to_string(),
        Resource::new(
            "AWS::AppSync::GraphQLApi",
            json!({
                "Name": api.name(),
                "AuthenticationType": api.authorization().as_str(),
                "XrayEnabled": api.xray_enabled(),
            }),
        ),
    );

    resources.insert(
        schema_id.clone(),
        Resource::new(
            "AWS::AppSync::GraphQLSchema",
            json!({
                "ApiId": get_att(API_ID, "ApiId"),
                "Definition": api.schema().source(),
            }),
        ),
    );

    if api.authorization() == AuthorizationMode::ApiKey {
        let key_id = ids::api_key_id();
        resources.insert(
            key_id.clone(),
            Resource::new(
                "AWS::AppSync::ApiKey",
                json!({ "ApiId": get_att(API_ID, "ApiId") }),
            )
            .depends_on([schema_id.clone()]),
        );
        outputs.insert(
            "ApiKey".to_string(),
            Output {
                value: get_att(&key_id, "ApiKey"),
                description: "Default API key".to_string(),
            },
        );
    }

    for table in stack.tables() {
        resources.insert(ids::table_id(&table.name), table_resource(table));
    }

    for ds in stack.data_sources() {
        let table_id = ids::table_id(&ds.table);
        let role = ids::role_id(&ds.name);
        let policy = ids::policy_id(&ds.name);

        resources.insert(
            role.clone(),
            Resource::new(
                "AWS::IAM::Role",
                json!({
                    "AssumeRolePolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Action": "sts:AssumeRole",
                            "Effect": "Allow",
                            "Principal": { "Service": "appsync.amazonaws.com" },
                        }],
                    },
                }),
            ),
        );

        resources.insert(
            policy.clone(),
            Resource::new(
                "AWS::IAM::Policy",
                json!({
                    "PolicyName": policy,
                    "Roles": [reference(&role)],
                    "PolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Action": READ_WRITE_ACTIONS,
                            "Effect": "Allow",
                            "Resource": [get_att(&table_id, "Arn")],
                        }],
                    },
                }),
            ),
        );

        resources.insert(
            ids::data_source_id(&ds.name),
            Resource::new(
                "AWS::AppSync::DataSource",
                json!({
                    "ApiId": get_att(API_ID, "ApiId"),
                    "Name": ds.name,
                    "Type": "AMAZON_DYNAMODB",
                    "DynamoDBConfig": {
                        "AwsRegion": reference("AWS::Region"),
                        "TableName": reference(&table_id),
                    },
                    "ServiceRoleArn": get_att(&role, "Arn"),
                }),
            ),
        );
    }

    for binding in stack.resolvers() {
        let key = binding.key();
        let table = stack.table_for(&binding.data_source).ok_or_else(|| {
            ConfigurationError::UnknownDataSource {
                key: key.clone(),
                data_source: binding.data_source.clone(),
            }
        })?;
        let type_name = api
            .schema()
            .root_type_name(binding.operation)
            .unwrap_or(binding.operation.as_str());
        let ds_id = ids::data_source_id(&binding.data_source);

        resources.insert(
            ids::resolver_id(&key),
            Resource::new(
                "AWS::AppSync::Resolver",
                json!({
                    "ApiId": get_att(API_ID, "ApiId"),
                    "TypeName": type_name,
                    "FieldName": binding.field,
                    "DataSourceName": get_att(&ds_id, "Name"),
                    "Kind": "UNIT",
                    "RequestMappingTemplate": binding.request.render(table),
                    "ResponseMappingTemplate": binding.response.render(),
                }),
            )
            .depends_on([ds_id.clone(), schema_id.clone()]),
        );
    }

    outputs.insert(
        "GraphQLUrl".to_string(),
        Output {
            value: get_att(API_ID, "GraphQLUrl"),
            description: "GraphQL endpoint".to_string(),
        },
    );
    outputs.insert(
        "ApiId".to_string(),
        Output {
            value: get_att(API_ID, "ApiId"),
            description: "GraphQL API id".to_string(),
        },
    );

    tracing::info!(
        stack = %stack.name(),
        resources = resources.len(),
        "Synthesized template"
    );

    Ok(Template {
        description: format!("{} ({} API)", stack.name(), api.name()),
        resources,
        outputs,
    })
}

fn table_resource(table: &TableDefinition) -> Resource {
    let key = &table.partition_key;
    Resource::new(
        "AWS::DynamoDB::Table",
        json!({
            "KeySchema": [{ "AttributeName": key.name, "KeyType": "HASH" }],
            "AttributeDefinitions": [{
                "AttributeName": key.name,
                "AttributeType": key.attribute_type.code(),
            }],
            "ProvisionedThroughput": {
                "ReadCapacityUnits": 5,
                "WriteCapacityUnits": 5,
            },
        }),
    )
    .retained()
}
