//! GraphQL schema loading
//!
//! Only the parts of the SDL the binder needs are kept: the root operation
//! types and, for each of their fields, the argument names. Everything else
//! (object types, inputs, directives) is left to the managed service.

use crate::core::error::SchemaError;
use crate::core::operation::{FieldKey, OperationType};
use graphql_parser::schema::{Definition, Field, TypeDefinition, TypeExtension};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Root type names from the `schema` block, and fields of every object type
type Definitions = (
    HashMap<OperationType, String>,
    HashMap<String, Vec<FieldSignature>>,
);

/// A field declared on a root operation type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSignature {
    /// Field name (e.g., "addDemo")
    pub name: String,

    /// Argument names in declaration order (e.g., ["input"])
    pub arguments: Vec<String>,
}

impl FieldSignature {
    /// Check whether the field declares an argument with this name
    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments.iter().any(|a| a == name)
    }
}

/// Parsed GraphQL schema document
#[derive(Debug, Clone)]
pub struct GraphQLSchema {
    source: String,
    roots: BTreeMap<OperationType, String>,
    fields: BTreeMap<OperationType, BTreeMap<String, FieldSignature>>,
}

impl GraphQLSchema {
    /// Load a schema from an SDL file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;

        Self::parse_inner(content, Some(display))
    }

    /// Parse a schema from an SDL string
    pub fn parse(sdl: impl Into<String>) -> Result<Self, SchemaError> {
        Self::parse_inner(sdl.into(), None)
    }

    fn parse_inner(source: String, file: Option<String>) -> Result<Self, SchemaError> {
        let (mut declared_roots, mut object_fields) = Self::collect_definitions(&source, file)?;

        let explicit = !declared_roots.is_empty();
        let mut roots = BTreeMap::new();
        let mut fields = BTreeMap::new();

        for operation in OperationType::ALL {
            let type_name = match declared_roots.remove(&operation) {
                Some(name) => name,
                // With an explicit `schema` block, undeclared roots do not exist
                None if explicit => continue,
                None => operation.as_str().to_string(),
            };

            match object_fields.remove(&type_name) {
                Some(signatures) => {
                    let by_name = signatures
                        .into_iter()
                        .map(|s| (s.name.clone(), s))
                        .collect::<BTreeMap<_, _>>();
                    roots.insert(operation, type_name);
                    fields.insert(operation, by_name);
                }
                None if explicit => {
                    return Err(SchemaError::UndefinedRootType {
                        operation: operation.to_string(),
                        type_name,
                    });
                }
                None => {}
            }
        }

        tracing::debug!(
            roots = roots.len(),
            fields = fields.values().map(BTreeMap::len).sum::<usize>(),
            "Loaded GraphQL schema"
        );

        Ok(Self {
            source,
            roots,
            fields,
        })
    }

    fn collect_definitions(
        source: &str,
        file: Option<String>,
    ) -> Result<Definitions, SchemaError> {
        let document = graphql_parser::parse_schema::<String>(source).map_err(|e| {
            SchemaError::Parse {
                file,
                message: e.to_string(),
            }
        })?;

        let mut declared_roots: HashMap<OperationType, String> = HashMap::new();
        let mut object_fields: HashMap<String, Vec<FieldSignature>> = HashMap::new();

        for definition in &document.definitions {
            match definition {
                Definition::SchemaDefinition(schema) => {
                    let named = [
                        (OperationType::Query, &schema.query),
                        (OperationType::Mutation, &schema.mutation),
                        (OperationType::Subscription, &schema.subscription),
                    ];
                    for (operation, name) in named {
                        if let Some(name) = name {
                            declared_roots.insert(operation, name.clone());
                        }
                    }
                }
                Definition::TypeDefinition(TypeDefinition::Object(object)) => {
                    add_fields(&mut object_fields, &object.name, &object.fields)?;
                }
                Definition::TypeExtension(TypeExtension::Object(extension)) => {
                    add_fields(&mut object_fields, &extension.name, &extension.fields)?;
                }
                _ => {}
            }
        }

        Ok((declared_roots, object_fields))
    }

    /// The SDL text, passed through unchanged to the deployment engine
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the object type serving this root operation, if the schema has one
    pub fn root_type_name(&self, operation: OperationType) -> Option<&str> {
        self.roots.get(&operation).map(String::as_str)
    }

    /// Check whether the (operation type, field name) pair is declared
    pub fn has_field(&self, key: &FieldKey) -> bool {
        self.field(key).is_some()
    }

    /// Look up a root field
    pub fn field(&self, key: &FieldKey) -> Option<&FieldSignature> {
        self.fields.get(&key.operation)?.get(&key.field)
    }

    /// Every (operation type, field name) pair declared by the schema
    pub fn field_keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.iter().flat_map(|(operation, fields)| {
            fields.keys().map(move |name| FieldKey::new(*operation, name.clone()))
        })
    }
}

/// Append declared fields to a type, rejecting names it already has
fn add_fields(
    object_fields: &mut HashMap<String, Vec<FieldSignature>>,
    type_name: &str,
    declared: &[Field<'_, String>],
) -> Result<(), SchemaError> {
    let known = object_fields.entry(type_name.to_string()).or_default();
    for field in declared {
        if known.iter().any(|s| s.name == field.name) {
            return Err(SchemaError::DuplicateField {
                type_name: type_name.to_string(),
                field: field.name.clone(),
            });
        }
        known.push(signature(field));
    }
    Ok(())
}

fn signature(field: &Field<'_, String>) -> FieldSignature {
    FieldSignature {
        name: field.name.clone(),
        arguments: field.arguments.iter().map(|a| a.name.clone()).collect(),
    }
}
