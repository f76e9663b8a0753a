//! # Resolver Binder
//!
//! Declarative wiring of a managed GraphQL API to key-value tables.
//!
//! ## Features
//!
//! - **Schema-Checked Bindings**: every resolver must target a field the GraphQL schema declares
//! - **One Resolver per Field**: duplicate (operation type, field name) bindings are rejected
//! - **Typed Mapping Rules**: scans, item writes and result shapes are enums, not template strings
//! - **Configuration-Based**: describe a whole stack in YAML
//! - **Template Synthesis**: emit a CloudFormation-shaped template for the deployment engine
//!
//! Nothing here talks to the provider. All validation happens while the stack
//! is being defined, before any deployment step.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use binder::prelude::*;
//!
//! let schema = GraphQLSchema::from_file("schema.graphql")?;
//!
//! let stack = StackBuilder::new("DemoStack")
//!     .with_api(
//!         ApiDefinition::new("demo", schema)
//!             .with_authorization(AuthorizationMode::Iam)
//!             .with_xray(true),
//!     )
//!     .with_table(TableDefinition::new("DemoTable", KeyAttribute::string("id")))
//!     .with_data_source("demoDataSource", "DemoTable")
//!     .with_resolver(ResolverBinding::new(
//!         OperationType::Query,
//!         "getDemos",
//!         "demoDataSource",
//!         RequestRule::scan_all(),
//!         ResponseRule::ResultList,
//!     ))
//!     .with_resolver(ResolverBinding::new(
//!         OperationType::Mutation,
//!         "addDemo",
//!         "demoDataSource",
//!         RequestRule::put_item(KeyStrategy::AutoGenerate, ValueProjection::argument("input")),
//!         ResponseRule::ResultItem,
//!     ))
//!     .build()?;
//!
//! println!("{}", stack.synthesize()?.to_json_pretty()?);
//! ```

pub mod core;
pub mod config;
pub mod stack;
pub mod synth;

/// Re-exports of commonly used types
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::AuthorizationMode,
        error::{BinderError, ConfigurationError, SchemaError},
        mapping::{KeyStrategy, RequestRule, ResponseRule, ValueProjection},
        operation::{FieldKey, OperationType},
        resource::{ApiDefinition, AttributeType, DataSourceBinding, KeyAttribute, TableDefinition},
        schema::{FieldSignature, GraphQLSchema},
    };

    // === Stack ===
    pub use crate::stack::{ResolverBinding, ResolverRegistry, StackBuilder, StackDefinition};

    // === Config ===
    pub use crate::config::{ApiConfig, SchemaSource, StackConfig};

    // === Synthesis ===
    pub use crate::synth::{Resource, Template};

    // === External dependencies ===
    pub use anyhow::Result;
}
