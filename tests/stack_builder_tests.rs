//! Integration tests for StackBuilder wiring checks

use binder::prelude::*;

const SCHEMA: &str = include_str!("fixtures/schema.graphql");

fn api() -> ApiDefinition {
    ApiDefinition::new("demo", GraphQLSchema::parse(SCHEMA).unwrap())
        .with_authorization(AuthorizationMode::Iam)
        .with_xray(true)
}

fn demo_table() -> TableDefinition {
    TableDefinition::new("DemoTable", KeyAttribute::string("id"))
}

fn get_demos(data_source: &str) -> ResolverBinding {
    ResolverBinding::new(
        OperationType::Query,
        "getDemos",
        data_source,
        RequestRule::scan_all(),
        ResponseRule::ResultList,
    )
}

fn add_demo(data_source: &str) -> ResolverBinding {
    ResolverBinding::new(
        OperationType::Mutation,
        "addDemo",
        data_source,
        RequestRule::put_item(KeyStrategy::AutoGenerate, ValueProjection::argument("input")),
        ResponseRule::ResultItem,
    )
}

fn configuration_error(err: BinderError) -> ConfigurationError {
    match err {
        BinderError::Configuration(e) => e,
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

#[test]
fn test_build_demo_stack() {
    let stack = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_table(demo_table())
        .with_data_source("demoDataSource", "DemoTable")
        .with_resolver(get_demos("demoDataSource"))
        .with_resolver(add_demo("demoDataSource"))
        .build()
        .unwrap();

    assert_eq!(stack.api().name(), "demo");
    assert_eq!(stack.tables().len(), 1);
    assert_eq!(stack.data_sources().len(), 1);
    assert_eq!(stack.resolvers().len(), 2);

    let key = FieldKey::new(OperationType::Mutation, "addDemo");
    assert_eq!(stack.resolver(&key), Some(&add_demo("demoDataSource")));
}

#[test]
fn test_declaration_order_does_not_matter() {
    let first = StackBuilder::new("DemoStack")
        .with_resolver(add_demo("demoDataSource"))
        .with_data_source("demoDataSource", "DemoTable")
        .with_resolver(get_demos("demoDataSource"))
        .with_table(demo_table())
        .with_api(api())
        .build()
        .unwrap();

    let second = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_table(demo_table())
        .with_data_source("demoDataSource", "DemoTable")
        .with_resolvers([get_demos("demoDataSource"), add_demo("demoDataSource")])
        .build()
        .unwrap();

    assert_eq!(first.resolvers(), second.resolvers());
}

#[test]
fn test_duplicate_resolver_aborts_build() {
    let err = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_table(demo_table())
        .with_data_source("demoDataSource", "DemoTable")
        .with_resolver(get_demos("demoDataSource"))
        .with_resolver(get_demos("demoDataSource"))
        .build()
        .unwrap_err();

    assert_eq!(
        err.field_key(),
        Some(&FieldKey::new(OperationType::Query, "getDemos"))
    );
    assert!(matches!(
        configuration_error(err),
        ConfigurationError::DuplicateBinding { .. }
    ));
}

#[test]
fn test_data_source_on_unknown_table() {
    let err = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_data_source("demoDataSource", "MissingTable")
        .build()
        .unwrap_err();

    assert_eq!(
        configuration_error(err),
        ConfigurationError::UnknownTable {
            data_source: "demoDataSource".to_string(),
            table: "MissingTable".to_string(),
        }
    );
}

#[test]
fn test_one_data_source_per_table() {
    let err = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_table(demo_table())
        .with_data_source("demoDataSource", "DemoTable")
        .with_data_source("otherDataSource", "DemoTable")
        .build()
        .unwrap_err();

    assert_eq!(
        configuration_error(err),
        ConfigurationError::TableAlreadyBound {
            table: "DemoTable".to_string(),
            existing: "demoDataSource".to_string(),
            data_source: "otherDataSource".to_string(),
        }
    );
}

#[test]
fn test_duplicate_data_source_name() {
    let err = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_table(demo_table())
        .with_table(TableDefinition::new("OtherTable", KeyAttribute::string("id")))
        .with_data_source("demoDataSource", "DemoTable")
        .with_data_source("demoDataSource", "OtherTable")
        .build()
        .unwrap_err();

    assert!(matches!(
        configuration_error(err),
        ConfigurationError::DuplicateDataSource { .. }
    ));
}

#[test]
fn test_resolver_on_unknown_data_source() {
    let err = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_table(demo_table())
        .with_data_source("demoDataSource", "DemoTable")
        .with_resolver(get_demos("missingDataSource"))
        .build()
        .unwrap_err();

    assert!(matches!(
        configuration_error(err),
        ConfigurationError::UnknownDataSource { .. }
    ));
}

#[test]
fn test_auto_generated_key_on_numeric_table() {
    let err = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_table(TableDefinition::new(
            "DemoTable",
            KeyAttribute::new("id", AttributeType::Number),
        ))
        .with_data_source("demoDataSource", "DemoTable")
        .with_resolver(add_demo("demoDataSource"))
        .build()
        .unwrap_err();

    assert!(matches!(
        configuration_error(err),
        ConfigurationError::InvalidRuleParameter { .. }
    ));
}

#[test]
fn test_invalid_table_name() {
    let err = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_table(TableDefinition::new("db", KeyAttribute::string("id")))
        .build()
        .unwrap_err();

    assert!(matches!(
        configuration_error(err),
        ConfigurationError::InvalidName { .. }
    ));
}

#[test]
fn test_each_table_gets_its_own_data_source() {
    let stack = StackBuilder::new("DemoStack")
        .with_api(api())
        .with_table(demo_table())
        .with_table(TableDefinition::new("AuditTable", KeyAttribute::string("pk")))
        .with_data_source("demoDataSource", "DemoTable")
        .with_data_source("auditDataSource", "AuditTable")
        .with_resolver(get_demos("demoDataSource"))
        .with_resolver(add_demo("auditDataSource"))
        .build()
        .unwrap();

    assert_eq!(stack.table_for("auditDataSource").unwrap().name, "AuditTable");
}

// =============================================================================
// Logical id collisions
// =============================================================================

mod logical_id_tests {
    use super::*;

    fn collision(err: BinderError) -> (String, String, String) {
        match configuration_error(err) {
            ConfigurationError::LogicalIdCollision {
                logical_id,
                first,
                second,
            } => (logical_id, first, second),
            other => panic!("expected a logical id collision, got {:?}", other),
        }
    }

    #[test]
    fn test_fields_differing_in_case() {
        let schema = GraphQLSchema::parse("type Query { getDemos: [String] GetDemos: [String] }")
            .unwrap();
        let scan = |field: &str| {
            ResolverBinding::new(
                OperationType::Query,
                field,
                "demoDataSource",
                RequestRule::scan_all(),
                ResponseRule::ResultList,
            )
        };

        let err = StackBuilder::new("DemoStack")
            .with_api(ApiDefinition::new("demo", schema))
            .with_table(demo_table())
            .with_data_source("demoDataSource", "DemoTable")
            .with_resolver(scan("getDemos"))
            .with_resolver(scan("GetDemos"))
            .build()
            .unwrap_err();

        let (logical_id, first, second) = collision(err);
        assert_eq!(logical_id, "ApiQueryGetDemosResolver");
        assert_eq!(first, "resolver 'Query.GetDemos'");
        assert_eq!(second, "resolver 'Query.getDemos'");
    }

    #[test]
    fn test_tables_differing_in_punctuation() {
        let err = StackBuilder::new("DemoStack")
            .with_api(api())
            .with_table(TableDefinition::new("demo-table", KeyAttribute::string("id")))
            .with_table(TableDefinition::new("demo.table", KeyAttribute::string("id")))
            .build()
            .unwrap_err();

        let (logical_id, first, second) = collision(err);
        assert_eq!(logical_id, "demotable");
        assert_eq!(first, "table 'demo-table'");
        assert_eq!(second, "table 'demo.table'");
    }

    #[test]
    fn test_tables_named_like_api_resources() {
        for (table, logical_id) in [("Api", "Api"), ("ApiSchema", "ApiSchema")] {
            let err = StackBuilder::new("DemoStack")
                .with_api(api())
                .with_table(TableDefinition::new(table, KeyAttribute::string("id")))
                .build()
                .unwrap_err();

            let (id, _, second) = collision(err);
            assert_eq!(id, logical_id);
            assert_eq!(second, format!("table '{}'", table));
        }
    }

    #[test]
    fn test_data_sources_differing_in_underscores() {
        let err = StackBuilder::new("DemoStack")
            .with_api(api())
            .with_table(demo_table())
            .with_table(TableDefinition::new("AuditTable", KeyAttribute::string("pk")))
            .with_data_source("demo_ds", "DemoTable")
            .with_data_source("demods", "AuditTable")
            .build()
            .unwrap_err();

        let (logical_id, first, second) = collision(err);
        assert_eq!(logical_id, "ApidemodsServiceRole");
        assert!(first.contains("'demo_ds'"));
        assert!(second.contains("'demods'"));
    }

    #[test]
    fn test_collision_message_names_both_declarations() {
        let err = StackBuilder::new("DemoStack")
            .with_api(api())
            .with_table(TableDefinition::new("Api", KeyAttribute::string("id")))
            .build()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Logical id 'Api' of table 'Api' collides with API 'demo'"
        );
    }
}
