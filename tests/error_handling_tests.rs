//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Error messages name the offending (operation type, field name) pair
//! - Error codes are stable
//! - Errors convert into `anyhow::Error` at the config boundary

use binder::prelude::*;
use std::error::Error;

// =============================================================================
// Message Tests
// =============================================================================

mod message_tests {
    use super::*;

    #[test]
    fn test_unknown_field_message() {
        let err = ConfigurationError::UnknownField {
            key: FieldKey::new(OperationType::Query, "getDemosConsistent"),
        };
        assert_eq!(
            err.to_string(),
            "Field 'Query.getDemosConsistent' is not declared in the schema"
        );
    }

    #[test]
    fn test_invalid_rule_parameter_message() {
        let err = ConfigurationError::InvalidRuleParameter {
            key: FieldKey::new(OperationType::Mutation, "addDemo"),
            parameter: "values".to_string(),
            message: "field 'addDemo' has no argument 'demo'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid mapping rule parameter 'values' for 'Mutation.addDemo': field 'addDemo' has no argument 'demo'"
        );
    }

    #[test]
    fn test_schema_parse_message_with_file() {
        let err = SchemaError::Parse {
            file: Some("schema.graphql".to_string()),
            message: "unexpected end of input".to_string(),
        };
        assert!(err.to_string().starts_with("Failed to parse schema file 'schema.graphql'"));
    }

    #[test]
    fn test_duplicate_schema_field_message() {
        let err = SchemaError::DuplicateField {
            type_name: "Query".to_string(),
            field: "getDemos".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Field 'getDemos' is declared more than once on type 'Query'"
        );
    }
}

// =============================================================================
// Conversion Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_configuration_error_into_binder_error() {
        let err: BinderError = ConfigurationError::MissingApi.into();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_schema_error_into_binder_error() {
        let err: BinderError = SchemaError::Io {
            path: "missing.graphql".to_string(),
            message: "No such file or directory".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "SCHEMA_ERROR");
        assert!(err.field_key().is_none());
    }

    #[test]
    fn test_binder_error_into_anyhow() {
        fn build() -> Result<()> {
            let err = BinderError::from(ConfigurationError::DuplicateBinding {
                key: FieldKey::new(OperationType::Query, "getDemos"),
            });
            Err(err.into())
        }

        let err = build().unwrap_err();
        let binder_err = err.downcast_ref::<BinderError>().unwrap();
        assert_eq!(
            binder_err.field_key(),
            Some(&FieldKey::new(OperationType::Query, "getDemos"))
        );
    }
}
