//! Naming rules for provider resources

use crate::core::error::ConfigurationError;
use regex::Regex;
use std::sync::OnceLock;

/// Kind of name being validated, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// GraphQL API name
    Api,
    /// Key-value table name
    Table,
    /// Data source name
    DataSource,
    /// Table attribute name
    Attribute,
}

impl NameKind {
    fn as_str(&self) -> &'static str {
        match self {
            NameKind::Api => "API",
            NameKind::Table => "table",
            NameKind::DataSource => "data source",
            NameKind::Attribute => "attribute",
        }
    }

    fn rule(&self) -> &'static str {
        match self {
            NameKind::DataSource => {
                "must start with a letter or underscore and contain only letters, digits and underscores"
            }
            NameKind::Api => "must be non-empty and contain only letters, digits, spaces, '-' and '_'",
            NameKind::Table => "must be 3-255 characters of letters, digits, '_', '-' and '.'",
            NameKind::Attribute => "must be 1-255 characters",
        }
    }

    /// Check a name against the rule for this kind
    pub fn is_valid(&self, name: &str) -> bool {
        match self {
            NameKind::DataSource => is_graphql_name(name),
            NameKind::Api => is_api_name(name),
            NameKind::Table => is_table_name(name),
            NameKind::Attribute => !name.is_empty() && name.len() <= 255,
        }
    }

    /// Validate a name, producing a configuration error when it is rejected
    pub fn validate(&self, name: &str) -> Result<(), ConfigurationError> {
        if self.is_valid(name) {
            Ok(())
        } else {
            Err(ConfigurationError::InvalidName {
                kind: self.as_str().to_string(),
                name: name.to_string(),
                message: self.rule().to_string(),
            })
        }
    }
}

/// GraphQL `Name` production
pub fn is_graphql_name(name: &str) -> bool {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX.get_or_init(|| Regex::new(r"^[_A-Za-z][_0-9A-Za-z]*$").unwrap());
    regex.is_match(name)
}

fn is_api_name(name: &str) -> bool {
    static API_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = API_REGEX.get_or_init(|| Regex::new(r"^[_A-Za-z0-9][_A-Za-z0-9 -]*$").unwrap());
    regex.is_match(name)
}

fn is_table_name(name: &str) -> bool {
    static TABLE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TABLE_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_.-]{3,255}$").unwrap());
    regex.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_names() {
        assert!(is_graphql_name("getDemos"));
        assert!(is_graphql_name("_private"));
        assert!(!is_graphql_name("1st"));
        assert!(!is_graphql_name("get-demos"));
        assert!(!is_graphql_name(""));
    }

    #[test]
    fn test_table_names() {
        assert!(NameKind::Table.is_valid("DemoTable"));
        assert!(NameKind::Table.is_valid("demo.table-v2"));
        assert!(!NameKind::Table.is_valid("ab"));
        assert!(!NameKind::Table.is_valid("demo table"));
    }

    #[test]
    fn test_validate_reports_kind() {
        let err = NameKind::DataSource.validate("demo-ds").unwrap_err();
        assert!(err.to_string().starts_with("Invalid data source name 'demo-ds'"));
    }

    #[test]
    fn test_api_names() {
        assert!(NameKind::Api.is_valid("demo"));
        assert!(NameKind::Api.is_valid("demo api-v2"));
        assert!(!NameKind::Api.is_valid(""));
        assert!(!NameKind::Api.is_valid(" demo"));
    }
}
