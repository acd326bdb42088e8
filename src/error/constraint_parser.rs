use regex::Regex;
use std::sync::OnceLock;

/// Utility for parsing PostgreSQL constraint violation messages.
pub struct ConstraintParser;

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // "Key (field)=(value)"
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid regex"),
            column_name: Regex::new(r#"column "([^"]+)""#).expect("valid regex"),
            table_name: Regex::new(r#"(?:table|relation) "([^"]+)""#).expect("valid regex"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Extracts `(entity, field, value)` from a unique violation.
    ///
    /// The constraint name (`members_name_key`) is preferred for entity and
    /// field; the value always comes from the `DETAIL` line when present.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = Self::extract_key_value_from_message(message)
                .map(|(_, v)| v)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Extracts `(entity, field)` from a not-null violation.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_table_from_message(message)
            .or_else(|| constraint_name.and_then(Self::parse_constraint_name).map(|(e, _)| e))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Extracts `(entity, field, referenced_value)` from a foreign key violation.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value_from_message(message);

        if let Some((entity, field)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, v)| v)
                .unwrap_or_else(|| "invalid_reference".to_string());
            return Some((entity, field, value));
        }

        let (field, value) = key_value?;
        let entity =
            Self::extract_table_from_message(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Splits a PostgreSQL default constraint name into `(table, column)`.
    ///
    /// Handles the `_key`, `_fkey`, `_check` and `_pkey` suffixes; the table
    /// name is everything before the first underscore.
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        let stem = ["_fkey", "_pkey", "_check", "_key"]
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))?;
        let (table, column) = stem.split_once('_')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        let caps = Self::patterns().key_value.captures(message)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    }

    fn extract_column_from_message(message: &str) -> Option<String> {
        let caps = Self::patterns().column_name.captures(message)?;
        Some(caps[1].to_string())
    }

    fn extract_table_from_message(message: &str) -> Option<String> {
        let caps = Self::patterns().table_name.captures(message)?;
        Some(caps[1].to_string())
    }
}
