//! Table configuration types (Functional Core - pure data).

/// Default table name, matching the server's `DYNAMODB_TABLE_NAME` default.
pub const DEFAULT_TABLE_NAME: &str = "zoochat";

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub gsis: Vec<GsiConfig>,
}

/// A string key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
}

/// Global Secondary Index configuration. Every index projects all attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GsiConfig {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    /// Every distinct key attribute of the table and its indexes, in declaration order.
    pub fn key_attributes(&self) -> Vec<&KeyAttribute> {
        let mut attributes: Vec<&KeyAttribute> = Vec::new();
        let all = std::iter::once(&self.partition_key)
            .chain(self.sort_key.iter())
            .chain(
                self.gsis
                    .iter()
                    .flat_map(|gsi| std::iter::once(&gsi.partition_key).chain(gsi.sort_key.iter())),
            );
        for attribute in all {
            if !attributes.iter().any(|a| a.name == attribute.name) {
                attributes.push(attribute);
            }
        }
        attributes
    }
}

fn key(name: &str) -> KeyAttribute {
    KeyAttribute {
        name: name.to_string(),
    }
}

fn gsi(name: &str) -> GsiConfig {
    GsiConfig {
        name: name.to_string(),
        partition_key: key(&format!("{name}PK")),
        sort_key: Some(key(&format!("{name}SK"))),
    }
}

/// Returns the single-table layout the server expects.
///
/// - GSI1: user lookup by email and a user's conversation turns.
/// - GSI2: listing users, assistants and guardrails by entity type.
pub fn zoochat_table_config() -> TableConfig {
    TableConfig {
        table_name: DEFAULT_TABLE_NAME.to_string(),
        partition_key: key("PK"),
        sort_key: Some(key("SK")),
        gsis: vec![gsi("GSI1"), gsi("GSI2")],
    }
}
