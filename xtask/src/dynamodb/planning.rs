//! Pure functions for calculating deployment plans (Functional Core).

use super::config::{GsiConfig, TableConfig};

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    pub gsis: Vec<GsiState>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Busy,
}

/// GSI state.
#[derive(Debug, Clone)]
pub struct GsiState {
    pub name: String,
    pub active: bool,
}

impl TableState {
    /// Table and all of its indexes can take traffic.
    pub fn is_ready(&self) -> bool {
        self.status == TableStatus::Active && self.gsis.iter().all(|g| g.active)
    }
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists, GSIs need to be added (one at a time).
    AddGsis {
        table_name: String,
        gsis_to_add: Vec<GsiConfig>,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Calculate what changes are needed to reach the desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    let gsis_to_add: Vec<GsiConfig> = desired
        .gsis
        .iter()
        .filter(|gsi| !state.gsis.iter().any(|g| g.name == gsi.name))
        .cloned()
        .collect();

    if gsis_to_add.is_empty() {
        DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        }
    } else {
        DeployPlan::AddGsis {
            table_name: desired.table_name.clone(),
            gsis_to_add,
        }
    }
}

/// Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    let table_name = table_name.to_string();
    match current {
        Some(_) => DestroyPlan::DeleteTable { table_name },
        None => DestroyPlan::AlreadyGone { table_name },
    }
}

/// Format a deploy plan for display. Lines start with `+`, `~` or `=`.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!("  Partition key: {} (S)", config.partition_key.name),
            ];
            if let Some(sk) = &config.sort_key {
                lines.push(format!("  Sort key: {} (S)", sk.name));
            }
            for gsi in &config.gsis {
                lines.push(format!("  + GSI: {}", gsi.name));
                lines.push(format!("    Partition key: {} (S)", gsi.partition_key.name));
                if let Some(sk) = &gsi.sort_key {
                    lines.push(format!("    Sort key: {} (S)", sk.name));
                }
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::AddGsis {
            table_name,
            gsis_to_add,
        } => std::iter::once(format!("~ Update table: {}", table_name))
            .chain(gsis_to_add.iter().map(|g| format!("  + Add GSI: {}", g.name)))
            .collect(),
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::zoochat_table_config;

    fn state_with(gsis: &[&str]) -> TableState {
        TableState {
            status: TableStatus::Active,
            gsis: gsis
                .iter()
                .map(|name| GsiState {
                    name: name.to_string(),
                    active: true,
                })
                .collect(),
        }
    }

    #[test]
    fn missing_table_is_created() {
        let config = zoochat_table_config();
        let plan = calculate_deploy_plan(None, &config);
        assert_eq!(plan, DeployPlan::CreateTable { config });
    }

    #[test]
    fn table_from_older_layout_gets_gsi2() {
        let config = zoochat_table_config();
        let state = state_with(&["GSI1"]);

        match calculate_deploy_plan(Some(&state), &config) {
            DeployPlan::AddGsis { gsis_to_add, .. } => {
                assert_eq!(gsis_to_add.len(), 1);
                assert_eq!(gsis_to_add[0].name, "GSI2");
            }
            other => panic!("unexpected plan: {other:?}"),
        }
    }

    #[test]
    fn complete_table_needs_nothing() {
        let config = zoochat_table_config();
        let state = state_with(&["GSI1", "GSI2"]);
        let plan = calculate_deploy_plan(Some(&state), &config);

        assert!(matches!(plan, DeployPlan::NoChanges { .. }));
        assert_eq!(format_deploy_plan(&plan), vec!["= Table 'zoochat' is up to date"]);
    }

    #[test]
    fn create_plan_lists_every_index() {
        let plan = DeployPlan::CreateTable {
            config: zoochat_table_config(),
        };
        let lines = format_deploy_plan(&plan);

        assert_eq!(lines[0], "+ Create table: zoochat");
        assert!(lines.contains(&"  + GSI: GSI1".to_string()));
        assert!(lines.contains(&"  + GSI: GSI2".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("  Billing: PAY_PER_REQUEST"));
    }

    #[test]
    fn destroy_plan_depends_on_existence() {
        let state = state_with(&[]);
        assert!(matches!(
            calculate_destroy_plan(Some(&state), "zoochat"),
            DestroyPlan::DeleteTable { .. }
        ));
        assert!(matches!(
            calculate_destroy_plan(None, "zoochat"),
            DestroyPlan::AlreadyGone { .. }
        ));
    }

    #[test]
    fn readiness_requires_active_indexes() {
        let mut state = state_with(&["GSI1"]);
        assert!(state.is_ready());

        state.gsis[0].active = false;
        assert!(!state.is_ready());

        state.gsis[0].active = true;
        state.status = TableStatus::Busy;
        assert!(!state.is_ready());
    }
}
