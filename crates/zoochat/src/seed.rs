//! Demo data for `--seed-demo`.

use zoochat_core::assistant::{demo_assistants, demo_guardrail};
use zoochat_core::storage::Result;

use crate::state::AppState;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub guardrails_created: usize,
    pub assistants_created: usize,
}

/// Inserts the demo guardrail and assistants.
///
/// Entities are matched by name, so running this again only fills gaps.
/// New assistants attach to whichever "Zoo Safety" guardrail is stored.
pub async fn seed_demo(state: &AppState) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    let candidate = demo_guardrail();
    let existing = state
        .guardrails
        .list_guardrails()
        .await?
        .into_iter()
        .find(|g| g.name == candidate.name);

    let guardrail = match existing {
        Some(guardrail) => guardrail,
        None => {
            state.guardrails.create_guardrail(&candidate).await?;
            report.guardrails_created += 1;
            candidate
        }
    };

    let stored_names: Vec<String> = state
        .assistants
        .list_assistants()
        .await?
        .into_iter()
        .map(|a| a.name)
        .collect();

    for assistant in demo_assistants(&guardrail) {
        if stored_names.contains(&assistant.name) {
            tracing::debug!(name = %assistant.name, "Demo assistant already present");
            continue;
        }
        state.assistants.create_assistant(&assistant).await?;
        report.assistants_created += 1;
    }

    tracing::info!(
        guardrails = report.guardrails_created,
        assistants = report.assistants_created,
        "Seeded demo data"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zoochat_auth::AuthConfig;

    fn state() -> AppState {
        AppState::in_memory(AuthConfig::new("seed-test-secret-with-at-least-32-bytes").unwrap())
    }

    #[tokio::test]
    async fn test_seed_creates_demo_content() {
        let state = state();
        let report = seed_demo(&state).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                guardrails_created: 1,
                assistants_created: 3
            }
        );

        let guardrails = state.guardrails.list_guardrails().await.unwrap();
        let assistants = state.assistants.list_assistants().await.unwrap();
        assert_eq!(guardrails.len(), 1);
        assert!(assistants
            .iter()
            .all(|a| a.guardrail_id == Some(guardrails[0].id)));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let state = state();
        seed_demo(&state).await.unwrap();

        let again = seed_demo(&state).await.unwrap();
        assert_eq!(again, SeedReport::default());
        assert_eq!(state.assistants.list_assistants().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_seed_fills_gaps() {
        let state = state();
        seed_demo(&state).await.unwrap();

        let pip = state
            .assistants
            .list_assistants()
            .await
            .unwrap()
            .into_iter()
            .find(|a| a.name == "Pip")
            .unwrap();
        state.assistants.delete_assistant(pip.id).await.unwrap();

        let report = seed_demo(&state).await.unwrap();
        assert_eq!(report.assistants_created, 1);
        assert_eq!(report.guardrails_created, 0);
    }
}
