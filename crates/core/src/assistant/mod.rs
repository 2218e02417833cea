mod mock_data;
mod operations;
mod requests;
mod types;

pub use mock_data::{demo_assistants, demo_guardrail};
pub use operations::{validate_assistant, validate_guardrail};
pub use requests::{
    CreateAssistantRequest, CreateGuardrailRequest, ListAssistantsQuery, UpdateAssistantRequest,
    UpdateGuardrailRequest,
};
pub use types::{Assistant, Guardrail};
