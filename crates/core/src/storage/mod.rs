mod error;
mod traits;

pub use error::{RepositoryError, Result};
pub use traits::{
    AssistantRepository, ConversationRepository, GuardrailRepository, UserDetailsRepository,
    UserRepository,
};
