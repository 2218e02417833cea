mod error;
mod functions;
mod types;

pub use error::AuthError;
pub use functions::{
    calculate_expiry, extract_bearer_token, is_admin_email, is_expired, parse_admin_emails,
};
pub use types::Claims;
