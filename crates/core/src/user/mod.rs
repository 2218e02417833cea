mod operations;
mod requests;
mod types;

pub use operations::{
    normalize_email, validate_email, validate_password, validate_registration,
    validate_user_details, validate_user_name, MAX_FAVORITE_ANIMALS, MAX_USER_AGE,
};
pub use requests::{
    LoginRequest, RegisterRequest, TokenResponse, UpdateUserRequest, UpsertUserDetailsRequest,
};
pub use types::{User, UserDetails, UserRole};
