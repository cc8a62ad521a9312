pub mod account;
pub mod extractors;
pub mod guard;
pub mod middleware;
pub mod password;
pub mod secret;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::User;

// Re-export necessary items
pub use account::AccountService;
pub use extractors::AuthenticatedUser;
pub use guard::{authenticate, OwnershipGuard};
pub use middleware::AuthMiddleware;
pub use password::PasswordService;
pub use secret::SecretStore;
pub use token::{Claims, TokenService};

lazy_static! {
    // Display names: any printable text, no control characters.
    static ref DISPLAY_NAME_REGEX: regex::Regex = regex::Regex::new(r"^[^\p{Cc}]+$").unwrap();
}

/// bcrypt reads at most [`password::MAX_PASSWORD_BYTES`] bytes; `length` counts chars.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > password::MAX_PASSWORD_BYTES {
        let mut err = ValidationError::new("password_too_long");
        err.message = Some("Password must be at most 72 bytes".into());
        return Err(err);
    }
    Ok(())
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name for the new account, 1 to 100 characters.
    #[validate(
        length(min = 1, max = 100),
        regex(
            path = "DISPLAY_NAME_REGEX",
            message = "Name must not contain control characters"
        )
    )]
    pub name: String,
    /// Email address for the new account; becomes the login key.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// At least 6 characters and at most 72 bytes.
    #[validate(length(min = 6), custom = "validate_password_bytes")]
    pub password: String,
}

/// Response body after successful signup or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    /// The bearer token to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// The authenticated user, without the password representation.
    pub data: User,
}
