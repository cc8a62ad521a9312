use crate::error::AppError;
use bcrypt::{hash, verify};

/// bcrypt only reads this many bytes of input; anything past it would be ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// bcrypt hashing with a work factor fixed for the life of the process.
#[derive(Debug, Clone, Copy)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    /// `cost` must lie in bcrypt's accepted range (4..=31); hashing fails otherwise.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Produces a salted bcrypt representation of `plaintext`.
    ///
    /// Passwords longer than [`MAX_PASSWORD_BYTES`] are refused with
    /// `AppError::ValidationError` rather than truncated.
    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::ValidationError(format!(
                "password: must be at most {} bytes",
                MAX_PASSWORD_BYTES
            )));
        }
        Ok(hash(plaintext, self.cost)?)
    }

    /// Checks `plaintext` against a stored representation.
    ///
    /// A mismatch and an unparseable representation both yield
    /// `AppError::InvalidCredential`.
    pub fn verify(&self, representation: &str, plaintext: &str) -> Result<(), AppError> {
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::InvalidCredential);
        }
        match verify(plaintext, representation) {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::InvalidCredential),
            Err(e) => {
                log::warn!("stored password representation rejected: {}", e);
                Err(AppError::InvalidCredential)
            }
        }
    }
}
