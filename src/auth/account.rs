use std::sync::Arc;
use validator::Validate;

use crate::auth::password::PasswordService;
use crate::auth::token::TokenService;
use crate::auth::{LoginRequest, SignupRequest};
use crate::error::AppError;
use crate::models::{normalize_email, User};
use crate::registry::TaskRegistry;

/// Signup and login: the two places a bearer token is minted.
#[derive(Clone)]
pub struct AccountService {
    registry: Arc<dyn TaskRegistry>,
    passwords: PasswordService,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(
        registry: Arc<dyn TaskRegistry>,
        passwords: PasswordService,
        tokens: TokenService,
    ) -> Self {
        Self {
            registry,
            passwords,
            tokens,
        }
    }

    /// Registers a new user and returns a fresh token alongside the stored record.
    ///
    /// An already-registered email fails with `DuplicateIdentity` and writes nothing.
    pub async fn signup(&self, request: SignupRequest) -> Result<(String, User), AppError> {
        request.validate()?;
        let email = normalize_email(&request.email);

        if self.registry.email_exists(&email).await? {
            log::info!("signup rejected: email already registered");
            return Err(AppError::DuplicateIdentity);
        }

        let password_hash = self.passwords.hash(&request.password)?;
        let user = User::new(request.name, email, password_hash);
        // Sign before insert: a signing failure must leave no account behind.
        let token = self.tokens.issue(user.id)?;
        self.registry.create_user(&user).await?;

        log::info!("user {} registered", user.id);
        Ok((token, user))
    }

    /// Checks credentials and returns a fresh token.
    ///
    /// Unknown email and wrong password are both `InvalidCredential`.
    pub async fn login(&self, request: LoginRequest) -> Result<(String, User), AppError> {
        request.validate()?;
        let email = normalize_email(&request.email);

        let user = self
            .registry
            .find_user_by_email(&email)
            .await?
            .ok_or(AppError::InvalidCredential)?;
        self.passwords.verify(&user.password_hash, &request.password)?;

        let token = self.tokens.issue(user.id)?;
        log::info!("user {} logged in", user.id);
        Ok((token, user))
    }
}
