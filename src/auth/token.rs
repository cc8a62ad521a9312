use crate::auth::secret::SecretStore;
use crate::error::AppError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of every issued token, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 60 * 60;

/// Represents the claims encoded within a JWT (JSON Web Token).
///
/// Decoding is strict: a token whose payload carries any other field, or lacks one of
/// these, is rejected rather than partially filled in.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// Subject of the token, the user's unique identifier.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Issues and verifies HS256 bearer tokens under a single [`SecretStore`].
///
/// Verification is stateless: any replica holding the same secret accepts tokens
/// minted by any other.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &SecretStore) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked in `verify_at` against the caller-supplied clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.expose()),
            decoding_key: DecodingKey::from_secret(secret.expose()),
            validation,
        }
    }

    /// Generates a token for `user_id`, valid for one hour from now.
    ///
    /// # Returns
    /// The compact JWT string, or `AppError::InternalServerError` if signing fails.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    /// Like [`issue`](Self::issue) with an explicit issued-at time.
    pub fn issue_at(&self, user_id: Uuid, issued_at: i64) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token against the current time and returns its subject.
    pub fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies a token as of `now` (seconds since epoch).
    ///
    /// Fails with `AppError::InvalidCredential` if the encoding is malformed, the
    /// signature does not match, the claims are not exactly `sub`/`iat`/`exp`, or
    /// `exp` is not strictly after `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Uuid, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.exp <= now {
            log::debug!("token for {} expired at {}", claims.sub, claims.exp);
            return Err(AppError::InvalidCredential);
        }
        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_for_gen_verify_0123456789";

    fn service(secret: &str) -> TokenService {
        TokenService::new(&SecretStore::new(secret).unwrap())
    }

    #[test]
    fn test_token_generation_and_verification() {
        let tokens = service(SECRET);
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_token_lifetime_is_one_hour() {
        let tokens = service(SECRET);
        let user_id = Uuid::new_v4();
        let issued_at = 1_700_000_000;
        let token = tokens.issue_at(user_id, issued_at).unwrap();

        assert_eq!(
            tokens.verify_at(&token, issued_at + TOKEN_LIFETIME_SECS - 1),
            Ok(user_id)
        );
        // Expiry must be strictly in the future.
        assert_eq!(
            tokens.verify_at(&token, issued_at + TOKEN_LIFETIME_SECS),
            Err(AppError::InvalidCredential)
        );
    }

    #[test]
    fn test_token_expiration() {
        let tokens = service(SECRET);
        let two_hours_ago = Utc::now().timestamp() - 2 * 60 * 60;
        let expired_token = tokens.issue_at(Uuid::new_v4(), two_hours_ago).unwrap();

        assert_eq!(tokens.verify(&expired_token), Err(AppError::InvalidCredential));
    }

    #[test]
    fn test_invalid_token_signature() {
        let issuer = service(SECRET);
        let verifier = service("a_completely_different_secret_value_xyz");
        let token = issuer.issue(Uuid::new_v4()).unwrap();

        assert_eq!(verifier.verify(&token), Err(AppError::InvalidCredential));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let tokens = service(SECRET);
        for garbage in ["", "not-a-jwt", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30."] {
            assert_eq!(
                tokens.verify(garbage),
                Err(AppError::InvalidCredential),
                "accepted {:?}",
                garbage
            );
        }
    }

    #[test]
    fn test_unknown_claims_rejected() {
        #[derive(Serialize)]
        struct Padded {
            sub: Uuid,
            iat: i64,
            exp: i64,
            admin: bool,
        }

        let now = Utc::now().timestamp();
        let padded = Padded {
            sub: Uuid::new_v4(),
            iat: now,
            exp: now + 600,
            admin: true,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &padded,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(service(SECRET).verify(&token), Err(AppError::InvalidCredential));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert_eq!(service(SECRET).verify(&token), Err(AppError::InvalidCredential));
    }
}
