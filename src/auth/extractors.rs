use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::guard::authenticate;
use crate::auth::token::TokenService;
use crate::error::AppError;

/// The authenticated caller's user id.
///
/// `AuthMiddleware` inserts this into request extensions after verifying the bearer
/// token. When a handler is mounted without the middleware, the extractor runs the
/// same check itself, so a handler taking `AuthenticatedUser` is never reachable
/// anonymously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<AuthenticatedUser>().copied() {
            return ready(Ok(user));
        }

        let result = match req.app_data::<web::Data<TokenService>>() {
            Some(tokens) => authenticate(req.headers(), tokens).map(AuthenticatedUser),
            None => Err(AppError::InternalServerError(
                "TokenService not configured".into(),
            )),
        };
        ready(result.map_err(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::secret::SecretStore;
    use actix_web::dev::Payload;
    use actix_web::http::{header, StatusCode};
    use actix_web::test;

    fn tokens() -> TokenService {
        TokenService::new(&SecretStore::new("extractor-test-secret-0123456789abcd").unwrap())
    }

    #[actix_rt::test]
    async fn test_authenticated_user_from_extensions() {
        let user_id = Uuid::new_v4();
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(AuthenticatedUser(user_id));

        let mut payload = Payload::None;
        let extracted = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert_eq!(extracted.unwrap().0, user_id);
    }

    #[actix_rt::test]
    async fn test_authenticated_user_from_header() {
        let tokens = tokens();
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id).unwrap();
        let req = test::TestRequest::default()
            .app_data(web::Data::new(tokens))
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_http_request();

        let mut payload = Payload::None;
        let extracted = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert_eq!(extracted.unwrap(), AuthenticatedUser(user_id));
    }

    #[actix_rt::test]
    async fn test_authenticated_user_missing_header() {
        let req = test::TestRequest::default()
            .app_data(web::Data::new(tokens()))
            .to_http_request();

        let mut payload = Payload::None;
        let err = AuthenticatedUser::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }
}
