use crate::{
    auth::{AccountService, AuthResponse, LoginRequest, SignupRequest},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates a new account and returns a bearer token with the user record.
///
/// ## Responses:
/// - `201 Created`: `{ message, token, data: user }`.
/// - `409 Conflict`: the email is already registered.
/// - `422 Unprocessable Entity`: invalid name, email or password.
#[post("/signup")]
pub async fn signup(
    accounts: web::Data<AccountService>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    let (token, user) = accounts.signup(signup_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "sign up successful".into(),
        token,
        data: user,
    }))
}

/// Login user
///
/// Authenticates a user and returns a bearer token.
///
/// ## Responses:
/// - `200 OK`: `{ message, token, data: user }`.
/// - `401 Unauthorized`: unknown email or wrong password.
/// - `422 Unprocessable Entity`: malformed email or password.
#[post("/login")]
pub async fn login(
    accounts: web::Data<AccountService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let (token, user) = accounts.login(login_data.into_inner()).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "login successful".into(),
        token,
        data: user,
    }))
}
