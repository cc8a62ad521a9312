pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;
use std::sync::Arc;

use crate::auth::{AccountService, OwnershipGuard, PasswordService, SecretStore, TokenService};
use crate::error::AppError;
use crate::registry::TaskRegistry;

/// Shared services handed to handlers and to `AuthMiddleware` as app data.
#[derive(Clone)]
pub struct AppServices {
    pub tokens: web::Data<TokenService>,
    pub accounts: web::Data<AccountService>,
    pub guard: web::Data<OwnershipGuard>,
}

impl AppServices {
    pub fn new(
        secret: &SecretStore,
        passwords: PasswordService,
        registry: Arc<dyn TaskRegistry>,
    ) -> Self {
        let tokens = TokenService::new(secret);
        Self {
            accounts: web::Data::new(AccountService::new(
                registry.clone(),
                passwords,
                tokens.clone(),
            )),
            guard: web::Data::new(OwnershipGuard::new(registry)),
            tokens: web::Data::new(tokens),
        }
    }

    /// Registers the services as app data plus every route.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tokens.clone())
            .app_data(self.accounts.clone())
            .app_data(self.guard.clone());
        config(cfg);
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("rejected request body: {}", err);
        AppError::BadRequest("Invalid request data".into()).into()
    }))
    .app_data(
        web::PathConfig::default().error_handler(|_err, _req| AppError::NotFoundOrForbidden.into()),
    )
    .service(health::welcome)
    .service(health::health)
    .service(auth::signup)
    .service(auth::login)
    .service(tasks::create_task)
    .service(tasks::get_tasks)
    .service(tasks::get_task)
    .service(tasks::update_task)
    .service(tasks::delete_task);
}
