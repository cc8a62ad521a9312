use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use std::io;
use std::sync::Arc;

use tasktrack::auth::{AuthMiddleware, PasswordService};
use tasktrack::config::Config;
use tasktrack::registry::{MemoryRegistry, PgRegistry, TaskRegistry};
use tasktrack::AppServices;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config =
        Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let registry: Arc<dyn TaskRegistry> = match &config.database_url {
        Some(url) => {
            let registry = PgRegistry::connect(url)
                .await
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            log::info!("using PostgreSQL task registry");
            Arc::new(registry)
        }
        None => {
            log::warn!("DATABASE_URL not set; tasks and users live in memory only");
            Arc::new(MemoryRegistry::new())
        }
    };

    let services = AppServices::new(
        &config.jwt_secret,
        PasswordService::new(config.bcrypt_cost),
        registry,
    );

    log::info!("Starting task tracker at {}", config.server_url());
    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .configure(move |cfg| services.configure(cfg))
            .wrap(AuthMiddleware)
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
