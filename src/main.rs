use std::time::Duration;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use env_logger::Env;

use question_catalog::db::{lazy_connection_pool, run_migrations};
use question_catalog::models::config::ServerConfig;
use question_catalog::repository::DieselRepository;
use question_catalog::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid server configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = lazy_connection_pool(
        &server_config.database_url,
        Duration::from_secs(server_config.db_connection_timeout_secs),
    );

    // The server starts even if the store is down; requests then answer 503.
    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to prepare database: {e}");
    }

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting {} server on {}:{}",
        server_config.environment,
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
