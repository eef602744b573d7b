use std::time::Duration;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};

use rainbow_toys::cache::CatalogCache;
use rainbow_toys::db::{establish_connection_pool, migrations};
use rainbow_toys::models::config::ServerConfig;
use rainbow_toys::notifier::EmailNotifier;
use rainbow_toys::repository::DieselRepository;
use rainbow_toys::routes;
use rainbow_toys::storage::LocalObjectStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match migrations::run_pending(&pool) {
        Ok(applied) => log::info!("Applied {applied} pending migrations"),
        Err(e) => {
            log::error!("Failed to run database migrations: {e}");
            std::process::exit(1);
        }
    }

    let repo = web::Data::new(DieselRepository::new(pool));
    let cache = web::Data::new(CatalogCache::new(Duration::from_secs(
        server_config.catalog_cache_ttl_secs,
    )));
    let notifier = match EmailNotifier::new(&server_config.email, &server_config.operator) {
        Ok(notifier) => web::Data::new(notifier),
        Err(e) => {
            log::error!("Failed to set up order notifications: {e}");
            std::process::exit(1);
        }
    };
    let store = LocalObjectStore::from_config(&server_config.storage);
    if let Err(e) = std::fs::create_dir_all(store.root()) {
        log::error!("Failed to create upload directory: {e}");
        std::process::exit(1);
    }
    let upload_dir = store.root().clone();
    let public_base_url = server_config.storage.public_base_url.clone();
    let store = web::Data::new(store);
    let admin_config = web::Data::new(server_config.admin.clone());
    let operator_config = web::Data::new(server_config.operator.clone());

    let bind_address = server_config.bind_address();
    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(repo.clone())
            .app_data(cache.clone())
            .app_data(notifier.clone())
            .app_data(store.clone())
            .app_data(admin_config.clone())
            .app_data(operator_config.clone())
            .configure(routes::configure)
            .service(Files::new(&public_base_url, &upload_dir))
    })
    .bind(bind_address)?
    .run()
    .await
}
