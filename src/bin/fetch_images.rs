//! Copy each catalog item's `og:image` into local storage.
//!
//! Uses the same configuration as the server. Run it while the server is
//! stopped or accept that the public catalog shows the old images until the
//! catalog cache expires.

use rainbow_toys::db::{establish_connection_pool, migrations};
use rainbow_toys::ingest::{ITEM_DELAY, http_client, ingest_catalog_images};
use rainbow_toys::models::config::ServerConfig;
use rainbow_toys::repository::DieselRepository;
use rainbow_toys::storage::LocalObjectStore;

#[actix_web::main]
async fn main() {
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
    if let Err(e) = migrations::run_pending(&pool) {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }

    let client = match http_client() {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    let store = LocalObjectStore::from_config(&server_config.storage);

    match ingest_catalog_images(&repo, &store, &client, ITEM_DELAY).await {
        Ok(report) => {
            println!("Done: {} succeeded, {} failed", report.succeeded, report.failed);
            if report.failed > 0 {
                std::process::exit(2);
            }
        }
        Err(e) => {
            log::error!("Failed to list catalog items: {e}");
            std::process::exit(1);
        }
    }
}
