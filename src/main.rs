use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use std::io;

use tasknest::{routes, store::PgStore, AppState, Config};

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    log::error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Refuses to start without a signing secret or database URL.
    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let store = PgStore::connect(&config)
        .await
        .map_err(|e| startup_error("failed to connect to database", e))?;
    store
        .migrate()
        .await
        .map_err(|e| startup_error("failed to run migrations", e))?;

    let state = AppState::postgres(store, &config);

    log::info!("Starting tasknest server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| routes::configure(cfg, &state))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
