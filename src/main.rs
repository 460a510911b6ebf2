use std::{io, sync::Arc};

use actix_cors::Cors;
use actix_web::{
    dev::Service,
    middleware::{Logger, NormalizePath},
    web, App, HttpServer,
};

mod config;
mod errors;
mod handlers;
mod models;
mod schema;
mod store;

use config::AppConfig;
use handlers::AppState;
use store::pg::PgNoteStore;

fn startup_error(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(startup_error)?;

    let store = PgNoteStore::connect(&config.database_url, config.pool_size)
        .map_err(startup_error)?;
    store.run_migrations().map_err(startup_error)?;

    std::fs::create_dir_all(&config.upload_dir)?;

    let state = web::Data::new(AppState {
        store: Arc::new(store),
        upload_dir: config.upload_dir.clone(),
        max_page_size: config.max_page_size,
        max_upload_bytes: config.max_upload_bytes,
    });
    let upload_dir = config.upload_dir.clone();

    log::info!("listening on 0.0.0.0:{}", config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(|cfg| handlers::configure(cfg, &upload_dir))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .wrap_fn(|req, srv| {
                log::info!("{} {}", req.method(), req.path());
                srv.call(req)
            })
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
