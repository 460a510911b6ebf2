use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use actix_files::Files;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::{errors::ServerError, store::NoteStore};

pub mod note;
pub mod upload;

/// URL prefix under which uploaded files are served back.
pub const UPLOADS_PATH: &str = "/uploads";

pub struct AppState {
    pub store: Arc<dyn NoteStore>,
    pub upload_dir: PathBuf,
    pub max_page_size: Option<i64>,
    pub max_upload_bytes: Option<usize>,
}

pub fn configure(cfg: &mut web::ServiceConfig, upload_dir: &Path) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| ServerError::Validation(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| ServerError::Validation(err.to_string()).into()),
    )
    .route("/upload", web::post().to(upload::upload))
    .service(Files::new(UPLOADS_PATH, upload_dir))
    .service(
        web::scope("/notes")
            .route("", web::get().to(note::list))
            .route("", web::post().to(note::create))
            .route("/all", web::get().to(note::list_all))
            .route("/{id}", web::get().to(note::get))
            .route("/{id}", web::put().to(note::update))
            .route("/{id}", web::delete().to(note::delete)),
    )
    .default_service(web::route().to(unknown_route));
}

pub async fn unknown_route(req: HttpRequest) -> HttpResponse {
    log::warn!("no route for {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(json!({ "erreur": "Route inconnue" }))
}
