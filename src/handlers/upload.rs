use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use futures_util::TryStreamExt;
use nanoid::nanoid;
use serde_json::json;

use super::{AppState, UPLOADS_PATH};
use crate::errors::ServerError;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Keeps the last path component of the client's filename and replaces
/// anything that would need escaping in a URL.
fn sanitize(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// `<unix millis>-<random suffix>-<original name>`; the suffix keeps two
/// uploads of the same name within one millisecond apart.
fn stored_name(original: &str) -> String {
    format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        nanoid!(8),
        sanitize(original)
    )
}

pub async fn upload(
    req: HttpRequest,
    mut payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    let mut file: Option<(String, web::BytesMut)> = None;

    while let Some(mut field) = payload.try_next().await? {
        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_owned);

        match filename {
            Some(name) if field.name() == FILE_FIELD && file.is_none() => {
                let mut bytes = web::BytesMut::new();
                while let Some(chunk) = field.try_next().await? {
                    if let Some(max) = state.max_upload_bytes {
                        if bytes.len() + chunk.len() > max {
                            return Err(ServerError::FileTooLarge);
                        }
                    }
                    bytes.extend_from_slice(&chunk);
                }
                file = Some((name, bytes));
            }
            _ => while field.try_next().await?.is_some() {},
        }
    }

    let (original, bytes) = file.ok_or(ServerError::MissingFile)?;
    let filename = stored_name(&original);
    let path = state.upload_dir.join(&filename);

    web::block(move || std::fs::write(path, bytes)).await??;
    log::info!("stored upload {} ({})", filename, original);

    let info = req.connection_info();
    let url = format!(
        "{}://{}{}/{}",
        info.scheme(),
        info.host(),
        UPLOADS_PATH,
        filename
    );

    Ok(HttpResponse::Created().json(json!({
        "message": "Fichier uploadé avec succès.",
        "url": url,
    })))
}
