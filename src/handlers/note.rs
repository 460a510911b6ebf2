use actix_web::{web, HttpResponse};
use serde_json::json;

use super::AppState;
use crate::{
    errors::ServerError,
    models::{
        note::{NoteId, NotePayload},
        page::ListParams,
    },
};

fn parse_id(raw: &str) -> Result<NoteId, ServerError> {
    NoteId::parse(raw).ok_or(ServerError::NotFound)
}

pub async fn create(
    input: web::Json<NotePayload>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    let changes = input.into_inner().validate()?;

    let store = state.store.clone();
    let note = web::block(move || store.create(changes)).await??;

    Ok(HttpResponse::Created().json(json!(note)))
}

pub async fn list(
    params: web::Query<ListParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    let query = params.into_inner().into_page_query(state.max_page_size);

    let store = state.store.clone();
    let page = web::block(move || store.list_page(&query)).await??;

    Ok(HttpResponse::Ok().json(json!(page)))
}

pub async fn list_all(state: web::Data<AppState>) -> Result<HttpResponse, ServerError> {
    let store = state.store.clone();
    let notes = web::block(move || store.list_all()).await??;

    Ok(HttpResponse::Ok().json(json!(notes)))
}

pub async fn get(
    note_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    let id = parse_id(&note_id)?;

    let store = state.store.clone();
    let note = web::block(move || store.get(&id)).await??;

    Ok(HttpResponse::Ok().json(json!(note)))
}

pub async fn update(
    note_id: web::Path<String>,
    input: web::Json<NotePayload>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    // an invalid body is rejected before we look the note up
    let changes = input.into_inner().validate()?;
    let id = parse_id(&note_id)?;

    let store = state.store.clone();
    let note = web::block(move || store.update(&id, changes)).await??;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Note mise à jour.",
        "note": note,
    })))
}

pub async fn delete(
    note_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ServerError> {
    let id = parse_id(&note_id)?;

    let store = state.store.clone();
    web::block(move || store.delete(&id)).await??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Note supprimée." })))
}
