use actix_web::{http::StatusCode, HttpResponse};
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ServerError {
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "Note non trouvée.")]
    NotFound,
    #[display(fmt = "Aucun fichier envoyé.")]
    MissingFile,
    #[display(fmt = "Fichier trop volumineux.")]
    FileTooLarge,
    #[display(fmt = "{}", _0)]
    Multipart(String),
    #[display(fmt = "Diesel Error: {}", _0)]
    DieselError(String),
    #[display(fmt = "Pooling Error: {}", _0)]
    R2D2Error(String),
    #[display(fmt = "IO Error: {}", _0)]
    IoError(String),
    #[display(fmt = "Blocking task was canceled")]
    BlockingError,
}

impl From<r2d2::Error> for ServerError {
    fn from(e: r2d2::Error) -> ServerError {
        ServerError::R2D2Error(e.to_string())
    }
}

impl From<diesel::result::Error> for ServerError {
    fn from(e: diesel::result::Error) -> ServerError {
        match e {
            diesel::result::Error::NotFound => ServerError::NotFound,
            _ => ServerError::DieselError(e.to_string()),
        }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(e: std::io::Error) -> ServerError {
        ServerError::IoError(e.to_string())
    }
}

impl From<actix_web::error::BlockingError> for ServerError {
    fn from(_: actix_web::error::BlockingError) -> ServerError {
        ServerError::BlockingError
    }
}

impl From<actix_multipart::MultipartError> for ServerError {
    fn from(e: actix_multipart::MultipartError) -> ServerError {
        ServerError::Multipart(e.to_string())
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) | ServerError::MissingFile | ServerError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::DieselError(_)
            | ServerError::R2D2Error(_)
            | ServerError::IoError(_)
            | ServerError::BlockingError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}", self);
            return HttpResponse::build(status).json(json!({
                "erreur": "Erreur serveur",
                "details": self.to_string(),
            }));
        }

        HttpResponse::build(status).json(json!({ "erreur": self.to_string() }))
    }
}
