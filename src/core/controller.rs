use std::sync::Arc;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::library::ErrorKind;

pub const INVALID_BOOK_PREFIX: &str = "Invalid book object";

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(catalog_service: Arc<dyn CatalogService>) -> AppState {
        AppState {
            catalog_service,
        }
    }
}

// 404s answer with a bare JSON string, every other error with `{ "message": ... }`
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    Message { message: String },
    Text(String),
}

impl ErrorBody {
    pub fn message(&self) -> &str {
        match self {
            ErrorBody::Message { message } => { message }
            ErrorBody::Text(message) => { message }
        }
    }
}

pub type ServerError = (StatusCode, Json<ErrorBody>);

pub fn server_error(status: StatusCode, message: &str) -> ServerError {
    (status, Json(ErrorBody::Message { message: message.to_string() }))
}

pub fn not_found_error(message: &str) -> ServerError {
    (StatusCode::NOT_FOUND, Json(ErrorBody::Text(message.to_string())))
}

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    server_error(StatusCode::BAD_REQUEST, format!("{}: {}", INVALID_BOOK_PREFIX, err).as_str())
}

pub fn rejection_to_server_error(err: JsonRejection) -> ServerError {
    server_error(StatusCode::BAD_REQUEST, format!("{}: {}", INVALID_BOOK_PREFIX, err.body_text()).as_str())
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => not_found_error(err.message()),
            kind => server_error(status_for(kind), err.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;
    use crate::core::command::CommandError;
    use crate::core::controller::{json_to_server_error, ErrorBody, ServerError};

    #[tokio::test]
    async fn test_should_map_command_errors() {
        let (status, body) = ServerError::from(CommandError::DuplicateKey { message: "dup".to_string() });
        assert_eq!(StatusCode::CONFLICT, status);
        assert_eq!(ErrorBody::Message { message: "dup".to_string() }, body.0);

        let (status, body) = ServerError::from(CommandError::not_found("missing"));
        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!(ErrorBody::Text("missing".to_string()), body.0);

        let (status, _) = ServerError::from(CommandError::validation("bad"));
        assert_eq!(StatusCode::BAD_REQUEST, status);

        let (status, body) = ServerError::from(CommandError::Internal { message: "Internal server error".to_string() });
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
        assert_eq!("Internal server error", body.0.message());
    }

    #[tokio::test]
    async fn test_should_serialize_error_bodies() {
        let body = serde_json::to_value(ErrorBody::Message { message: "dup".to_string() }).expect("should serialize");
        assert_eq!(json!({ "message": "dup" }), body);
        let body = serde_json::to_value(ErrorBody::Text("Not found".to_string())).expect("should serialize");
        assert_eq!(json!("Not found"), body);
    }

    #[tokio::test]
    async fn test_should_map_json_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("should fail");
        let (status, body) = json_to_server_error(err);
        assert_eq!(StatusCode::BAD_REQUEST, status);
        assert!(body.0.message().starts_with("Invalid book object: "));
    }
}
