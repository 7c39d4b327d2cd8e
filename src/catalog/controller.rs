use axum::{
    body::HttpBody,
    extract::{Path, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::Json,
    routing::get,
    BoxError,
    Router,
};
use serde_json::{json, Value};
use crate::books::dto::{BookDto, BookPatchDto, NewBookDto};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
use crate::catalog::domain::service::{book_not_found_message, BOOK_NOT_FOUND};
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, not_found_error, rejection_to_server_error, ServerError};

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

// generic over the body so the same routes serve hyper and API Gateway requests
pub fn app<B>(state: AppState) -> Router<(), B>
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/books", get(list_books).post(add_book))
        .route("/api/v1/books/:book_id",
               get(find_book_by_id).put(update_book).patch(update_book).delete(remove_book))
        .fallback(route_not_found)
        .with_state(state)
}

// ids are read as numbers, so "1.0" and "1e0" name book 1; anything else never matches a stored book
fn parse_book_id(book_id: &str) -> Option<i64> {
    let book_id = book_id.trim();
    if let Ok(id) = book_id.parse::<i64>() {
        return Some(id);
    }
    match book_id.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => Some(n as i64),
        _ => None,
    }
}

fn body_or_error(json: Result<Json<Value>, JsonRejection>) -> Result<Value, ServerError> {
    json.map(|Json(value)| value).map_err(rejection_to_server_error)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn route_not_found() -> ServerError {
    not_found_error(BOOK_NOT_FOUND)
}

async fn list_books(
    State(state): State<AppState>) -> Result<Json<Vec<BookDto>>, ServerError> {
    let res = ListBooksCommand::new(state.catalog_service).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res.books))
}

async fn find_book_by_id(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<Json<BookDto>, ServerError> {
    let book_id = parse_book_id(&book_id)
        .ok_or_else(|| not_found_error(BOOK_NOT_FOUND))?;
    let res = GetBookCommand::new(state.catalog_service).execute(GetBookCommandRequest::new(book_id)).await?;
    Ok(Json(res.book))
}

async fn add_book(
    State(state): State<AppState>,
    json: Result<Json<Value>, JsonRejection>) -> Result<(StatusCode, Json<BookDto>), ServerError> {
    let book: NewBookDto = serde_json::from_value(body_or_error(json)?).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog_service).execute(AddBookCommandRequest::new(book)).await?;
    Ok((StatusCode::CREATED, Json(res.book)))
}

async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    json: Result<Json<Value>, JsonRejection>) -> Result<StatusCode, ServerError> {
    let id = parse_book_id(&book_id)
        .ok_or_else(|| not_found_error(book_not_found_message(&book_id).as_str()))?;
    let patch: BookPatchDto = serde_json::from_value(body_or_error(json)?).map_err(json_to_server_error)?;
    UpdateBookCommand::new(state.catalog_service).execute(UpdateBookCommandRequest::new(id, patch)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>) -> Result<(StatusCode, Json<String>), ServerError> {
    let not_found = || not_found_error(book_not_found_message(&book_id).as_str());
    let id = parse_book_id(&book_id).ok_or_else(not_found)?;
    let res = RemoveBookCommand::new(state.catalog_service).execute(RemoveBookCommandRequest::new(id)).await?;
    if !res.deleted {
        return Err(not_found());
    }
    Ok((StatusCode::OK, Json(format!("Book deleted successfully for book id, {}", book_id))))
}
