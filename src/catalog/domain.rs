pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDto, BookPatchDto, NewBookDto};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn find_book_by_id(&self, book_id: i64) -> LibraryResult<BookDto>;
    async fn add_book(&self, book: &NewBookDto) -> LibraryResult<BookDto>;
    async fn update_book(&self, book_id: i64, patch: &BookPatchDto) -> LibraryResult<()>;
    // true when the book existed and was deleted
    async fn remove_book(&self, book_id: i64) -> LibraryResult<bool>;
}
