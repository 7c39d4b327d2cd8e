use async_trait::async_trait;
use tracing::{debug, info};
use crate::books::domain::model::{BookEntity, BookPatch};
use crate::books::dto::{BookDto, BookPatchDto, NewBookDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

pub const BOOK_NOT_FOUND: &str = "Not found";
pub const MISSING_REQUIRED_PROPERTIES: &str = "Invalid book object: Missing required properties";
pub const UNABLE_TO_DELETE_BOOK: &str = "Unable to delete book";

pub fn book_exists_message(book_id: i64) -> String {
    format!("The book with this bookId, {} already exists", book_id)
}

pub fn book_not_found_message(book_id: &str) -> String {
    format!("Book not found for book id, {}", book_id)
}

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }

    async fn delete_existing(&self, book_id: i64) -> LibraryResult<bool> {
        if self.book_repository.find_one(book_id).await?.is_none() {
            return Ok(false);
        }
        // zero rows means a concurrent delete got there first
        Ok(self.book_repository.delete(book_id).await? > 0)
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.find_all().await?;
        debug!("listing {} books", books.len());
        Ok(books.iter().map(BookDto::from).collect())
    }

    async fn find_book_by_id(&self, book_id: i64) -> LibraryResult<BookDto> {
        self.book_repository.find_one(book_id).await?
            .map(|b| BookDto::from(&b))
            .ok_or_else(|| LibraryError::not_found(BOOK_NOT_FOUND))
    }

    // existence is checked before completeness, so a duplicate id wins over missing fields
    async fn add_book(&self, book: &NewBookDto) -> LibraryResult<BookDto> {
        if let Some(book_id) = book.book_id {
            if self.book_repository.find_one(book_id).await?.is_some() {
                return Err(LibraryError::duplicate_key(book_exists_message(book_id).as_str()));
            }
        }
        let book = book.build_book()
            .ok_or_else(|| LibraryError::validation(MISSING_REQUIRED_PROPERTIES, None))?;
        match self.book_repository.create(&BookEntity::from(&book)).await {
            Ok(_) => {
                info!(book_id = book.id(), "added book");
                Ok(book)
            }
            Err(LibraryError::DuplicateKey { .. }) => {
                Err(LibraryError::duplicate_key(book_exists_message(book.id()).as_str()))
            }
            Err(err) => Err(err),
        }
    }

    async fn update_book(&self, book_id: i64, patch: &BookPatchDto) -> LibraryResult<()> {
        let updated = self.book_repository.update(book_id, &BookPatch::from(patch)).await?;
        if updated == 0 {
            return Err(LibraryError::not_found(book_not_found_message(book_id.to_string().as_str()).as_str()));
        }
        info!(book_id, "updated book");
        Ok(())
    }

    async fn remove_book(&self, book_id: i64) -> LibraryResult<bool> {
        match self.delete_existing(book_id).await {
            Ok(deleted) => {
                if deleted {
                    info!(book_id, "removed book");
                }
                Ok(deleted)
            }
            Err(err) => Err(LibraryError::runtime(UNABLE_TO_DELETE_BOOK, Some(err.to_string()))),
        }
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            description: other.description.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            book_id: other.book_id,
            title: other.title.to_string(),
            author: other.author.to_string(),
            description: other.description.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookPatchDto> for BookPatch {
    fn from(other: &BookPatchDto) -> Self {
        Self {
            title: other.title.clone(),
            author: other.author.clone(),
            description: other.description.clone(),
        }
    }
}
