use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use crate::books::domain::model::{BookEntity, BookPatch};
use crate::books::repository::BookRepository;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// MemoryBookRepository keeps books in process, ordered by book_id
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    books: RwLock<BTreeMap<i64, BookEntity>>,
}

impl MemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<BookEntity, BookPatch> for MemoryBookRepository {
    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn find_one(&self, id: i64) -> LibraryResult<Option<BookEntity>> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        if books.contains_key(&entity.id()) {
            return Err(LibraryError::duplicate_key(
                format!("book already exists for {}", entity.id()).as_str()));
        }
        books.insert(entity.id(), entity.clone());
        Ok(1)
    }

    async fn update(&self, id: i64, patch: &BookPatch) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        match books.get_mut(&id) {
            Some(book) => {
                book.apply(patch, Utc::now().naive_utc());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        Ok(self.books.write().await.remove(&id).map(|_| 1).unwrap_or(0))
    }
}

impl BookRepository for MemoryBookRepository {}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::{BookEntity, BookPatch};
    use crate::books::repository::memory_book_repository::MemoryBookRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::Repository;

    #[tokio::test]
    async fn test_should_create_get_books() {
        let books_repo = MemoryBookRepository::new();
        let book = BookEntity::new(1, "The Hobbit", "J. R. R. Tolkien", "jewellery");
        let size = books_repo.create(&book).await.expect("should create book");
        assert_eq!(1, size);

        let loaded = books_repo.find_one(1).await.expect("should return book");
        assert_eq!(Some(book), loaded);
        assert_eq!(None, books_repo.find_one(2).await.expect("should query book"));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_books() {
        let books_repo = MemoryBookRepository::new();
        let book = BookEntity::new(1, "The Hobbit", "J. R. R. Tolkien", "jewellery");
        books_repo.create(&book).await.expect("should create book");

        let other = BookEntity::new(1, "Other", "Someone", "else");
        let res = books_repo.create(&other).await;
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        let loaded = books_repo.find_one(1).await.expect("should return book").expect("should exist");
        assert_eq!("The Hobbit", loaded.title.as_str());
    }

    #[tokio::test]
    async fn test_should_list_books_in_order() {
        let books_repo = MemoryBookRepository::new();
        assert!(books_repo.find_all().await.expect("should list books").is_empty());
        for id in [5, 1, 3] {
            books_repo.create(&BookEntity::new(id, "title", "author", "description")).await.expect("should create book");
        }
        let ids: Vec<i64> = books_repo.find_all().await.expect("should list books")
            .iter().map(|b| b.book_id).collect();
        assert_eq!(vec![1, 3, 5], ids);
    }

    #[tokio::test]
    async fn test_should_create_update_books() {
        let books_repo = MemoryBookRepository::new();
        let book = BookEntity::new(1, "The Hobbit", "J. R. R. Tolkien", "jewellery");
        books_repo.create(&book).await.expect("should create book");

        let patch = BookPatch { description: Some("dragons".to_string()), ..BookPatch::default() };
        assert_eq!(1, books_repo.update(1, &patch).await.expect("should update book"));
        assert_eq!(0, books_repo.update(2, &patch).await.expect("should skip missing book"));

        let loaded = books_repo.find_one(1).await.expect("should return book").expect("should exist");
        assert_eq!("dragons", loaded.description.as_str());
        assert_eq!("The Hobbit", loaded.title.as_str());
    }

    #[tokio::test]
    async fn test_should_create_delete_books() {
        let books_repo = MemoryBookRepository::new();
        let book = BookEntity::new(1, "The Hobbit", "J. R. R. Tolkien", "jewellery");
        books_repo.create(&book).await.expect("should create book");

        assert_eq!(1, books_repo.delete(1).await.expect("should delete book"));
        assert_eq!(0, books_repo.delete(1).await.expect("should skip missing book"));
        assert_eq!(None, books_repo.find_one(1).await.expect("should query book"));
    }
}
