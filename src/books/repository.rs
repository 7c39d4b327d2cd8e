pub mod ddb_book_repository;
pub mod memory_book_repository;

use crate::books::domain::model::{BookEntity, BookPatch};
use crate::core::repository::Repository;

pub trait BookRepository: Repository<BookEntity, BookPatch> {}
