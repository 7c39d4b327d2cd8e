use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookDto is a data transfer object for the catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookDto {
    pub fn new(book_id: i64, title: &str, author: &str, description: &str) -> BookDto {
        let now = Utc::now().naive_utc();
        BookDto {
            book_id,
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for BookDto {
    fn id(&self) -> i64 {
        self.book_id
    }
}

// NewBookDto is the unvalidated create payload; every field may be absent
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookDto {
    pub book_id: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl NewBookDto {
    pub fn new(book_id: i64, title: &str, author: &str, description: &str) -> Self {
        Self {
            book_id: Some(book_id),
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            description: Some(description.to_string()),
        }
    }

    // the complete book, or None when a required property is missing
    pub fn build_book(&self) -> Option<BookDto> {
        match (self.book_id, &self.title, &self.author, &self.description) {
            (Some(book_id), Some(title), Some(author), Some(description)) => {
                Some(BookDto::new(book_id, title, author, description))
            }
            _ => None,
        }
    }
}

// BookPatchDto is the update payload; a bookId in the body is ignored
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPatchDto {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}
