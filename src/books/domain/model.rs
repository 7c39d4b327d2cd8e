use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// BookEntity is the stored form of a book, keyed by the business identifier book_id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(book_id: i64, title: &str, author: &str, description: &str) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            book_id,
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: &BookPatch, now: NaiveDateTime) {
        if let Some(title) = &patch.title {
            self.title = title.to_string();
        }
        if let Some(author) = &patch.author {
            self.author = author.to_string();
        }
        if let Some(description) = &patch.description {
            self.description = description.to_string();
        }
        self.updated_at = now;
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> i64 {
        self.book_id
    }
}

// BookPatch carries the mutable fields of an update; book_id is never patched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.description.is_none()
    }
}
