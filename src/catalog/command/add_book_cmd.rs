use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::books::dto::{BookDto, NewBookDto};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) book: NewBookDto,
}

impl AddBookCommandRequest {
    pub fn new(book: NewBookDto) -> Self {
        Self {
            book,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(&req.book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
