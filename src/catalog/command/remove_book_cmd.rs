use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct RemoveBookCommandRequest {
    pub(crate) book_id: i64,
}

impl RemoveBookCommandRequest {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveBookCommandResponse {
    pub deleted: bool,
}

impl RemoveBookCommandResponse {
    pub fn new(deleted: bool) -> Self {
        Self {
            deleted,
        }
    }
}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        self.catalog_service.remove_book(req.book_id).await
            .map_err(CommandError::from).map(RemoveBookCommandResponse::new)
    }
}
