use std::sync::Arc;
use async_trait::async_trait;
use crate::books::dto::BookPatchDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandRequest {
    pub book_id: i64,
    pub patch: BookPatchDto,
}

impl UpdateBookCommandRequest {
    pub fn new(book_id: i64, patch: BookPatchDto) -> Self {
        Self {
            book_id,
            patch,
        }
    }
}

#[derive(Debug)]
pub(crate) struct UpdateBookCommandResponse {}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(req.book_id, &req.patch)
            .await.map_err(CommandError::from).map(|_| UpdateBookCommandResponse {})
    }
}
