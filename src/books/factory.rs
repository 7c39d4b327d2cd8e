use tracing::{info, warn};
use crate::books::repository::BookRepository;
use crate::books::repository::ddb_book_repository::DDBBookRepository;
use crate::books::repository::memory_book_repository::MemoryBookRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::utils::ddb::{build_db_client, create_table};

pub async fn create_book_repository(config: &Configuration) -> Box<dyn BookRepository> {
    info!(store = %config.store, table = %config.books_table, "creating book repository");
    match config.store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(config).await;
            Box::new(DDBBookRepository::new(client, config.books_table.as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(config).await;
            // table usually exists after the first run
            if let Err(err) = create_table(&client, config.books_table.as_str(), "book_id").await {
                warn!("could not create {} table: {}", config.books_table, err);
            }
            Box::new(DDBBookRepository::new(client, config.books_table.as_str()))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryBookRepository::new())
        }
    }
}
