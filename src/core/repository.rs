use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use async_trait::async_trait;
use crate::core::library::{LibraryError, LibraryResult};

#[async_trait]
pub trait Repository<Entity, Patch>: Sync + Send {
    // all entities ordered by id
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;

    // an entity by its business key
    async fn find_one(&self, id: i64) -> LibraryResult<Option<Entity>>;

    // create an entity, fails with DuplicateKey if the id is taken
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // applies patch to the matching entity and returns affected rows
    async fn update(&self, id: i64, patch: &Patch) -> LibraryResult<usize>;

    // delete an entity and returns affected rows
    async fn delete(&self, id: i64) -> LibraryResult<usize>;
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl FromStr for RepositoryStore {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dynamodb" => Ok(RepositoryStore::DynamoDB),
            "local-dynamodb" => Ok(RepositoryStore::LocalDynamoDB),
            "memory" => Ok(RepositoryStore::Memory),
            other => Err(LibraryError::validation(format!("unknown store {}", other).as_str(), None)),
        }
    }
}

impl Display for RepositoryStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RepositoryStore::DynamoDB => write!(f, "dynamodb"),
            RepositoryStore::LocalDynamoDB => write!(f, "local-dynamodb"),
            RepositoryStore::Memory => write!(f, "memory"),
        }
    }
}
