use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::RepositoryStore;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
}

// RunMode selects how the router is served
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RunMode {
    Http,
    Lambda,
}

impl FromStr for RunMode {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(RunMode::Http),
            "lambda" => Ok(RunMode::Lambda),
            other => Err(LibraryError::validation(format!("unknown run mode {}", other).as_str(), None)),
        }
    }
}

// Configuration abstracts config options for the bookshop service
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub store: RepositoryStore,
    pub run_mode: RunMode,
    pub bind_addr: SocketAddr,
    pub books_table: String,
    pub dynamodb_endpoint: String,
    pub log_level: tracing::Level,
    // settings that were ignored while reading the environment, logged once tracing is up
    pub warnings: Vec<String>,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            store: RepositoryStore::Memory,
            run_mode: RunMode::Http,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            books_table: "books".to_string(),
            dynamodb_endpoint: "http://localhost:8000".to_string(),
            log_level: tracing::Level::INFO,
            warnings: vec![],
        }
    }

    pub fn from_env() -> LibraryResult<Self> {
        Self::from_vars(&std::env::vars().collect())
    }

    // BOOKSHOP_* variables override the defaults; unknown values fall back with a warning
    pub fn from_vars(vars: &HashMap<String, String>) -> LibraryResult<Self> {
        let mut config = Configuration::new(
            vars.get("BOOKSHOP_BRANCH").map(String::as_str).unwrap_or("dev"));
        if let Some(store) = vars.get("BOOKSHOP_STORE") {
            match RepositoryStore::from_str(store) {
                Ok(store) => config.store = store,
                Err(err) => config.warnings.push(format!("ignoring BOOKSHOP_STORE: {}", err)),
            }
        }
        if let Some(mode) = vars.get("BOOKSHOP_RUN_MODE") {
            match RunMode::from_str(mode) {
                Ok(mode) => config.run_mode = mode,
                Err(err) => config.warnings.push(format!("ignoring BOOKSHOP_RUN_MODE: {}", err)),
            }
        }
        if let Some(addr) = vars.get("BOOKSHOP_BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|err| LibraryError::validation(
                format!("invalid BOOKSHOP_BIND_ADDR {}: {}", addr, err).as_str(), None))?;
        }
        if let Some(table) = vars.get("BOOKSHOP_BOOKS_TABLE") {
            config.books_table = table.to_string();
        }
        if let Some(endpoint) = vars.get("BOOKSHOP_DYNAMODB_ENDPOINT") {
            config.dynamodb_endpoint = endpoint.to_string();
        }
        if let Some(level) = vars.get("BOOKSHOP_LOG_LEVEL") {
            match tracing::Level::from_str(level) {
                Ok(level) => config.log_level = level,
                Err(_) => config.warnings.push(format!("ignoring BOOKSHOP_LOG_LEVEL {}", level)),
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::domain::{Configuration, RunMode};
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert_eq!(RepositoryStore::Memory, config.store);
        assert_eq!(RunMode::Http, config.run_mode);
        assert_eq!("books", config.books_table.as_str());
        assert_eq!(3000, config.bind_addr.port());
    }

    #[tokio::test]
    async fn test_should_build_config_from_vars() {
        let vars = HashMap::from([
            ("BOOKSHOP_BRANCH".to_string(), "prod".to_string()),
            ("BOOKSHOP_STORE".to_string(), "dynamodb".to_string()),
            ("BOOKSHOP_RUN_MODE".to_string(), "lambda".to_string()),
            ("BOOKSHOP_BIND_ADDR".to_string(), "127.0.0.1:8080".to_string()),
            ("BOOKSHOP_BOOKS_TABLE".to_string(), "prod_books".to_string()),
            ("BOOKSHOP_LOG_LEVEL".to_string(), "debug".to_string()),
        ]);
        let config = Configuration::from_vars(&vars).expect("should build config");
        assert_eq!("prod", config.branch_id.as_str());
        assert_eq!(RepositoryStore::DynamoDB, config.store);
        assert_eq!(RunMode::Lambda, config.run_mode);
        assert_eq!(8080, config.bind_addr.port());
        assert_eq!("prod_books", config.books_table.as_str());
        assert_eq!(tracing::Level::DEBUG, config.log_level);
        assert!(config.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_should_fall_back_on_unknown_values() {
        let vars = HashMap::from([
            ("BOOKSHOP_STORE".to_string(), "sqlite".to_string()),
            ("BOOKSHOP_RUN_MODE".to_string(), "grpc".to_string()),
            ("BOOKSHOP_LOG_LEVEL".to_string(), "loud".to_string()),
        ]);
        let config = Configuration::from_vars(&vars).expect("should build config");
        assert_eq!("dev", config.branch_id.as_str());
        assert_eq!(RepositoryStore::Memory, config.store);
        assert_eq!(RunMode::Http, config.run_mode);
        assert_eq!(tracing::Level::INFO, config.log_level);
        assert_eq!(3, config.warnings.len());
        assert!(config.warnings.iter().any(|w| w.contains("BOOKSHOP_STORE") && w.contains("sqlite")));
        assert!(config.warnings.iter().any(|w| w.contains("BOOKSHOP_RUN_MODE") && w.contains("grpc")));
        assert!(config.warnings.iter().any(|w| w.contains("BOOKSHOP_LOG_LEVEL loud")));
    }

    #[tokio::test]
    async fn test_should_reject_bad_bind_addr() {
        let vars = HashMap::from([
            ("BOOKSHOP_BIND_ADDR".to_string(), "not-an-address".to_string()),
        ]);
        assert!(Configuration::from_vars(&vars).is_err());
    }
}
