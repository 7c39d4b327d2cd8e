use async_trait::async_trait;
use tracing::error;
use crate::core::library::{ErrorKind, LibraryError};

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, PartialEq)]
pub enum CommandError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Validation {
        message: String,
    },
    // message is returned to the client as is
    Internal {
        message: String,
    },
}

impl CommandError {
    pub fn not_found(message: &str) -> CommandError {
        CommandError::NotFound { message: message.to_string() }
    }

    pub fn validation(message: &str) -> CommandError {
        CommandError::Validation { message: message.to_string() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::DuplicateKey { .. } => { ErrorKind::Conflict }
            CommandError::NotFound { .. } => { ErrorKind::NotFound }
            CommandError::Validation { .. } => { ErrorKind::Validation }
            CommandError::Internal { .. } => { ErrorKind::Internal }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CommandError::DuplicateKey { message } => { message }
            CommandError::NotFound { message } => { message }
            CommandError::Validation { message } => { message }
            CommandError::Internal { message } => { message }
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Validation { message, .. } => {
                CommandError::Validation { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                error!(reason = ?reason_code, "{}", message);
                CommandError::Internal { message }
            }
            LibraryError::Database { .. }
            | LibraryError::CurrentlyUnavailable { .. }
            | LibraryError::Serialization { .. } => {
                error!(retryable = other.retryable(), "{}", other);
                CommandError::Internal { message: INTERNAL_SERVER_ERROR.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::{CommandError, INTERNAL_SERVER_ERROR};
    use crate::core::library::{ErrorKind, LibraryError};

    #[tokio::test]
    async fn test_should_convert_library_errors() {
        assert_eq!(CommandError::DuplicateKey { message: "dup".to_string() },
                   CommandError::from(LibraryError::duplicate_key("dup")));
        assert_eq!(CommandError::not_found("missing"),
                   CommandError::from(LibraryError::not_found("missing")));
        assert_eq!(CommandError::validation("bad"),
                   CommandError::from(LibraryError::validation("bad", None)));
    }

    #[tokio::test]
    async fn test_should_hide_storage_details() {
        let err = CommandError::from(LibraryError::database("table books is gone", Some("500".to_string()), false));
        assert_eq!(ErrorKind::Internal, err.kind());
        assert_eq!(INTERNAL_SERVER_ERROR, err.message());

        let err = CommandError::from(LibraryError::unavailable("timeout", None, true));
        assert_eq!(INTERNAL_SERVER_ERROR, err.message());
    }

    #[tokio::test]
    async fn test_should_keep_runtime_message() {
        let err = CommandError::from(LibraryError::runtime("Unable to delete book", None));
        assert_eq!(ErrorKind::Internal, err.kind());
        assert_eq!("Unable to delete book", err.message());
    }
}
