use std::fmt;
use std::fmt::{Display, Formatter};

// ErrorKind is the coarse classification every layer maps its errors onto
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Internal,
}

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The store could not be reached or throttled the request; the caller may retry.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    // Runtime messages are written by the service layer and are safe to show to clients.
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LibraryError::DuplicateKey { .. } => { ErrorKind::Conflict }
            LibraryError::NotFound { .. } => { ErrorKind::NotFound }
            LibraryError::Validation { .. } => { ErrorKind::Validation }
            LibraryError::Database { .. }
            | LibraryError::CurrentlyUnavailable { .. }
            | LibraryError::Serialization { .. }
            | LibraryError::Runtime { .. } => { ErrorKind::Internal }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LibraryError::Database { message, .. } => { message }
            LibraryError::DuplicateKey { message } => { message }
            LibraryError::NotFound { message } => { message }
            LibraryError::CurrentlyUnavailable { message, .. } => { message }
            LibraryError::Validation { message, .. } => { message }
            LibraryError::Serialization { message } => { message }
            LibraryError::Runtime { message, .. } => { message }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for repositories and services.
pub type LibraryResult<T> = Result<T, LibraryError>;
