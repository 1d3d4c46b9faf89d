use std::fmt;

// === StorageError ===

/// Errors related to persisting or loading a product's tab data.
#[derive(Debug)]
pub enum StorageError {
    /// Database operation failed.
    DatabaseError(String),
    /// Failed to serialize or deserialize the stored tab document.
    SerializationError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError(msg) => write!(f, "Tab storage database error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Tab storage serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// === RenderError ===

/// Errors raised at a rendering boundary (admin builder or public tabs).
///
/// Callers decide the fallback: the admin boundary shows a neutral notice,
/// the public boundary contributes nothing. A render failure never unwinds
/// past the boundary into the host page.
#[derive(Debug)]
pub enum RenderError {
    /// The underlying tab storage failed.
    Storage(StorageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Storage(err) => write!(f, "Tab render storage error: {}", err),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<StorageError> for RenderError {
    fn from(err: StorageError) -> Self {
        RenderError::Storage(err)
    }
}

// === EmbedError ===

/// Errors related to building the video embed resolver.
#[derive(Debug)]
pub enum EmbedError {
    /// A recognition pattern failed to compile.
    InvalidPattern(String),
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedError::InvalidPattern(msg) => write!(f, "Invalid embed pattern: {}", msg),
        }
    }
}

impl std::error::Error for EmbedError {}
