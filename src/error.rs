//! Error types for the relational-operations library.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Schema errors
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column already exists: {0}")]
    DuplicateColumn(String),

    #[error("Row has {found} values, table has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    #[error("Schemas do not match: {0}")]
    SchemaMismatch(String),

    // Type errors
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Invalid input for column {column}: expected {expected}")]
    InvalidInput { column: String, expected: String },

    // Constraint errors
    #[error("Primary key violation: {0}")]
    PrimaryKeyViolation(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    #[error("NOT NULL constraint violation on column: {0}")]
    NotNullViolation(String),

    // Transaction demo errors
    #[error("Insufficient stock: have {have}, tried to deduct {want}")]
    InsufficientStock { have: i64, want: i64 },

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    // Dataset seed errors
    #[error("Dataset error: {0}")]
    Dataset(String),
}
