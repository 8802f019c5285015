/// Errors produced by the persistence layer.
///
/// `NotFound` carries no entity information; callers that know which entity
/// and id they asked for attach it when converting to a domain error.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No row matched the primary key or query.
    #[error("Record not found")]
    NotFound,

    /// A patch was attempted on a record whose primary key was never set.
    #[error("Missing primary key for patch on table {table}")]
    MissingId { table: &'static str },

    /// A chunked query was asked to produce empty batches.
    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    /// Connectivity or constraint failure reported by the database.
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
