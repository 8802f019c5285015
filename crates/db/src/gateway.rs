//! Entity-agnostic persistence primitives.
//!
//! Every operation takes a Postgres executor, so the same call works against
//! the pool or against the connection handed out by [`transaction`].
//! Entities opt in by implementing [`Record`]; tables are described by a
//! [`Table`] handle.

use authvid_core::types::DbId;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::TryStreamExt;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::error::DbError;

/// Upper bound on the rows pre-allocated for a single chunk.
const MAX_CHUNK_PREALLOC: usize = 1024;

/// A table name together with its primary key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub id_column: &'static str,
}

impl Table {
    pub const fn new(name: &'static str, id_column: &'static str) -> Self {
        Self { name, id_column }
    }
}

/// A column value borrowed from a record, ready to be bound to a query.
///
/// `None` inside a variant means SQL `NULL` on insert and "not supplied" on
/// patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Text(Option<&'a str>),
    BigInt(Option<i64>),
}

impl<'a> Value<'a> {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Text(v) => v.is_none(),
            Value::BigInt(v) => v.is_none(),
        }
    }

    fn push_bind(self, qb: &mut QueryBuilder<'a, Postgres>) {
        match self {
            Value::Text(v) => qb.push_bind(v),
            Value::BigInt(v) => qb.push_bind(v),
        };
    }
}

/// A row type the gateway can insert and patch.
pub trait Record: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Primary key, `0` while unassigned.
    fn id(&self) -> DbId;

    fn set_id(&mut self, id: DbId);

    /// Every non-identity column with its current value, in column order.
    fn values(&self) -> Vec<(&'static str, Value<'_>)>;
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert `record` into `table` and store the generated primary key on it.
pub async fn insert<'e, E, R>(executor: E, table: &Table, record: &mut R) -> Result<(), DbError>
where
    E: PgExecutor<'e>,
    R: Record,
{
    let id: DbId = {
        let mut qb = insert_query(table, record.values());
        qb.build_query_scalar::<DbId>().fetch_one(executor).await?
    };
    record.set_id(id);
    Ok(())
}

/// Update the supplied (non-null) columns of `record`, matched by primary key.
///
/// On success `record` is replaced with the stored row, so columns that were
/// not supplied come back with their persisted values.
pub async fn patch<'e, E, R>(executor: E, table: &Table, record: &mut R) -> Result<(), DbError>
where
    E: PgExecutor<'e>,
    R: Record,
{
    let id = record.id();
    if id == 0 {
        return Err(DbError::MissingId { table: table.name });
    }

    let stored: Option<R> = {
        let supplied = record
            .values()
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .collect();
        let mut qb = patch_query(table, id, supplied);
        qb.build_query_as::<R>().fetch_optional(executor).await?
    };

    *record = stored.ok_or(DbError::NotFound)?;
    Ok(())
}

/// Delete the row with primary key `id`.
pub async fn delete<'e, E>(executor: E, table: &Table, id: DbId) -> Result<(), DbError>
where
    E: PgExecutor<'e>,
{
    let query = format!("DELETE FROM {} WHERE {} = $1", table.name, table.id_column);
    let result = sqlx::query(&query).bind(id).execute(executor).await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}

fn insert_query<'a>(
    table: &Table,
    values: Vec<(&'static str, Value<'a>)>,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("INSERT INTO {} ", table.name));
    if values.is_empty() {
        qb.push("DEFAULT VALUES");
    } else {
        let columns: Vec<&str> = values.iter().map(|(column, _)| *column).collect();
        qb.push(format!("({}) VALUES (", columns.join(", ")));
        for (i, (_, value)) in values.into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            value.push_bind(&mut qb);
        }
        qb.push(")");
    }
    qb.push(format!(" RETURNING {}", table.id_column));
    qb
}

/// With nothing supplied the row is only read back, which still reports a
/// missing id as not found.
fn patch_query<'a>(
    table: &Table,
    id: DbId,
    supplied: Vec<(&'static str, Value<'a>)>,
) -> QueryBuilder<'a, Postgres> {
    if supplied.is_empty() {
        let mut qb = QueryBuilder::new(format!(
            "SELECT * FROM {} WHERE {} = ",
            table.name, table.id_column
        ));
        qb.push_bind(id);
        return qb;
    }

    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", table.name));
    for (i, (column, value)) in supplied.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(format!("{column} = "));
        value.push_bind(&mut qb);
    }
    qb.push(format!(" WHERE {} = ", table.id_column));
    qb.push_bind(id);
    qb.push(" RETURNING *");
    qb
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Fetch exactly one row; zero rows is [`DbError::NotFound`].
pub async fn query_one<'q, 'e, E, R>(
    executor: E,
    query: QueryAs<'q, Postgres, R, PgArguments>,
) -> Result<R, DbError>
where
    'q: 'e,
    E: PgExecutor<'e>,
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'e,
{
    query.fetch_optional(executor).await?.ok_or(DbError::NotFound)
}

/// Fetch the whole result set into memory.
pub async fn query_all<'q, 'e, E, R>(
    executor: E,
    query: QueryAs<'q, Postgres, R, PgArguments>,
) -> Result<Vec<R>, DbError>
where
    'q: 'e,
    E: PgExecutor<'e>,
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'e,
{
    Ok(query.fetch_all(executor).await?)
}

/// Single-pass cursor yielding batches of at most `chunk_size` rows.
///
/// Rows are pulled from the connection only when [`Chunks::next_chunk`] is
/// called. Once the result set is exhausted, or a fetch fails, every further
/// call returns `Ok(None)`.
pub struct Chunks<'e, R> {
    rows: BoxStream<'e, Result<R, sqlx::Error>>,
    chunk_size: usize,
    done: bool,
}

impl<'e, R> Chunks<'e, R>
where
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'e,
{
    pub fn new<'q, E>(
        executor: E,
        query: QueryAs<'q, Postgres, R, PgArguments>,
        chunk_size: usize,
    ) -> Result<Self, DbError>
    where
        'q: 'e,
        E: PgExecutor<'e> + 'e,
    {
        if chunk_size == 0 {
            return Err(DbError::InvalidChunkSize);
        }
        Ok(Self {
            rows: query.fetch(executor),
            chunk_size,
            done: false,
        })
    }

    /// Fetch the next batch, or `None` when there are no rows left.
    pub async fn next_chunk(&mut self) -> Result<Option<Vec<R>>, DbError> {
        if self.done {
            return Ok(None);
        }

        let mut batch = Vec::with_capacity(self.chunk_size.min(MAX_CHUNK_PREALLOC));
        while batch.len() < self.chunk_size {
            match self.rows.try_next().await {
                Ok(Some(row)) => batch.push(row),
                Ok(None) => {
                    self.done = true;
                    break;
                }
                Err(err) => {
                    self.done = true;
                    return Err(err.into());
                }
            }
        }

        Ok((!batch.is_empty()).then_some(batch))
    }
}

/// Stream `query` in batches of at most `chunk_size` rows, handing each batch
/// to `per_chunk` before the next one is fetched.
///
/// An error from `per_chunk` stops the scan and is returned as-is.
pub async fn query_chunks<'q, 'e, E, R, F, X>(
    executor: E,
    query: QueryAs<'q, Postgres, R, PgArguments>,
    chunk_size: usize,
    mut per_chunk: F,
) -> Result<(), X>
where
    'q: 'e,
    E: PgExecutor<'e> + 'e,
    R: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'e,
    F: FnMut(Vec<R>) -> Result<(), X>,
    X: From<DbError>,
{
    let mut chunks = Chunks::new(executor, query, chunk_size)?;
    while let Some(batch) = chunks.next_chunk().await? {
        per_chunk(batch)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Run `body` inside a transaction.
///
/// Commits when `body` returns `Ok` and rolls back when it returns `Err`.
/// If the body panics or the future is dropped mid-flight, the transaction
/// guard rolls back on drop.
pub async fn transaction<T, X, F>(pool: &PgPool, body: F) -> Result<T, X>
where
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, X>>,
    X: From<DbError>,
{
    let mut tx = pool.begin().await.map_err(DbError::from)?;

    let outcome = body(&mut *tx).await;

    match outcome {
        Ok(value) => {
            tx.commit().await.map_err(DbError::from)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THINGS: Table = Table::new("things", "id");

    #[test]
    fn insert_binds_every_column() {
        let qb = insert_query(
            &THINGS,
            vec![
                ("label", Value::Text(Some("a"))),
                ("size", Value::BigInt(None)),
            ],
        );
        assert_eq!(
            qb.sql(),
            "INSERT INTO things (label, size) VALUES ($1, $2) RETURNING id"
        );
    }

    #[test]
    fn insert_without_columns_uses_defaults() {
        let qb = insert_query(&THINGS, Vec::new());
        assert_eq!(qb.sql(), "INSERT INTO things DEFAULT VALUES RETURNING id");
    }

    #[test]
    fn patch_sets_only_supplied_columns() {
        let qb = patch_query(&THINGS, 9, vec![("size", Value::BigInt(Some(3)))]);
        assert_eq!(
            qb.sql(),
            "UPDATE things SET size = $1 WHERE id = $2 RETURNING *"
        );
    }

    #[test]
    fn patch_with_nothing_supplied_reads_row_back() {
        let qb = patch_query(&THINGS, 9, Vec::new());
        assert_eq!(qb.sql(), "SELECT * FROM things WHERE id = $1");
    }

    #[test]
    fn null_detection_covers_every_variant() {
        assert!(Value::Text(None).is_null());
        assert!(Value::BigInt(None).is_null());
        assert!(!Value::BigInt(Some(0)).is_null());
    }
}
