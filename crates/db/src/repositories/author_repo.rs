//! Repository for the `authors` table, including the author+videos
//! transaction and the invalid-phone scans.

use authvid_core::phone::has_invalid_length;
use authvid_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::gateway;
use crate::models::author::{Author, AuthorWithVideos, NewAuthorWithVideos, AUTHORS};
use crate::models::video::VIDEOS;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, phone";

/// How [`AuthorRepo::scan_invalid_phones`] reads the `authors` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    /// Load every row, then filter.
    FullLoad,
    /// Read and filter batches of at most `chunk_size` rows.
    Chunked { chunk_size: usize },
}

/// Outcome of an invalid-phone scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Authors whose phone does not have the expected length, in id order.
    pub authors: Vec<Author>,
    pub rows_scanned: usize,
    /// Largest number of author rows held in memory at once.
    pub peak_rows_resident: usize,
}

/// Provides CRUD operations for authors.
pub struct AuthorRepo;

impl AuthorRepo {
    /// Insert a new author, returning it with its assigned id.
    pub async fn create(pool: &PgPool, mut author: Author) -> Result<Author, DbError> {
        gateway::insert(pool, &AUTHORS, &mut author).await?;
        Ok(author)
    }

    /// Find an author by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Author, DbError> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE id = $1");
        gateway::query_one(pool, sqlx::query_as(&query).bind(id)).await
    }

    /// Update the supplied fields of an author, returning the stored row.
    pub async fn patch(pool: &PgPool, mut author: Author) -> Result<Author, DbError> {
        gateway::patch(pool, &AUTHORS, &mut author).await?;
        Ok(author)
    }

    /// Permanently delete an author by ID.
    ///
    /// Videos are not cascaded; the `videos.author_id` foreign key makes this
    /// fail while the author still has videos.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), DbError> {
        gateway::delete(pool, &AUTHORS, id).await
    }

    /// Insert an author and all of its videos atomically.
    ///
    /// Videos are inserted in request order after the author. The first
    /// failing insert aborts the rest and rolls the whole unit back.
    pub async fn create_with_videos(
        pool: &PgPool,
        input: NewAuthorWithVideos,
    ) -> Result<AuthorWithVideos, DbError> {
        gateway::transaction(pool, move |conn| {
            Box::pin(async move {
                let mut author = Author {
                    id: 0,
                    name: input.author_name,
                    phone: input.author_phone,
                };
                gateway::insert(&mut *conn, &AUTHORS, &mut author).await?;
                tracing::debug!(
                    author_id = author.id,
                    video_count = input.videos.len(),
                    "Inserted author, inserting videos"
                );

                let mut videos = Vec::with_capacity(input.videos.len());
                for new_video in input.videos {
                    let mut video = new_video.into_video(author.id);
                    gateway::insert(&mut *conn, &VIDEOS, &mut video).await?;
                    videos.push(video);
                }

                Ok::<_, DbError>(AuthorWithVideos {
                    author_id: author.id,
                    author_name: author.name,
                    author_phone: author.phone,
                    videos,
                })
            })
        })
        .await
    }

    /// Return every author whose phone length is not the expected one.
    ///
    /// Both strategies read in id order, so they return identical authors in
    /// identical order for the same data.
    pub async fn scan_invalid_phones(
        pool: &PgPool,
        strategy: ScanStrategy,
    ) -> Result<ScanReport, DbError> {
        let query = format!("SELECT {COLUMNS} FROM authors ORDER BY id");

        match strategy {
            ScanStrategy::FullLoad => {
                let all: Vec<Author> = gateway::query_all(pool, sqlx::query_as(&query)).await?;
                let rows_scanned = all.len();
                let authors = all
                    .into_iter()
                    .filter(|author| has_invalid_length(author.phone.as_deref()))
                    .collect();
                Ok(ScanReport {
                    authors,
                    rows_scanned,
                    peak_rows_resident: rows_scanned,
                })
            }
            ScanStrategy::Chunked { chunk_size } => {
                let mut report = ScanReport::default();
                gateway::query_chunks(
                    pool,
                    sqlx::query_as(&query),
                    chunk_size,
                    |batch: Vec<Author>| {
                        report.rows_scanned += batch.len();
                        report.peak_rows_resident = report.peak_rows_resident.max(batch.len());
                        report.authors.extend(
                            batch
                                .into_iter()
                                .filter(|author| has_invalid_length(author.phone.as_deref())),
                        );
                        Ok::<_, DbError>(())
                    },
                )
                .await?;
                Ok(report)
            }
        }
    }
}
