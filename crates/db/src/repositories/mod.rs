//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument and delegate to [`crate::gateway`].

pub mod author_repo;
pub mod video_repo;

pub use author_repo::{AuthorRepo, ScanReport, ScanStrategy};
pub use video_repo::VideoRepo;
