//! Author entity model and DTOs.

use authvid_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::gateway::{Record, Table, Value};
use crate::models::video::{NewVideo, Video};

pub const AUTHORS: Table = Table::new("authors", "id");

/// An author row from the `authors` table.
///
/// `id` is `0` until the row is inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: DbId,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl Record for Author {
    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn values(&self) -> Vec<(&'static str, Value<'_>)> {
        vec![
            ("name", Value::Text(self.name.as_deref())),
            ("phone", Value::Text(self.phone.as_deref())),
        ]
    }
}

/// DTO for creating an author together with its videos in one transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAuthorWithVideos {
    pub author_name: Option<String>,
    pub author_phone: Option<String>,
    #[serde(default)]
    pub videos: Vec<NewVideo>,
}

/// Result of [`AuthorRepo::create_with_videos`](crate::repositories::AuthorRepo::create_with_videos).
///
/// `videos` keeps the order of the request.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorWithVideos {
    pub author_id: DbId,
    pub author_name: Option<String>,
    pub author_phone: Option<String>,
    pub videos: Vec<Video>,
}
