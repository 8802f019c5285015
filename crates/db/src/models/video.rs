//! Video entity model and DTOs.

use authvid_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::gateway::{Record, Table, Value};

pub const VIDEOS: Table = Table::new("videos", "id");

/// A video row from the `videos` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub like_count: Option<i64>,
    pub view_count: Option<i64>,
    pub author_id: Option<DbId>,
}

impl Record for Video {
    fn id(&self) -> DbId {
        self.id
    }

    fn set_id(&mut self, id: DbId) {
        self.id = id;
    }

    fn values(&self) -> Vec<(&'static str, Value<'_>)> {
        vec![
            ("title", Value::Text(self.title.as_deref())),
            ("description", Value::Text(self.description.as_deref())),
            ("like_count", Value::BigInt(self.like_count)),
            ("view_count", Value::BigInt(self.view_count)),
            ("author_id", Value::BigInt(self.author_id)),
        ]
    }
}

/// A video inside a [`NewAuthorWithVideos`](crate::models::author::NewAuthorWithVideos)
/// request. The author id is filled in by the workflow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub like_count: Option<i64>,
    pub view_count: Option<i64>,
}

impl NewVideo {
    /// Build the row to insert for the given author.
    pub fn into_video(self, author_id: DbId) -> Video {
        Video {
            id: 0,
            title: self.title,
            description: self.description,
            like_count: self.like_count,
            view_count: self.view_count,
            author_id: Some(author_id),
        }
    }
}
