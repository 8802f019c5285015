//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` + `Deserialize` entity struct matching the
//!   database row, which doubles as the insert and patch payload
//! - The [`Table`](crate::gateway::Table) handle for that entity
//! - Any request/response DTOs of the multi-step workflows

pub mod author;
pub mod video;
