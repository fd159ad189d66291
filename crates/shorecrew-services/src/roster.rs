//! Crew roster types and operations.
//!
//! The roster is an in-memory ordered list keyed by a creation-time-derived
//! unique id. Members are appended on add, filtered out on remove, and never
//! mutated in place. Persistence is a full-list snapshot.

use serde::{Deserialize, Serialize};

/// A single volunteer on the crew roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: String,
    pub name: String,
    pub role: String,
    /// Display date, fixed at creation (e.g. "Aug  6, 2026")
    pub joined: String,
}

impl CrewMember {
    /// Create a new member with a time-ordered unique id and today's join date.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            name: name.into(),
            role: role.into(),
            joined: chrono::Local::now().format("%b %e, %Y").to_string(),
        }
    }
}

/// Remove a member by id.
///
/// Returns true if a member was removed. An id not present in the list
/// leaves the roster unchanged.
pub fn remove_by_id(crew: &mut Vec<CrewMember>, id: &str) -> bool {
    let before = crew.len();
    crew.retain(|member| member.id != id);
    let removed = crew.len() != before;
    if !removed {
        tracing::debug!("remove ignored, no crew member with id {}", id);
    }
    removed
}
