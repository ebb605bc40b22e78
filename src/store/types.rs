use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Domain Types
// ============================================================================

/// An article as mirrored from the server.
///
/// `id` is server-assigned and unique among persisted articles; a draft has
/// no id until the create round-trip confirms one. Timestamps are ISO-8601
/// strings as the server sends them; they are compared and sorted as text,
/// never parsed. `updated_at` stays empty until the first edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Payload for creating an article. Carries no id; the server assigns one.
///
/// `created_at` is stamped by the add dialog at confirmation time, matching
/// the create request body the server expects.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub created_at: String,
}

/// The editable fields of an existing article.
///
/// The store stamps `updated_at` itself when applying the update, so callers
/// only supply what the form dialog collected.
#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: i64,
    pub title: String,
    pub content: String,
}

/// Current UTC time in the server's timestamp format
/// (e.g. `2021-10-04T15:02:45.000000Z`).
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
