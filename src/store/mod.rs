//! Session-scoped article state.
//!
//! [`ArticleStore`] is the single source of truth for the article list during
//! a session. It translates CRUD intents into REST calls and republishes the
//! resulting list on a watch channel that the UI subscribes to.

mod articles;
mod types;

pub use articles::ArticleStore;
pub use types::{now_timestamp, Article, ArticleDraft, ArticleUpdate};
