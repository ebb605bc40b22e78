use super::types::{now_timestamp, Article, ArticleDraft, ArticleUpdate};
use crate::api::ApiClient;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Single source of truth for the article list during a session.
///
/// The store is cheaply cloneable: background tasks spawned from the UI loop
/// clone a handle and drive CRUD operations, and every successful mutation
/// publishes a fresh `Arc<Vec<Article>>` snapshot on the watch channel. New
/// subscribers immediately observe the current list.
///
/// Failure policy: every REST error is caught here, logged, and converted to
/// an empty/no-op outcome. Callers cannot distinguish "nothing changed" from
/// "the call failed". This is a simplicity tradeoff carried over from the
/// API contract (see DESIGN.md). The one visible consequence: a failed
/// `fetch_all` empties the table rather than keeping stale rows.
#[derive(Clone)]
pub struct ArticleStore {
    api: ApiClient,
    articles: Arc<Mutex<Vec<Article>>>,
    tx: Arc<watch::Sender<Arc<Vec<Article>>>>,
}

impl ArticleStore {
    /// Create an empty store. Nothing is fetched until [`fetch_all`] runs.
    ///
    /// [`fetch_all`]: ArticleStore::fetch_all
    pub fn new(api: ApiClient) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        Self {
            api,
            articles: Arc::new(Mutex::new(Vec::new())),
            tx: Arc::new(tx),
        }
    }

    /// Subscribe to list publications. The receiver observes the current
    /// value immediately and every snapshot published after it.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Article>>> {
        self.tx.subscribe()
    }

    /// The current interior list, including optimistic mutations that have
    /// not been published yet (an edit whose PUT is still in flight or
    /// failed).
    pub fn snapshot(&self) -> Arc<Vec<Article>> {
        Arc::new(self.lock().clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Article>> {
        // A poisoned lock only means a panic elsewhere mid-mutation; the
        // list itself is still usable.
        self.articles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self) {
        let snapshot = Arc::new(self.lock().clone());
        // send_replace stores the value even with no live receivers, so a
        // late subscriber still sees the latest list.
        self.tx.send_replace(snapshot);
    }

    /// Fetch the full collection and replace the local list with it.
    ///
    /// On failure the local list is replaced with an empty one and published
    /// anyway. No retry, no preservation of what was loaded before.
    pub async fn fetch_all(&self) {
        match self.api.list().await {
            Ok(list) => {
                tracing::debug!(count = list.len(), "Fetched article collection");
                *self.lock() = list;
            }
            Err(e) => {
                tracing::error!(error = %e, "Fetch failed, publishing empty list");
                self.lock().clear();
            }
        }
        self.publish();
    }

    /// Create an article on the server, then append it locally with the
    /// server-assigned id. On failure the draft is dropped silently and the
    /// list is unchanged.
    pub async fn add(&self, draft: ArticleDraft) {
        match self.api.create(&draft).await {
            Ok(id) => {
                tracing::debug!(id, title = %draft.title, "Article created");
                self.lock().push(Article {
                    id,
                    title: draft.title,
                    content: draft.content,
                    created_at: draft.created_at,
                    updated_at: String::new(),
                });
                self.publish();
            }
            Err(e) => {
                tracing::error!(error = %e, title = %draft.title, "Create failed, dropping article");
            }
        }
    }

    /// Apply an edit to the local copy, then PUT the full record.
    ///
    /// The local mutation happens before the network call resolves and is
    /// never rolled back: a failed PUT leaves the local list diverged from
    /// the server, logged but otherwise silent. An id not present in the
    /// local list is a recoverable no-op; the row may have been removed by
    /// a racing delete whose response won.
    pub async fn edit(&self, update: ArticleUpdate) {
        let id = update.id;
        let record = {
            let mut articles = self.lock();
            match articles.iter_mut().find(|a| a.id == id) {
                Some(existing) => {
                    existing.title = update.title;
                    existing.content = update.content;
                    existing.updated_at = now_timestamp();
                    Some(existing.clone())
                }
                None => None,
            }
        };

        let Some(record) = record else {
            tracing::warn!(id, "Edit targets an id not in the local list, ignoring");
            return;
        };

        match self.api.update(&record).await {
            Ok(()) => self.publish(),
            Err(e) => {
                tracing::error!(error = %e, id, "Update failed, local copy diverged from server");
            }
        }
    }

    /// Delete an article on the server, then drop it from the local list.
    /// On failure the article stays listed, diverged from server truth.
    pub async fn remove(&self, id: i64) {
        match self.api.delete(id).await {
            Ok(()) => {
                self.lock().retain(|a| a.id != id);
                self.publish();
            }
            Err(e) => {
                tracing::error!(error = %e, id, "Delete failed, article remains listed");
            }
        }
    }
}
