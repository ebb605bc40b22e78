//! Background task event processing.

use crate::app::{App, AppEvent};

/// Apply a background task completion to application state.
///
/// Data changes arrive separately on the store's watch channel; events here
/// only settle in-flight markers and surface progress to the user.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::RefreshComplete { count } => {
            app.refreshing = false;
            tracing::debug!(count, "Refresh settled");
            app.set_status(format!(
                "Loaded {} article{}",
                count,
                if count == 1 { "" } else { "s" }
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::Config;
    use crate::store::ArticleStore;

    #[tokio::test]
    async fn test_refresh_complete_clears_flag_and_sets_status() {
        let api = ApiClient::new("http://localhost:8000").unwrap();
        let mut app = App::new(ArticleStore::new(api), &Config::default());
        app.refreshing = true;

        handle_app_event(&mut app, AppEvent::RefreshComplete { count: 1 });

        assert!(!app.refreshing);
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg.as_ref(), "Loaded 1 article");
    }
}
