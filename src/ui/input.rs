//! Keyboard input handling.
//!
//! Input is layered: the help overlay captures everything, then an open
//! dialog captures everything, and only then do table keybindings apply.
//! Dialogs are taken out of the app while they handle a key and put back
//! unless the key confirmed or dismissed them, which keeps borrow scopes
//! simple and makes "dismiss leaves no trace" the default outcome.

use crate::app::{App, AppEvent, DialogState, FilterDialog, FormDialog, FormMode};
use crate::keybindings::Action as KeyAction;
use crate::store::{now_timestamp, ArticleDraft, ArticleUpdate};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::loop_runner::{spawn_refresh, Action};

pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    if app.show_help {
        handle_help_input(app, code);
        return Action::Continue;
    }

    if app.dialog.is_open() {
        handle_dialog_input(app, code);
        return Action::Continue;
    }

    handle_table_input(app, code, modifiers, event_tx)
}

fn handle_help_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => app.show_help = false,
        _ => {}
    }
}

fn handle_dialog_input(app: &mut App, code: KeyCode) {
    let dialog = std::mem::replace(&mut app.dialog, DialogState::None);
    match dialog {
        DialogState::Form(form) => handle_form_input(app, form, code),
        DialogState::ConfirmDelete { id, title } => match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let store = app.store.clone();
                tokio::spawn(async move {
                    store.remove(id).await;
                });
            }
            KeyCode::Char('n') | KeyCode::Esc => {}
            _ => app.dialog = DialogState::ConfirmDelete { id, title },
        },
        DialogState::Filter(filter) => handle_filter_input(app, filter, code),
        DialogState::None => {}
    }
}

fn handle_form_input(app: &mut App, mut form: FormDialog, code: KeyCode) {
    match code {
        // Dismiss: the store never hears about it
        KeyCode::Esc => {}
        KeyCode::Enter => {
            if form.title.trim().is_empty() {
                app.set_status("Title is required");
                app.dialog = DialogState::Form(form);
            } else {
                submit_form(app, form);
            }
        }
        KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
            // Two fields, so next and previous coincide
            form.focused = form.focused.next();
            app.dialog = DialogState::Form(form);
        }
        KeyCode::Backspace => {
            form.focused_value_mut().pop();
            app.dialog = DialogState::Form(form);
        }
        KeyCode::Char(c) => {
            form.focused_value_mut().push(c);
            app.dialog = DialogState::Form(form);
        }
        _ => app.dialog = DialogState::Form(form),
    }
}

/// Hand a confirmed form over to the store in a background task.
///
/// Adds stamp the creation time here, at the moment of confirmation. Edits
/// send only the mutable fields; the store owns the update timestamp.
fn submit_form(app: &mut App, form: FormDialog) {
    let store = app.store.clone();
    match form.mode {
        FormMode::Add => {
            let draft = ArticleDraft {
                title: form.title,
                content: form.content,
                created_at: now_timestamp(),
            };
            tokio::spawn(async move {
                store.add(draft).await;
            });
        }
        FormMode::Edit { id } => {
            let update = ArticleUpdate {
                id,
                title: form.title,
                content: form.content,
            };
            tokio::spawn(async move {
                store.edit(update).await;
            });
        }
    }
}

fn handle_filter_input(app: &mut App, mut filter: FilterDialog, code: KeyCode) {
    match code {
        KeyCode::Esc => {}
        KeyCode::Enter => {
            app.filters.apply(filter.column, filter.op(), filter.value);
            app.table.first_page();
        }
        KeyCode::Down | KeyCode::Tab => {
            filter.next_op();
            app.dialog = DialogState::Filter(filter);
        }
        KeyCode::Up | KeyCode::BackTab => {
            filter.prev_op();
            app.dialog = DialogState::Filter(filter);
        }
        KeyCode::Backspace => {
            filter.value.pop();
            app.dialog = DialogState::Filter(filter);
        }
        KeyCode::Char(c) => {
            filter.value.push(c);
            app.dialog = DialogState::Filter(filter);
        }
        _ => app.dialog = DialogState::Filter(filter),
    }
}

fn handle_table_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let Some(action) = app.keybindings.action_for_key(code, modifiers) else {
        return Action::Continue;
    };

    let total = app.visible_count();

    match action {
        KeyAction::Quit => return Action::Quit,
        KeyAction::Help => app.show_help = true,
        KeyAction::Refresh => spawn_refresh(app, event_tx),

        KeyAction::Add => app.dialog = DialogState::Form(FormDialog::add()),
        KeyAction::Edit => {
            let form = app.selected_article().map(FormDialog::edit);
            match form {
                Some(form) => app.dialog = DialogState::Form(form),
                None => app.set_status("No article selected"),
            }
        }
        KeyAction::Delete => {
            let target = app.selected_article().map(|a| (a.id, a.title.clone()));
            match target {
                Some((id, title)) => app.dialog = DialogState::ConfirmDelete { id, title },
                None => app.set_status("No article selected"),
            }
        }

        KeyAction::NavUp => app.table.select_prev(),
        KeyAction::NavDown => app.table.select_next(total),
        KeyAction::TopRow => app.table.select_first(),
        KeyAction::BottomRow => app.table.select_last(total),
        KeyAction::PrevPage => app.table.prev_page(),
        KeyAction::NextPage => app.table.next_page(total),

        KeyAction::PrevColumn => app.prev_column(),
        KeyAction::NextColumn => app.next_column(),
        KeyAction::ToggleSort => app.table.toggle_sort(app.active_column()),

        KeyAction::EditFilter => {
            let column = app.active_column();
            app.dialog = DialogState::Filter(FilterDialog::new(column, app.filters.get(column)));
        }
        KeyAction::ClearFilter => {
            let column = app.active_column();
            if app.filters.clear(column) {
                app.table.first_page();
                app.set_status(format!("Cleared filter on {}", column.name()));
            }
        }

        KeyAction::CycleTheme => app.cycle_theme(),
    }

    Action::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::Config;
    use crate::filter::{Column, FilterOp};
    use crate::store::{Article, ArticleStore};
    use std::sync::Arc;

    fn test_app() -> (App, mpsc::Sender<AppEvent>, mpsc::Receiver<AppEvent>) {
        let api = ApiClient::new("http://localhost:8000").unwrap();
        let app = App::new(ArticleStore::new(api), &Config::default());
        let (tx, rx) = mpsc::channel(8);
        (app, tx, rx)
    }

    fn article(id: i64, title: &str) -> Article {
        Article {
            id,
            title: title.to_string(),
            content: String::new(),
            created_at: "2021-10-04T15:02:45.000000Z".to_string(),
            updated_at: String::new(),
        }
    }

    fn press(app: &mut App, tx: &mpsc::Sender<AppEvent>, code: KeyCode) -> Action {
        handle_input(app, code, KeyModifiers::NONE, tx)
    }

    #[tokio::test]
    async fn test_quit_key_exits() {
        let (mut app, tx, _rx) = test_app();
        assert!(matches!(press(&mut app, &tx, KeyCode::Char('q')), Action::Quit));
    }

    #[tokio::test]
    async fn test_add_dialog_typing_and_field_switch() {
        let (mut app, tx, _rx) = test_app();
        press(&mut app, &tx, KeyCode::Char('a'));
        assert!(matches!(app.dialog, DialogState::Form(_)));

        press(&mut app, &tx, KeyCode::Char('h'));
        press(&mut app, &tx, KeyCode::Char('i'));
        press(&mut app, &tx, KeyCode::Tab);
        press(&mut app, &tx, KeyCode::Char('x'));
        press(&mut app, &tx, KeyCode::Backspace);

        match &app.dialog {
            DialogState::Form(form) => {
                assert_eq!(form.title, "hi");
                assert_eq!(form.content, "");
            }
            _ => panic!("expected form dialog"),
        }
    }

    #[tokio::test]
    async fn test_form_requires_title() {
        let (mut app, tx, _rx) = test_app();
        press(&mut app, &tx, KeyCode::Char('a'));
        press(&mut app, &tx, KeyCode::Enter);

        // The form stays open and complains
        assert!(matches!(app.dialog, DialogState::Form(_)));
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg.as_ref(), "Title is required");
    }

    #[tokio::test]
    async fn test_escape_dismisses_form_without_side_effects() {
        let (mut app, tx, _rx) = test_app();
        press(&mut app, &tx, KeyCode::Char('a'));
        press(&mut app, &tx, KeyCode::Char('z'));
        press(&mut app, &tx, KeyCode::Esc);

        assert!(!app.dialog.is_open());
        assert!(app.store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_edit_without_selection_warns() {
        let (mut app, tx, _rx) = test_app();
        press(&mut app, &tx, KeyCode::Char('e'));
        assert!(!app.dialog.is_open());
        let (msg, _) = app.status_message.as_ref().unwrap();
        assert_eq!(msg.as_ref(), "No article selected");
    }

    #[tokio::test]
    async fn test_delete_prompts_for_selected_article() {
        let (mut app, tx, _rx) = test_app();
        app.apply_snapshot(Arc::new(vec![article(9, "Doomed")]));

        press(&mut app, &tx, KeyCode::Char('d'));
        match &app.dialog {
            DialogState::ConfirmDelete { id, title } => {
                assert_eq!(*id, 9);
                assert_eq!(title, "Doomed");
            }
            _ => panic!("expected delete confirmation"),
        }

        // Declining leaves the dialog closed and the list untouched
        press(&mut app, &tx, KeyCode::Char('n'));
        assert!(!app.dialog.is_open());
    }

    #[tokio::test]
    async fn test_filter_dialog_applies_and_resets_page() {
        let (mut app, tx, _rx) = test_app();
        app.active_column_index = 1; // Title
        app.table.page = 3;

        press(&mut app, &tx, KeyCode::Char('f'));
        press(&mut app, &tx, KeyCode::Tab); // Contains -> Equals
        press(&mut app, &tx, KeyCode::Char('x'));
        press(&mut app, &tx, KeyCode::Enter);

        let filter = app.filters.get(Column::Title).unwrap();
        assert_eq!(filter.op, FilterOp::Equals);
        assert_eq!(filter.value, "x");
        assert_eq!(app.table.page, 0);
    }

    #[tokio::test]
    async fn test_clear_filter_is_idempotent() {
        let (mut app, tx, _rx) = test_app();
        app.active_column_index = 1;
        app.filters.apply(Column::Title, FilterOp::Contains, "a");

        press(&mut app, &tx, KeyCode::Char('F'));
        assert!(app.filters.get(Column::Title).is_none());

        // Clearing again does nothing and emits no status
        app.status_message = None;
        press(&mut app, &tx, KeyCode::Char('F'));
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_help_overlay_captures_keys() {
        let (mut app, tx, _rx) = test_app();
        press(&mut app, &tx, KeyCode::Char('?'));
        assert!(app.show_help);

        // A table key is swallowed while help is open
        press(&mut app, &tx, KeyCode::Char('a'));
        assert!(!app.dialog.is_open());

        press(&mut app, &tx, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[tokio::test]
    async fn test_sort_toggle_targets_active_column() {
        let (mut app, tx, _rx) = test_app();
        app.active_column_index = 1;
        press(&mut app, &tx, KeyCode::Char('s'));
        assert!(app.table.sort.is_some());
    }
}
