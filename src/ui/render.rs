//! Frame layout and render dispatch.

use crate::app::{App, DialogState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use super::{articles, dialogs, help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Render one frame: the article table, an info line, the status bar, and
/// any active overlay on top.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Minimum terminal size check for a usable UI
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let visible = app.visible_rows();

    articles::render(f, app, &visible, chunks[0]);
    status::render_info(f, app, visible.len(), chunks[1]);
    status::render(f, app, chunks[2]);

    match &app.dialog {
        DialogState::None => {}
        DialogState::Form(form) => dialogs::render_form(f, app, form),
        DialogState::ConfirmDelete { title, .. } => dialogs::render_confirm(f, app, title),
        DialogState::Filter(filter) => dialogs::render_filter(f, app, filter),
    }

    // Help renders on top of everything, dialogs included
    if app.show_help {
        help::render(f, app);
    }
}
