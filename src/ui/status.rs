//! Status and info bar widgets.

use crate::app::App;
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the info line: pagination, sort, and filter summary.
pub(super) fn render_info(f: &mut Frame, app: &App, visible_rows: usize, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let total_pages = app.table.total_pages(visible_rows);
    let mut text = format!(
        " Page {}/{}  {} of {} articles",
        app.table.page + 1,
        total_pages,
        visible_rows,
        app.articles.len(),
    );

    if let Some((column, direction)) = app.table.sort {
        text.push_str(&format!("  [sort: {} {}]", column.name(), direction.indicator()));
    }
    let filters = app.filters.len();
    if filters > 0 {
        text.push_str(&format!("  [filters: {}]", filters));
    }
    if app.refreshing {
        text.push_str("  refreshing...");
    }

    let paragraph = Paragraph::new(text).style(app.theme.info_bar);
    f.render_widget(paragraph, area);
}

/// Render the status bar: transient messages, or static keybinding hints.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Use Cow to avoid allocations for the static hint line
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.dialog.is_open() {
        Cow::Borrowed("")
    } else {
        Cow::Borrowed(
            "[a]dd [e]dit [d]elete [f]ilter [s]ort [Tab]column [r]efresh [?]help [q]uit",
        )
    };

    let paragraph = Paragraph::new(text).style(app.theme.status_bar);
    f.render_widget(paragraph, area);
}
