//! Article table widget.

use crate::app::App;
use crate::filter::Column;
use crate::store::Article;
use crate::util::cell_text;
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Generous per-cell caps; the layout clips the rest. Sanitizing through
/// [`cell_text`] keeps multi-line content on one row.
const TITLE_CELL_WIDTH: usize = 60;
const CONTENT_CELL_WIDTH: usize = 120;

/// Render the article table panel: header with sort and filter markers,
/// followed by the current page of rows.
pub(super) fn render(f: &mut Frame, app: &App, visible: &[&Article], area: Rect) {
    // The panel yields focus while a dialog is open.
    let border_style = if app.dialog.is_open() {
        app.theme.panel_border
    } else {
        app.theme.panel_border_focused
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Articles ");

    if visible.is_empty() {
        let message = if app.refreshing {
            "Loading..."
        } else if app.filters.is_empty() {
            "No articles"
        } else {
            "No articles match the active filters"
        };
        let placeholder = Paragraph::new(message).style(app.theme.table_dim).block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let header = Row::new(
        Column::ALL
            .iter()
            .enumerate()
            .map(|(i, column)| header_cell(app, i, *column))
            .collect::<Vec<_>>(),
    )
    .bottom_margin(1);

    let (start, end) = app.table.page_bounds(visible.len());
    let rows = visible[start..end].iter().enumerate().map(|(i, article)| {
        let style = if i == app.table.selected {
            app.theme.table_row_selected
        } else {
            app.theme.table_row
        };
        Row::new(vec![
            Cell::from(article.id.to_string()),
            Cell::from(cell_text(&article.title, TITLE_CELL_WIDTH)),
            Cell::from(cell_text(&article.content, CONTENT_CELL_WIDTH)),
            Cell::from(article.updated_at.clone()),
            Cell::from(article.created_at.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(25),
        Constraint::Min(20),
        Constraint::Length(27),
        Constraint::Length(27),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    f.render_widget(table, area);
}

/// One header cell: column name, sort arrow when sorted by this column,
/// and a `*` marker when a filter is active on it.
fn header_cell(app: &App, index: usize, column: Column) -> Cell<'static> {
    let mut label = column.name().to_string();

    if let Some((sort_column, direction)) = app.table.sort {
        if sort_column == column {
            label.push(' ');
            label.push_str(direction.indicator());
        }
    }

    let style = if index == app.active_column_index {
        app.theme.table_header_active
    } else {
        app.theme.table_header
    };

    let mut spans = vec![Span::styled(label, style)];
    if app.filters.get(column).is_some() {
        spans.push(Span::styled(" *", app.theme.filter_marker));
    }

    Cell::from(Line::from(spans))
}
