//! Centered dialog overlays: the add/edit form, the delete confirmation,
//! and the per-column filter prompt.

use crate::app::{App, FilterDialog, FormDialog, FormField, FormMode};
use crate::filter::FilterOp;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the add/edit form overlay.
pub(super) fn render_form(f: &mut Frame, app: &App, form: &FormDialog) {
    let title = match form.mode {
        FormMode::Add => " Add Article ",
        FormMode::Edit { .. } => " Edit Article ",
    };

    let field_line = |label: &'static str, value: &str, focused: bool| {
        let (label_style, value_style) = if focused {
            (app.theme.dialog_label, app.theme.dialog_field_focused)
        } else {
            (app.theme.dialog_label, app.theme.dialog_field)
        };
        let marker = if focused { "> " } else { "  " };
        let cursor = if focused { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{}{:<9}", marker, label), label_style),
            Span::styled(format!("{}{}", value, cursor), value_style),
        ])
    };

    let lines = vec![
        Line::from(""),
        field_line("Title:", &form.title, form.focused == FormField::Title),
        Line::from(""),
        field_line("Content:", &form.content, form.focused == FormField::Content),
        Line::from(""),
        Line::from(Span::styled(
            "(Enter) Save  (Tab) Switch field  (Esc) Cancel",
            app.theme.table_dim,
        )),
    ];

    draw_overlay(f, app, title, lines, 60, 9);
}

/// Render the delete confirmation overlay.
pub(super) fn render_confirm(f: &mut Frame, app: &App, title: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(format!("Delete \"{}\"?", title)),
        Line::from(""),
        Line::from(Span::styled(
            "(y/Enter) Confirm  (n/Esc) Cancel",
            app.theme.table_dim,
        )),
    ];

    draw_overlay(f, app, " Confirm Delete ", lines, 50, 7);
}

/// Render the filter prompt overlay: an operator picker plus a value field.
pub(super) fn render_filter(f: &mut Frame, app: &App, filter: &FilterDialog) {
    let title = format!(" Filter: {} ", filter.column.name());

    let mut lines = Vec::with_capacity(FilterOp::ALL.len() + 4);
    for (i, op) in FilterOp::ALL.iter().enumerate() {
        let (marker, style) = if i == filter.op_index {
            ("> ", app.theme.dialog_field_focused)
        } else {
            ("  ", app.theme.dialog_text)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, op.label()),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Value: ", app.theme.dialog_label),
        Span::styled(format!("{}_", filter.value), app.theme.dialog_field_focused),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(Enter) Apply  (Tab) Operator  (Esc) Cancel",
        app.theme.table_dim,
    )));

    let height = lines.len() as u16 + 2;
    draw_overlay(f, app, &title, lines, 48, height);
}

/// Clear a centered rectangle and draw a bordered paragraph into it.
fn draw_overlay(f: &mut Frame, app: &App, title: &str, lines: Vec<Line>, width: u16, height: u16) {
    let area = f.area();

    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 20 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.panel_border_focused)
                .title(title.to_string()),
        )
        .alignment(Alignment::Left)
        .style(app.theme.dialog_text);

    f.render_widget(paragraph, overlay);
}
