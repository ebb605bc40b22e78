//! Central application state for the TUI.

use crate::config::Config;
use crate::filter::{Column, ColumnFilter, ColumnFilters, FilterOp};
use crate::keybindings::KeybindingRegistry;
use crate::store::{Article, ArticleStore};
use crate::table::TableState;
use crate::theme::{ColorPalette, ThemeVariant};
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(4);

// ============================================================================
// Dialog State
// ============================================================================

/// Which overlay, if any, currently captures input.
///
/// Dialogs follow a single lifecycle: open with a copy of the relevant data,
/// then either confirm (forwarding the payload to the store) or dismiss
/// (leaving all state untouched).
pub enum DialogState {
    None,
    Form(FormDialog),
    ConfirmDelete { id: i64, title: String },
    Filter(FilterDialog),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        !matches!(self, DialogState::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Content,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Content,
            FormField::Content => FormField::Title,
        }
    }
}

/// The add/edit form. Holds copies of the fields, never references into the
/// live list, so a dismissed dialog leaves everything unchanged.
pub struct FormDialog {
    pub mode: FormMode,
    pub title: String,
    pub content: String,
    pub focused: FormField,
}

impl FormDialog {
    /// Blank form for a new article.
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            title: String::new(),
            content: String::new(),
            focused: FormField::Title,
        }
    }

    /// Form pre-filled with a copy of an existing article's fields.
    pub fn edit(article: &Article) -> Self {
        Self {
            mode: FormMode::Edit { id: article.id },
            title: article.title.clone(),
            content: article.content.clone(),
            focused: FormField::Title,
        }
    }

    pub fn focused_value_mut(&mut self) -> &mut String {
        match self.focused {
            FormField::Title => &mut self.title,
            FormField::Content => &mut self.content,
        }
    }
}

/// The per-column filter prompt: pick an operator, type a value.
pub struct FilterDialog {
    pub column: Column,
    pub op_index: usize,
    pub value: String,
}

impl FilterDialog {
    /// Open for a column, pre-selecting its current filter if one is active.
    pub fn new(column: Column, existing: Option<&ColumnFilter>) -> Self {
        let (op_index, value) = match existing {
            Some(filter) => (
                FilterOp::ALL.iter().position(|op| *op == filter.op).unwrap_or(0),
                filter.value.clone(),
            ),
            None => (0, String::new()),
        };
        Self {
            column,
            op_index,
            value,
        }
    }

    pub fn op(&self) -> FilterOp {
        FilterOp::ALL[self.op_index]
    }

    pub fn next_op(&mut self) {
        self.op_index = (self.op_index + 1) % FilterOp::ALL.len();
    }

    pub fn prev_op(&mut self) {
        self.op_index = (self.op_index + FilterOp::ALL.len() - 1) % FilterOp::ALL.len();
    }
}

// ============================================================================
// Events
// ============================================================================

/// Events from background tasks.
///
/// Data changes travel on the store's watch channel; this channel only
/// carries task-completion signals the UI cannot derive from a snapshot.
pub enum AppEvent {
    /// A refresh task settled, successfully or not (a failed fetch
    /// publishes an empty list, so `count` is simply what is now loaded).
    RefreshComplete { count: usize },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
pub struct App {
    pub store: ArticleStore,

    /// Last published snapshot from the store.
    pub articles: Arc<Vec<Article>>,

    // Table view state
    pub filters: ColumnFilters,
    pub table: TableState,
    /// Cursor into [`Column::ALL`]; sort and filter commands target this.
    pub active_column_index: usize,

    // Overlays
    pub dialog: DialogState,
    pub show_help: bool,

    // Theme
    pub theme_variant: ThemeVariant,
    pub theme: ColorPalette,

    // Keybindings
    pub keybindings: KeybindingRegistry,

    /// Status message with expiry. Cow avoids allocation for static
    /// literals.
    pub status_message: Option<(Cow<'static, str>, Instant)>,

    /// Dirty flag to skip unnecessary frame renders.
    pub needs_redraw: bool,

    /// A refresh task is in flight.
    pub refreshing: bool,
}

impl App {
    pub fn new(store: ArticleStore, config: &Config) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "Unknown theme in config, falling back to dark");
            ThemeVariant::Dark
        });

        Self {
            store,
            articles: Arc::new(Vec::new()),
            filters: ColumnFilters::default(),
            table: TableState::new(config.page_size),
            active_column_index: 0,
            dialog: DialogState::None,
            show_help: false,
            theme_variant,
            theme: theme_variant.palette(),
            keybindings: KeybindingRegistry::with_overrides(&config.keybindings),
            status_message: None,
            needs_redraw: true,
            refreshing: false,
        }
    }

    /// Replace the backing rows with a store publication and keep the table
    /// cursor valid.
    pub fn apply_snapshot(&mut self, snapshot: Arc<Vec<Article>>) {
        self.articles = snapshot;
        let total = self.visible_count();
        self.table.clamp(total);
        self.needs_redraw = true;
    }

    /// The column under the cursor.
    pub fn active_column(&self) -> Column {
        Column::ALL[self.active_column_index]
    }

    pub fn next_column(&mut self) {
        self.active_column_index = (self.active_column_index + 1) % Column::ALL.len();
    }

    pub fn prev_column(&mut self) {
        self.active_column_index =
            (self.active_column_index + Column::ALL.len() - 1) % Column::ALL.len();
    }

    /// Filtered and sorted rows in table order.
    pub fn visible_rows(&self) -> Vec<&Article> {
        self.table.rows(&self.articles, &self.filters)
    }

    pub fn visible_count(&self) -> usize {
        self.articles.iter().filter(|a| self.filters.matches(a)).count()
    }

    /// The article under the table cursor, if the current page has rows.
    pub fn selected_article(&self) -> Option<&Article> {
        let rows = self.visible_rows();
        self.table.selected_row(rows.len()).map(|i| rows[i])
    }

    pub fn set_status(&mut self, message: impl Into<Cow<'static, str>>) {
        self.status_message = Some((message.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear the status message once it has outlived its TTL. Returns
    /// whether anything was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, since)) = &self.status_message {
            if since.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    pub fn cycle_theme(&mut self) {
        self.theme_variant = self.theme_variant.next();
        self.theme = self.theme_variant.palette();
        self.set_status(format!("Theme: {}", self.theme_variant.name()));
    }
}
