//! Sort, pagination, and selection state for the article table.
//!
//! Operates over whatever rows survive the filter predicate. Sorting uses
//! the same text accessors as filtering, so it is lexical like everything
//! else in the table.

use crate::filter::{Column, ColumnFilters};
use crate::store::Article;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header arrow for the sorted column.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// View state of the table: active sort, current page, and the selected row
/// within the page.
#[derive(Debug, Clone)]
pub struct TableState {
    pub sort: Option<(Column, SortDirection)>,
    pub page: usize,
    pub page_size: usize,
    /// Row index within the current page.
    pub selected: usize,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            page: 0,
            // A zero page size would make every page empty.
            page_size: page_size.max(1),
            selected: 0,
        }
    }

    /// Filtered and sorted rows, in table order. Pagination slices this via
    /// [`page_bounds`].
    ///
    /// [`page_bounds`]: TableState::page_bounds
    pub fn rows<'a>(&self, articles: &'a [Article], filters: &ColumnFilters) -> Vec<&'a Article> {
        let mut rows: Vec<&Article> = articles.iter().filter(|a| filters.matches(a)).collect();
        if let Some((column, direction)) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = column.text(a).cmp(&column.text(b));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    /// Cycle the sort state for a column: ascending, descending, then off.
    /// Sorting a different column starts over at ascending.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((column, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size).max(1)
    }

    /// Half-open row range of the current page, clamped to the row count.
    pub fn page_bounds(&self, total_rows: usize) -> (usize, usize) {
        let start = (self.page * self.page_size).min(total_rows);
        let end = (start + self.page_size).min(total_rows);
        (start, end)
    }

    pub fn next_page(&mut self, total_rows: usize) {
        if self.page + 1 < self.total_pages(total_rows) {
            self.page += 1;
            self.selected = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.selected = 0;
        }
    }

    /// Jump back to the first page, as after a filter change.
    pub fn first_page(&mut self) {
        self.page = 0;
        self.selected = 0;
    }

    /// Keep page and selection valid after the row set shrank (a delete, a
    /// narrower filter, or a refresh).
    pub fn clamp(&mut self, total_rows: usize) {
        let last_page = self.total_pages(total_rows) - 1;
        self.page = self.page.min(last_page);
        let (start, end) = self.page_bounds(total_rows);
        let page_len = end - start;
        self.selected = self.selected.min(page_len.saturating_sub(1));
    }

    /// The globally-selected row index into [`rows`], if the page has rows.
    ///
    /// [`rows`]: TableState::rows
    pub fn selected_row(&self, total_rows: usize) -> Option<usize> {
        let (start, end) = self.page_bounds(total_rows);
        let index = start + self.selected;
        (index < end).then_some(index)
    }

    pub fn select_next(&mut self, total_rows: usize) {
        let (start, end) = self.page_bounds(total_rows);
        let page_len = end - start;
        if page_len > 0 && self.selected + 1 < page_len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self, total_rows: usize) {
        let (start, end) = self.page_bounds(total_rows);
        self.selected = (end - start).saturating_sub(1);
    }
}
