//! Per-column filter state and the row predicate.
//!
//! Filtering runs entirely client-side over the loaded list. Every operator
//! works on the text rendition of a cell, so ordering comparisons are
//! lexical, not numeric or date-aware: "9" is greater than "10". All
//! comparisons are case-sensitive.

use crate::store::Article;
use std::borrow::Cow;
use std::collections::HashMap;

// ============================================================================
// Columns
// ============================================================================

/// The table's columns, in display order.
///
/// A closed set with typed accessors; every filter operator and the sort
/// comparator read a cell through [`Column::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Title,
    Content,
    UpdatedAt,
    CreatedAt,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Id,
        Column::Title,
        Column::Content,
        Column::UpdatedAt,
        Column::CreatedAt,
    ];

    /// Column header / config name.
    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Title => "title",
            Column::Content => "content",
            Column::UpdatedAt => "updated_at",
            Column::CreatedAt => "created_at",
        }
    }

    /// Text rendition of this column's field. Borrows where the field is
    /// already a string; only the id allocates.
    pub fn text(self, article: &Article) -> Cow<'_, str> {
        match self {
            Column::Id => Cow::Owned(article.id.to_string()),
            Column::Title => Cow::Borrowed(article.title.as_str()),
            Column::Content => Cow::Borrowed(article.content.as_str()),
            Column::UpdatedAt => Cow::Borrowed(article.updated_at.as_str()),
            Column::CreatedAt => Cow::Borrowed(article.created_at.as_str()),
        }
    }
}

// ============================================================================
// Filter Operators
// ============================================================================

/// The filter operators a column can carry. Exactly one is active per
/// filtered column at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Contains,
    Equals,
    GreaterThan,
    LessThan,
    StartsWith,
    EndsWith,
}

impl FilterOp {
    pub const ALL: [FilterOp; 6] = [
        FilterOp::Contains,
        FilterOp::Equals,
        FilterOp::GreaterThan,
        FilterOp::LessThan,
        FilterOp::StartsWith,
        FilterOp::EndsWith,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterOp::Contains => "contains",
            FilterOp::Equals => "equals",
            FilterOp::GreaterThan => "greater than",
            FilterOp::LessThan => "less than",
            FilterOp::StartsWith => "starts with",
            FilterOp::EndsWith => "ends with",
        }
    }

    /// Case-sensitive textual test of a cell against the filter value.
    /// GreaterThan/LessThan compare lexically.
    pub fn matches(self, cell: &str, value: &str) -> bool {
        match self {
            FilterOp::Contains => cell.contains(value),
            FilterOp::Equals => cell == value,
            FilterOp::GreaterThan => cell > value,
            FilterOp::LessThan => cell < value,
            FilterOp::StartsWith => cell.starts_with(value),
            FilterOp::EndsWith => cell.ends_with(value),
        }
    }
}

// ============================================================================
// Column Filter State
// ============================================================================

/// One active operator+value pair for a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub op: FilterOp,
    pub value: String,
}

/// Filter state across all columns.
///
/// Each column holds at most one [`ColumnFilter`]; applying a new one
/// replaces the old. Operators are never combined per column. Rows must
/// pass every active column's filter (logical AND).
#[derive(Debug, Clone, Default)]
pub struct ColumnFilters {
    filters: HashMap<Column, ColumnFilter>,
}

impl ColumnFilters {
    /// Set the filter for a column, replacing any prior record for it.
    pub fn apply(&mut self, column: Column, op: FilterOp, value: impl Into<String>) {
        self.filters.insert(
            column,
            ColumnFilter {
                op,
                value: value.into(),
            },
        );
    }

    /// Remove the filter for a column. Returns whether one was present;
    /// clearing an unfiltered column is a no-op.
    pub fn clear(&mut self, column: Column) -> bool {
        self.filters.remove(&column).is_some()
    }

    pub fn clear_all(&mut self) {
        self.filters.clear();
    }

    pub fn get(&self, column: Column) -> Option<&ColumnFilter> {
        self.filters.get(&column)
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Row predicate: AND across all active columns. A blank filter value
    /// constrains nothing and evaluation continues with the remaining
    /// columns.
    pub fn matches(&self, article: &Article) -> bool {
        self.filters.iter().all(|(column, filter)| {
            filter.value.is_empty() || filter.op.matches(column.text(article).as_ref(), &filter.value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn article(id: i64, title: &str, content: &str) -> Article {
        Article {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: "2021-10-04T15:02:45.000000Z".to_string(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_operators_are_textual_and_case_sensitive() {
        assert!(FilterOp::Contains.matches("Hello World", "lo W"));
        assert!(!FilterOp::Contains.matches("Hello World", "hello"));

        assert!(FilterOp::Equals.matches("abc", "abc"));
        assert!(!FilterOp::Equals.matches("abc", "Abc"));

        assert!(FilterOp::StartsWith.matches("prefix rest", "prefix"));
        assert!(!FilterOp::StartsWith.matches("prefix rest", "Prefix"));

        assert!(FilterOp::EndsWith.matches("the suffix", "suffix"));
        assert!(!FilterOp::EndsWith.matches("the suffix", "Suffix"));
    }

    #[test]
    fn test_ordering_is_lexical_not_numeric() {
        // Numerically 9 < 10, but as text "9" > "10".
        assert!(FilterOp::GreaterThan.matches("9", "10"));
        assert!(!FilterOp::LessThan.matches("9", "10"));
        assert!(FilterOp::LessThan.matches("10", "9"));
    }

    #[test]
    fn test_id_column_filters_as_text() {
        let mut filters = ColumnFilters::default();
        filters.apply(Column::Id, FilterOp::GreaterThan, "10");

        // "9" is lexically greater than "10".
        assert!(filters.matches(&article(9, "a", "b")));
        // "100" is lexically greater than "10" (longer, same prefix).
        assert!(filters.matches(&article(100, "a", "b")));
        // "1" is lexically less than "10".
        assert!(!filters.matches(&article(1, "a", "b")));
    }

    #[test]
    fn test_and_semantics_across_columns() {
        let mut filters = ColumnFilters::default();
        filters.apply(Column::Title, FilterOp::Contains, "Rust");
        filters.apply(Column::Content, FilterOp::StartsWith, "Intro");

        assert!(filters.matches(&article(1, "Rust 2024", "Intro to borrowing")));
        assert!(!filters.matches(&article(2, "Rust 2024", "A deep dive")));
        assert!(!filters.matches(&article(3, "Go 1.22", "Intro to channels")));
    }

    #[test]
    fn test_apply_replaces_prior_filter_for_column() {
        let mut filters = ColumnFilters::default();
        filters.apply(Column::Title, FilterOp::Contains, "alpha");
        filters.apply(Column::Title, FilterOp::StartsWith, "beta");

        assert_eq!(filters.len(), 1);
        assert_eq!(
            filters.get(Column::Title),
            Some(&ColumnFilter {
                op: FilterOp::StartsWith,
                value: "beta".to_string()
            })
        );
        // Only the replacement applies: "alphabet" contains "alpha" but does
        // not start with "beta".
        assert!(!filters.matches(&article(1, "alphabet", "x")));
        assert!(filters.matches(&article(2, "beta test", "x")));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut filters = ColumnFilters::default();
        assert!(!filters.clear(Column::Title));

        filters.apply(Column::Title, FilterOp::Equals, "x");
        assert!(filters.clear(Column::Title));
        assert!(!filters.clear(Column::Title));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_blank_value_constrains_nothing() {
        let mut filters = ColumnFilters::default();
        filters.apply(Column::Title, FilterOp::Equals, "");
        filters.apply(Column::Content, FilterOp::Contains, "body");

        // The blank title filter is skipped; the content filter still applies.
        assert!(filters.matches(&article(1, "anything", "the body text")));
        assert!(!filters.matches(&article(2, "anything", "no match")));
    }

    #[test]
    fn test_no_filters_matches_everything() {
        let filters = ColumnFilters::default();
        assert!(filters.matches(&article(1, "a", "b")));
    }

    proptest! {
        /// The filtered set is exactly the subset where every active column
        /// predicate holds.
        #[test]
        fn prop_filtered_set_is_and_subset(
            titles in proptest::collection::vec("[a-c]{0,4}", 0..20),
            title_needle in "[a-c]{0,2}",
            content_needle in "[a-c]{0,2}",
        ) {
            let articles: Vec<Article> = titles
                .iter()
                .enumerate()
                .map(|(i, t)| article(i as i64, t, &t.chars().rev().collect::<String>()))
                .collect();

            let mut filters = ColumnFilters::default();
            filters.apply(Column::Title, FilterOp::Contains, title_needle.clone());
            filters.apply(Column::Content, FilterOp::StartsWith, content_needle.clone());

            let filtered: Vec<&Article> =
                articles.iter().filter(|a| filters.matches(a)).collect();

            for a in &articles {
                let expected = (title_needle.is_empty() || a.title.contains(&title_needle))
                    && (content_needle.is_empty() || a.content.starts_with(&content_needle));
                let included = filtered.iter().any(|f| f.id == a.id);
                prop_assert_eq!(included, expected);
            }
        }
    }
}
