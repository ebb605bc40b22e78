//! Shared text helpers for rendering server-supplied strings.

mod text;

pub use text::{cell_text, flatten_whitespace};
