//! tabula, a terminal CRUD client for article REST APIs.
//!
//! The crate splits into a thin data layer and a TUI layer:
//!
//! - [`api`] wraps the four REST calls (list/create/update/delete)
//! - [`store`] owns the session's article list and publishes snapshots
//! - [`filter`] and [`table`] implement client-side filtering, sorting,
//!   and pagination over the loaded list
//! - [`ui`] renders the table and dialogs and drives the event loop

pub mod api;
pub mod app;
pub mod config;
pub mod filter;
pub mod keybindings;
pub mod store;
pub mod table;
pub mod theme;
pub mod ui;
pub mod util;
