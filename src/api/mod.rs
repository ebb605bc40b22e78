//! REST client for the articles backend.
//!
//! Four calls against `/api/articles`: list, create, update, delete.
//! Responses arrive in a `{"data": ...}` envelope for list/create; update
//! and delete bodies are ignored.

mod client;

pub use client::{ApiClient, ApiError};
