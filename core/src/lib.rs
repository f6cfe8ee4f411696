//! Client core for the bar administration view.
//!
//! # Overview
//! Two layers. The access layer (`BarClient` + `Transport` + `BarApi`) talks
//! to the `/bars` REST resource and normalizes failures into `ApiError`.
//! The view layer (`BarManager`) holds the collection snapshot, the drafts
//! and the dialog state, and re-fetches the whole collection after every
//! successful mutation. `render` turns that state into text.
//!
//! # Design
//! - `BarClient` is stateless and never does I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - The `Transport` trait is the only I/O seam; `UreqTransport` is the
//!   blocking production implementation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod manager;
pub mod render;
pub mod transport;
pub mod types;

pub use client::BarClient;
pub use config::ClientConfig;
pub use error::{ApiError, CONNECTIVITY_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use manager::{BarManager, Confirm, DialogMode, DraftPolicy, DELETE_PROMPT};
pub use transport::{BarApi, Transport, UreqTransport};
pub use types::{BarDraft, BarField, BarFields, BarId, BarRecord};
