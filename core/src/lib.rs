//! Client core for the checklist service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of that request layer,
//! `ChecklistPage` keeps the page state for a checklist screen and drives it
//! through any `Transport` the host provides.
//!
//! # Design
//! - `ChecklistClient` is stateless: it holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `ChecklistPage` owns the page model; every mutation ends in a full reload
//!   of the list, and `view` projects the model into markup.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod page;
pub mod types;
pub mod view;

pub use client::ChecklistClient;
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use page::{ChecklistPage, EditModal, PageModel};
pub use types::{ChecklistItem, ChecklistItemUpdate, NewChecklistItem};
pub use view::{ChecklistEntry, SearchResults};
