//! # Roost 🐦
//!
//! Timeline state for Mastodon and Pleroma clients.
//!
//! ## Overview
//!
//! Roost keeps the timelines a social client shows (home, hashtag, list,
//! mentions) in memory and reconciles them with what the server sends: the
//! first page, older pages fetched while scrolling down, and live pushes
//! from the streaming API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Store                              │
//! │   One module per view: Tag, List, Mentions, TimelineSpace   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │    Timeline     │ │       API       │ │      Sync       │
//! │                 │ │                 │ │                 │
//! │ • Append/Insert │ │ • Source trait  │ │ • Shared handle │
//! │ • Update/Delete │ │ • Mastodon      │ │ • Stream pump   │
//! │ • Lazy guard    │ │ • Scopes        │ │                 │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!                              │
//!                              ▼
//!                     ┌─────────────────┐
//!                     │     Models      │
//!                     │                 │
//!                     │ • Status        │
//!                     │ • Notification  │
//!                     │ • Account       │
//!                     └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] - Timeline sources (Mastodon-compatible HTTP client)
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//! - [`models`] - Data models (Status, Notification, Account)
//! - [`store`] - Per-view timeline state
//! - [`sync`] - Shared timelines fed by live streams
//! - [`timeline`] - Timeline reconciliation
//!
//! ## Example
//!
//! ```no_run
//! use roost::api::MastodonClient;
//! use roost::models::Sns;
//! use roost::store::TagTimeline;
//!
//! # async fn run() -> roost::Result<()> {
//! let client = MastodonClient::new("https://mastodon.social", "token", Sns::Mastodon);
//! let mut tag = TagTimeline::new();
//! tag.fetch(&client, "rustlang").await?;
//! for status in tag.timeline() {
//!     println!("{}", status.preview(80));
//! }
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/roost/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod sync;
pub mod timeline;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use api::{MastodonClient, Scope, TimelineSource};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{Account, Notification, NotificationType, Sns, Status};
pub use store::{ListTimeline, Mentions, TagTimeline, TimelineModule, TimelineSpace};
pub use sync::SharedTimeline;
pub use timeline::{StreamEvent, Timeline, TimelineEntry};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
