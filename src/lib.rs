//! # Vitrine
//!
//! A store-front administration server: stores, products, promotions and
//! the section-based layout of each store, usable both as a standalone
//! binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! vitrine = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitrine::catalog::Catalog;
//! use vitrine::layout::{self, EditorSession, Viewport};
//! use vitrine::store::{Backend, Latency, SqliteBackend};
//! use vitrine::types::SectionKind;
//!
//! let backend = SqliteBackend::new("./data/vitrine.db")?;
//! backend.initialize()?;
//! let catalog = Catalog::new(Arc::new(backend), Latency::NONE);
//!
//! let mut session = EditorSession::open(&catalog.configs, "store1").await?;
//! session.apply(|c| layout::add_section(c, SectionKind::Grid));
//! session.save(&catalog.configs).await?;
//!
//! let plan = layout::render_store(&catalog, "store1", Viewport::Mobile).await;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `vitrine` binary. Disable with `default-features = false`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod promotion;
pub mod server;
pub mod store;
pub mod types;
