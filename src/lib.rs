//! docsearch — load and query Documenter-style documentation search indexes.
//!
//! A documentation build emits `search_index.js`, a flat list of entries
//! (pages, sections and symbol docstrings) consumed by the site's search box.
//! This crate loads that snapshot once and answers keyword queries against it:
//!
//! ```no_run
//! let index = docsearch::loader::load_file("build/search_index.js")?;
//! for entry in index.search("test_rrule") {
//!     println!("{} -> {}", entry.title, entry.location);
//! }
//! # Ok::<(), docsearch::IndexError>(())
//! ```

pub mod error;
pub mod index;
pub mod loader;
pub mod model;
pub mod render;
pub mod snippet;

pub use error::IndexError;
pub use index::{DocIndex, MatchKind, SearchHit, SearchOptions};
pub use model::{Category, DocEntry, PageGroup};
