//! # Scraping "specs" module
//!
//! Page-specific knowledge of *where the ground truth lives in the HTML* and
//! *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of the remote status page.
//! - **Selector choice** (the site's list item convention).
//! - **Tolerant extraction**: anything that does not look like a status line is
//!   skipped, never reported as an error.
//!
//! ## What does **not** live here
//! - **Networking** (`core::net`).
//! - **Interpretation** of the extracted text: prefix splitting, lift/slope
//!   kind and open/closed normalization live in `classify`.
//! - **Catalogue merging** (`reconcile`).
//!
//! ## Typical call chain
//! ```text
//! pipeline → core::net::Fetch → specs::status::RecordExtractor
//!                                 ↘ Vec<RawStatusRecord>
//!          → classify → reconcile
//! ```
//!
//! ## Testing notes
//! - Specs are testable **offline** against inline or saved HTML.
//! - Keep selectors resilient to whitespace and harmless wrapping markup.
pub mod status;

pub use status::{ ListItemExtractor, RecordExtractor };
