// src/lib.rs
//! Scrape a ski resort's status page and reconcile it against a fixed map
//! catalogue of lifts and slopes.
//!
//! ```text
//! core::net (fetch) → specs::status (extract) → classify → reconcile
//! ```
//!
//! `pipeline::Pipeline` runs one pass; `board::StatusBoard` publishes the
//! result for a frontend.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod board;
pub mod catalogue;
pub mod classify;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod file;
pub mod model;
pub mod pipeline;
pub mod progress;
pub mod reconcile;
pub mod specs;

#[cfg(feature = "cli")]
pub mod cli;

pub use catalogue::Catalogue;
pub use error::{ Error, FetchError };
pub use model::{ CatalogueFeature, ClassifiedStatusRecord, FeatureKind, RawStatusRecord, ReconciledFeature };
pub use pipeline::Pipeline;
