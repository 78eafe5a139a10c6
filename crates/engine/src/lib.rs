//! # Engine Crate
//!
//! Case-based-reasoning retrieval for the film recommender: given a loaded
//! catalog and a query title, find the K most similar films.
//!
//! ## Components
//!
//! - **config**: attribute set and weights (`SimilarityConfig`); also
//!   derives the loader schema so the recognized columns follow the
//!   active weights
//! - **similarity**: local metrics — Jaccard over sets and word bags,
//!   range-normalized numeric distance
//! - **retrieve**: query lookup, per-query normalization, weighted global
//!   scoring, stable top-K ranking
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::{RecommendOutcome, SimilarityEngine};
//! use data_loader::Catalog;
//!
//! let engine = SimilarityEngine::with_defaults();
//! let catalog = Catalog::from_csv_str(&raw_text, &engine.config().schema())?;
//!
//! match engine.recommend(&catalog, "heat", 5) {
//!     RecommendOutcome::Found { query_title, results } => { /* render */ }
//!     RecommendOutcome::NotFound { query } => { /* render not-found message */ }
//! }
//! ```
//!
//! Queries are pure and side-effect free; the catalog is only ever
//! borrowed, so independent catalogs and engines compose freely.

// Public modules
pub mod config;
pub mod retrieve;
pub mod similarity;

// Re-export commonly used types
pub use config::{Attribute, AttributeKind, SimilarityConfig};
pub use retrieve::{RecommendOutcome, ScoredFilm, SimilarityEngine};
