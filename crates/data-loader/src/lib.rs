//! # Data Loader Crate
//!
//! Loads the film catalog used by the CBR recommender.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (FilmRecord, Catalog, Schema)
//! - **parser**: Parse the CSV export (with embedded JSON sub-fields) into records
//! - **error**: Load failure types
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Catalog, Schema};
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies.csv"), &Schema::all())?;
//! println!("Loaded {} films", catalog.len());
//! ```
//!
//! Rows that cannot be parsed are dropped, never surfaced: the admission
//! invariant (non-empty title, non-empty genres) holds for every record in
//! a returned [`Catalog`], so downstream code never defends against
//! partial records.

// Public modules
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Catalog, FilmRecord, Schema};
