//! Core domain types for the film catalog.
//!
//! The catalog is an ordered, owned collection of immutable film records.
//! It is rebuilt wholesale on every load and passed into the engine as an
//! explicit value; queries only ever borrow it.

use serde::{Deserialize, Serialize};

/// One film case in the catalog.
///
/// Constructed only by the parser (or directly in tests); never mutated
/// afterwards. The parser guarantees `title` is non-empty and `genres` has
/// at least one entry for every record it admits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmRecord {
    pub title: String,
    /// Genre names projected from the embedded JSON array
    pub genres: Vec<String>,
    /// May be empty
    pub production_companies: Vec<String>,
    /// May be empty
    pub keywords: Vec<String>,
    /// Free text; may be empty
    pub tagline: String,
    /// 0.0 when absent or unparsable
    pub vote_average: f32,
    /// 0.0 when absent or unparsable
    pub runtime: f32,
}

impl FilmRecord {
    /// Create a record with only the required fields set.
    ///
    /// Mostly useful in tests; optional attributes default to empty/zero,
    /// matching what the parser produces for unconfigured columns.
    pub fn new(title: impl Into<String>, genres: Vec<String>) -> Self {
        Self {
            title: title.into(),
            genres,
            production_companies: Vec::new(),
            keywords: Vec::new(),
            tagline: String::new(),
            vote_average: 0.0,
            runtime: 0.0,
        }
    }
}

/// The optional columns the parser should extract.
///
/// `original_title` and `genres` are always extracted: without them a row
/// cannot be admitted at all. The rest follow the active similarity
/// configuration, so the set of recognized columns tracks the weights in
/// use rather than being hardcoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub production_companies: bool,
    pub keywords: bool,
    pub tagline: bool,
    pub vote_average: bool,
    pub runtime: bool,
}

impl Schema {
    /// Schema extracting every recognized column.
    pub fn all() -> Self {
        Self {
            production_companies: true,
            keywords: true,
            tagline: true,
            vote_average: true,
            runtime: true,
        }
    }
}

/// Ordered, read-only collection of film records for one load cycle.
///
/// Record order matches input row order; lookups and ranking rely on that
/// for deterministic tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    films: Vec<FilmRecord>,
}

impl Catalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self { films: Vec::new() }
    }

    /// Build a catalog directly from records, preserving their order.
    pub fn from_records(films: Vec<FilmRecord>) -> Self {
        Self { films }
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Get a record by catalog position
    pub fn get(&self, index: usize) -> Option<&FilmRecord> {
        self.films.get(index)
    }

    /// All records, in input order
    pub fn films(&self) -> &[FilmRecord] {
        &self.films
    }

    /// Find the first record whose title contains `query` as a
    /// case-insensitive substring.
    ///
    /// First match in catalog order wins; there is no ambiguity resolution
    /// or fuzzy matching. Returns the record's catalog position.
    pub fn find_by_title(&self, query: &str) -> Option<usize> {
        let needle = query.to_lowercase();
        self.films
            .iter()
            .position(|film| film.title.to_lowercase().contains(&needle))
    }
}
