//! Attribute and weight configuration for the similarity engine.
//!
//! The engine iterates a configuration generically instead of hardcoding a
//! fixed attribute set, so different weight profiles (with or without
//! keywords, runtime, tagline, ...) all run through the same scoring loop.
//! The configuration also determines which optional columns the loader
//! needs to extract.

use data_loader::Schema;

/// A comparable attribute of a film case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Genre names (set-valued)
    Genres,
    /// Keyword names (set-valued)
    Keywords,
    /// Production company names (set-valued)
    ProductionCompanies,
    /// Title as a lowercase word bag (set-valued)
    TitleWords,
    /// Tagline as a lowercase word bag (set-valued)
    TaglineWords,
    /// Average vote, range-normalized (numeric)
    VoteAverage,
    /// Runtime in minutes, range-normalized (numeric)
    Runtime,
}

/// How an attribute's local similarity is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Jaccard similarity over element sets
    Set,
    /// `1 - |a - b| / range` over the catalog-wide value range
    Numeric,
}

impl Attribute {
    pub fn kind(self) -> AttributeKind {
        match self {
            Attribute::VoteAverage | Attribute::Runtime => AttributeKind::Numeric,
            _ => AttributeKind::Set,
        }
    }

    /// Name used in trace output
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Genres => "genres",
            Attribute::Keywords => "keywords",
            Attribute::ProductionCompanies => "production_companies",
            Attribute::TitleWords => "title_words",
            Attribute::TaglineWords => "tagline_words",
            Attribute::VoteAverage => "vote_average",
            Attribute::Runtime => "runtime",
        }
    }
}

/// Attribute weights for the global similarity.
///
/// Weights are non-negative and need not sum to 1: the engine divides by
/// the total at score time, so a configuration is invariant under uniform
/// rescaling.
///
/// ## Usage
/// ```ignore
/// let config = SimilarityConfig::new()
///     .weight(Attribute::Genres, 1.0)
///     .weight(Attribute::Runtime, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimilarityConfig {
    weights: Vec<(Attribute, f32)>,
}

impl SimilarityConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self {
            weights: Vec::new(),
        }
    }

    /// Add a weighted attribute (builder pattern).
    pub fn weight(mut self, attribute: Attribute, weight: f32) -> Self {
        debug_assert!(weight >= 0.0, "weights must be non-negative");
        self.weights.push((attribute, weight));
        self
    }

    /// Configured attributes with their weights, in insertion order
    pub fn weights(&self) -> &[(Attribute, f32)] {
        &self.weights
    }

    /// Sum of all configured weights
    pub fn total_weight(&self) -> f32 {
        self.weights.iter().map(|(_, w)| w).sum()
    }

    /// The loader schema implied by this configuration.
    ///
    /// Title and genres are always extracted (the admission invariant needs
    /// them); everything else only when a weight references it.
    pub fn schema(&self) -> Schema {
        let mut schema = Schema::default();
        for (attribute, _) in &self.weights {
            match attribute {
                Attribute::ProductionCompanies => schema.production_companies = true,
                Attribute::Keywords => schema.keywords = true,
                Attribute::TaglineWords => schema.tagline = true,
                Attribute::VoteAverage => schema.vote_average = true,
                Attribute::Runtime => schema.runtime = true,
                Attribute::Genres | Attribute::TitleWords => {}
            }
        }
        schema
    }
}

impl Default for SimilarityConfig {
    /// The standard profile: genres 0.4, keywords 0.2, production
    /// companies 0.2, vote average 0.1, title words 0.1.
    fn default() -> Self {
        Self::new()
            .weight(Attribute::Genres, 0.4)
            .weight(Attribute::Keywords, 0.2)
            .weight(Attribute::ProductionCompanies, 0.2)
            .weight(Attribute::VoteAverage, 0.1)
            .weight(Attribute::TitleWords, 0.1)
    }
}
