//! Top-K retrieval: locate the query case, score every other case, rank.
//!
//! Scoring is a pure function of the catalog and the configuration: the
//! per-query numeric ranges are precomputed, each candidate's local
//! similarities are combined into a weighted global score, and the
//! candidates are stable-sorted descending so ties keep catalog order.
//! Per-candidate diagnostics go through `tracing` and never affect the
//! scoring itself.

use crate::config::{Attribute, AttributeKind, SimilarityConfig};
use crate::similarity::{NumericRange, jaccard, word_bag};
use data_loader::{Catalog, FilmRecord};
use rayon::prelude::*;
use std::collections::HashSet;

/// One ranked recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFilm {
    pub title: String,
    /// Global similarity in [0, 1]
    pub score: f32,
}

impl ScoredFilm {
    /// Similarity as a percentage with two decimals, for display.
    pub fn score_percent(&self) -> String {
        format!("{:.2}", self.score * 100.0)
    }
}

/// Result of a recommendation query.
///
/// A query whose title matches nothing is a normal outcome, distinct from
/// a matched query with an empty result list (single-film catalog).
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendOutcome {
    Found {
        /// The matched record's full title (the query may be a substring)
        query_title: String,
        /// At most `k` films, best first
        results: Vec<ScoredFilm>,
    },
    NotFound {
        /// The query as typed
        query: String,
    },
}

/// Query-side state for one configured attribute, computed once per query.
struct PreparedAttribute {
    attribute: Attribute,
    weight: f32,
    query: PreparedValue,
}

enum PreparedValue {
    Set(HashSet<String>),
    Numeric { value: f32, range: NumericRange },
}

/// Set projection of a set-valued attribute.
///
/// Numeric attributes have no set projection; the scoring loop never asks
/// for one because the prepared kind always matches.
fn set_values(attribute: Attribute, film: &FilmRecord) -> HashSet<String> {
    match attribute {
        Attribute::Genres => film.genres.iter().cloned().collect(),
        Attribute::Keywords => film.keywords.iter().cloned().collect(),
        Attribute::ProductionCompanies => film.production_companies.iter().cloned().collect(),
        Attribute::TitleWords => word_bag(&film.title),
        Attribute::TaglineWords => word_bag(&film.tagline),
        Attribute::VoteAverage | Attribute::Runtime => HashSet::new(),
    }
}

/// Numeric value of a numeric attribute; 0 for set-valued ones.
fn numeric_value(attribute: Attribute, film: &FilmRecord) -> f32 {
    match attribute {
        Attribute::VoteAverage => film.vote_average,
        Attribute::Runtime => film.runtime,
        _ => 0.0,
    }
}

/// Scores film cases against a query case using weighted local
/// similarities.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    config: SimilarityConfig,
}

impl SimilarityEngine {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    /// Engine with the standard weight profile.
    pub fn with_defaults() -> Self {
        Self::new(SimilarityConfig::default())
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Find the `k` films most similar to the queried title.
    ///
    /// The query case is the first record whose title contains `query` as
    /// a case-insensitive substring; no match yields
    /// [`RecommendOutcome::NotFound`]. The query case itself is excluded
    /// from the candidates before ranking.
    pub fn recommend(&self, catalog: &Catalog, query: &str, k: usize) -> RecommendOutcome {
        let Some(query_index) = catalog.find_by_title(query) else {
            tracing::debug!(%query, "no catalog title matched query");
            return RecommendOutcome::NotFound {
                query: query.to_string(),
            };
        };

        let films = catalog.films();
        let query_film = &films[query_index];
        tracing::debug!(
            query_title = %query_film.title,
            candidates = films.len() - 1,
            k,
            "scoring catalog"
        );

        let prepared = self.prepare(query_film, films);
        let total_weight = self.config.total_weight();

        // Explicit self-exclusion by catalog position, not by title and
        // not by sentinel score: a duplicate-titled record stays eligible.
        let mut scored: Vec<(usize, f32)> = films
            .par_iter()
            .enumerate()
            .filter(|(index, _)| *index != query_index)
            .map(|(index, film)| (index, global_similarity(&prepared, total_weight, film)))
            .collect();

        // Stable sort keeps catalog order on equal scores, which makes
        // repeated queries over an unchanged catalog deterministic
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        let results = scored
            .into_iter()
            .map(|(index, score)| ScoredFilm {
                title: films[index].title.clone(),
                score,
            })
            .collect();

        RecommendOutcome::Found {
            query_title: query_film.title.clone(),
            results,
        }
    }

    /// Precompute the query-side value and, for numeric attributes, the
    /// catalog-wide range for every configured attribute.
    fn prepare(&self, query_film: &FilmRecord, films: &[FilmRecord]) -> Vec<PreparedAttribute> {
        self.config
            .weights()
            .iter()
            .map(|&(attribute, weight)| {
                let query = match attribute.kind() {
                    AttributeKind::Set => PreparedValue::Set(set_values(attribute, query_film)),
                    AttributeKind::Numeric => PreparedValue::Numeric {
                        value: numeric_value(attribute, query_film),
                        range: NumericRange::of(
                            films.iter().map(|film| numeric_value(attribute, film)),
                        ),
                    },
                };
                PreparedAttribute {
                    attribute,
                    weight,
                    query,
                }
            })
            .collect()
    }
}

/// Weighted sum of local similarities over the configured attributes,
/// normalized by the total weight. An all-zero weight total scores 0.
fn global_similarity(prepared: &[PreparedAttribute], total_weight: f32, film: &FilmRecord) -> f32 {
    if total_weight == 0.0 {
        return 0.0;
    }

    let weighted: f32 = prepared
        .iter()
        .map(|prep| {
            let local = match &prep.query {
                PreparedValue::Set(query) => jaccard(query, &set_values(prep.attribute, film)),
                PreparedValue::Numeric { value, range } => {
                    range.similarity(*value, numeric_value(prep.attribute, film))
                }
            };
            tracing::trace!(
                attribute = prep.attribute.name(),
                candidate = %film.title,
                local,
                "local similarity"
            );
            prep.weight * local
        })
        .sum();

    weighted / total_weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Attribute;

    fn film(title: &str, genres: &[&str]) -> FilmRecord {
        FilmRecord::new(title, genres.iter().map(|g| g.to_string()).collect())
    }

    #[test]
    fn test_identical_records_score_one() {
        let mut twin = film("Twin Peaks", &["Drama", "Mystery"]);
        twin.vote_average = 8.0;

        // Two byte-identical records (titles are not guaranteed unique)
        let catalog = Catalog::from_records(vec![twin.clone(), twin]);

        let engine = SimilarityEngine::new(
            SimilarityConfig::new()
                .weight(Attribute::Genres, 0.5)
                .weight(Attribute::TitleWords, 0.3)
                .weight(Attribute::VoteAverage, 0.2),
        );

        match engine.recommend(&catalog, "Twin Peaks", 5) {
            RecommendOutcome::Found { results, .. } => {
                assert_eq!(results.len(), 1);
                // Every local term is 1 (vote range is degenerate), so the
                // global score is exactly 1 regardless of the weights
                assert!((results[0].score - 1.0).abs() < 1e-6);
            }
            RecommendOutcome::NotFound { .. } => panic!("query should match"),
        }
    }

    #[test]
    fn test_disjoint_records_score_zero() {
        let catalog = Catalog::from_records(vec![
            film("Alpha", &["Action"]),
            film("Beta", &["Comedy"]),
        ]);

        let engine = SimilarityEngine::new(
            SimilarityConfig::new()
                .weight(Attribute::Genres, 0.7)
                .weight(Attribute::TitleWords, 0.3),
        );

        match engine.recommend(&catalog, "Alpha", 5) {
            RecommendOutcome::Found { results, .. } => {
                assert_eq!(results[0].title, "Beta");
                assert_eq!(results[0].score, 0.0);
            }
            RecommendOutcome::NotFound { .. } => panic!("query should match"),
        }
    }

    #[test]
    fn test_not_found_carries_query_as_typed() {
        let catalog = Catalog::from_records(vec![film("Alpha", &["Action"])]);
        let engine = SimilarityEngine::with_defaults();

        assert_eq!(
            engine.recommend(&catalog, "ZZZ Unknown", 5),
            RecommendOutcome::NotFound {
                query: "ZZZ Unknown".to_string()
            }
        );
    }

    #[test]
    fn test_empty_catalog_is_not_found() {
        let engine = SimilarityEngine::with_defaults();
        let outcome = engine.recommend(&Catalog::new(), "anything", 5);
        assert!(matches!(outcome, RecommendOutcome::NotFound { .. }));
    }

    #[test]
    fn test_zero_total_weight_scores_zero() {
        let catalog = Catalog::from_records(vec![
            film("Alpha", &["Action"]),
            film("Alpha Two", &["Action"]),
        ]);
        let engine = SimilarityEngine::new(SimilarityConfig::new());

        match engine.recommend(&catalog, "Alpha", 5) {
            RecommendOutcome::Found { results, .. } => {
                assert_eq!(results[0].score, 0.0);
                assert!(!results[0].score.is_nan());
            }
            RecommendOutcome::NotFound { .. } => panic!("query should match"),
        }
    }

    #[test]
    fn test_score_percent_formatting() {
        let scored = ScoredFilm {
            title: "X".to_string(),
            score: 0.87654,
        };
        assert_eq!(scored.score_percent(), "87.65");
    }
}
