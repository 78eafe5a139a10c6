//! Local similarity metrics.
//!
//! Two families: Jaccard over element sets, and range-normalized distance
//! over numeric values. Both carry explicit policies for their degenerate
//! cases so the global score is always a well-defined number in [0, 1].

use std::collections::HashSet;
use std::hash::Hash;

/// Jaccard similarity: `|A ∩ B| / |A ∪ B|`.
///
/// An empty union (both sets empty) is defined as 0 rather than NaN: two
/// cases that both lack an attribute tell us nothing about their likeness.
pub fn jaccard<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f32 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f32 / union as f32
}

/// Lowercase word bag of a text field, split on whitespace runs.
pub fn word_bag(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Min/max of a numeric attribute across the whole catalog, precomputed
/// once per query.
#[derive(Debug, Clone, Copy)]
pub struct NumericRange {
    min: f32,
    max: f32,
}

impl NumericRange {
    pub fn of(values: impl Iterator<Item = f32>) -> Self {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for value in values {
            min = min.min(value);
            max = max.max(value);
        }
        if min > max {
            // No values at all
            Self { min: 0.0, max: 0.0 }
        } else {
            Self { min, max }
        }
    }

    /// `1 - |a - b| / range`, clamped to [0, 1].
    ///
    /// A zero range means the attribute is constant across the catalog;
    /// every pair is then fully similar (1.0), never a division by zero.
    pub fn similarity(&self, a: f32, b: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 1.0;
        }
        (1.0 - (a - b).abs() / range).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_jaccard_identical_sets() {
        let a = set(&["Action", "Drama"]);
        assert_eq!(jaccard(&a, &a), 1.0);
    }

    #[test]
    fn test_jaccard_disjoint_sets() {
        let a = set(&["Action"]);
        let b = set(&["Comedy"]);
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        let a = set(&["Action", "Drama"]);
        let b = set(&["Action", "Comedy", "Drama"]);
        // Intersection 2, union 3
        assert!((jaccard(&a, &b) - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_jaccard_empty_union_is_zero() {
        let a: HashSet<String> = HashSet::new();
        let b: HashSet<String> = HashSet::new();
        assert_eq!(jaccard(&a, &b), 0.0);
    }

    #[test]
    fn test_word_bag_lowercases_and_splits() {
        let bag = word_bag("The  Dark\tKnight");
        assert_eq!(bag, set(&["the", "dark", "knight"]));
        assert!(word_bag("   ").is_empty());
    }

    #[test]
    fn test_numeric_similarity() {
        let range = NumericRange::of([100.0, 150.0, 200.0].into_iter());
        assert_eq!(range.similarity(100.0, 100.0), 1.0);
        assert_eq!(range.similarity(100.0, 200.0), 0.0);
        assert!((range.similarity(100.0, 150.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_numeric_zero_range_is_fully_similar() {
        let range = NumericRange::of([120.0, 120.0, 120.0].into_iter());
        let sim = range.similarity(120.0, 120.0);
        assert_eq!(sim, 1.0);
        assert!(!sim.is_nan());
    }

    #[test]
    fn test_numeric_empty_input() {
        let range = NumericRange::of(std::iter::empty());
        assert_eq!(range.similarity(0.0, 0.0), 1.0);
    }
}
