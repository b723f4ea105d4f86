use std::collections::HashMap;
use std::sync::OnceLock;

use crate::ranking::{rank, Order, Ranking};

/// Occurrence counts keyed by label.
///
/// A `Counter` is read-only once built. The descending ranking is computed on
/// the first call to [`Counter::most_common`] and reused afterwards; this is
/// only sound because no method takes `&mut self`. Any future mutating API
/// has to reset `most_common`.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    counts: HashMap<String, i64>,
    most_common: OnceLock<Ranking>,
}

impl Counter {
    /// Tally a sequence of labels. Labels compare by exact string value.
    pub fn from_labels<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for item in items {
            *counts.entry(item.into()).or_insert(0) += 1;
        }
        Self::from_counts(counts)
    }

    /// Wrap caller-supplied counts as-is. Zero and negative counts are kept.
    ///
    /// The map is moved in, so later changes on the caller side cannot reach
    /// the counter or its cached ranking.
    pub fn from_counts(counts: HashMap<String, i64>) -> Self {
        Self {
            counts,
            most_common: OnceLock::new(),
        }
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Count stored for `label`, or 0 when absent.
    pub fn count(&self, label: &str) -> i64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Whether `label` is a key, whatever its stored count.
    pub fn contains(&self, label: &str) -> bool {
        self.counts.contains_key(label)
    }

    /// Sum of all counts. Accumulated in `i128`, so any `i64` counts fit.
    pub fn total(&self) -> i128 {
        self.counts.values().map(|v| i128::from(*v)).sum()
    }

    /// `(label, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Labels and counts sorted by count descending, then label descending.
    pub fn most_common(&self) -> (&[String], &[i64]) {
        let ranking = self.most_common_ranking();
        (ranking.labels(), ranking.counts())
    }

    /// The cached ranking behind [`Counter::most_common`].
    pub fn most_common_ranking(&self) -> &Ranking {
        self.most_common
            .get_or_init(|| rank(&self.counts, Order::Descending))
    }

    /// Rank every label in `order`. Always recomputed.
    pub fn frequencies(&self, order: Order) -> Ranking {
        rank(&self.counts, order)
    }
}

impl PartialEq for Counter {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for Counter {}

impl From<HashMap<String, i64>> for Counter {
    fn from(counts: HashMap<String, i64>) -> Self {
        Self::from_counts(counts)
    }
}

impl FromIterator<String> for Counter {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::from_labels(iter)
    }
}

impl<'a> FromIterator<&'a str> for Counter {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self::from_labels(iter)
    }
}
