use std::cmp::Ordering;
use std::collections::HashMap;

/// Direction of a ranking. Both keys (count, then label) follow the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Order {
    /// Highest count first; equal counts put the greater label first.
    #[default]
    Descending,
    /// Lowest count first; equal counts put the smaller label first.
    Ascending,
}

/// Labels and their counts in rank order, held as two parallel vectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ranking {
    labels: Vec<String>,
    counts: Vec<i64>,
}

impl Ranking {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn counts(&self) -> &[i64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(label, count)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<i64>) {
        (self.labels, self.counts)
    }
}

/// Sort every entry of `counts` into a ranking.
///
/// The comparator is applied on both keys explicitly. Sorting ascending and
/// reversing only agrees with this while labels are unique.
pub(crate) fn rank(counts: &HashMap<String, i64>, order: Order) -> Ranking {
    let mut entries: Vec<(&String, i64)> = counts.iter().map(|(k, v)| (k, *v)).collect();
    entries.sort_unstable_by(|a, b| compare(order, a, b));

    let mut labels = Vec::with_capacity(entries.len());
    let mut ranked_counts = Vec::with_capacity(entries.len());
    for (label, count) in entries {
        labels.push(label.clone());
        ranked_counts.push(count);
    }
    Ranking {
        labels,
        counts: ranked_counts,
    }
}

fn compare(order: Order, a: &(&String, i64), b: &(&String, i64)) -> Ordering {
    match order {
        Order::Descending => b.1.cmp(&a.1).then_with(|| b.0.cmp(a.0)),
        Order::Ascending => a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)),
    }
}
