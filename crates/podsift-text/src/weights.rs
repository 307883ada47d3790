//! Title/description weight normalization.

/// Per-field weights as percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub title: f64,
    pub description: f64,
}

impl Weights {
    pub const EVEN: Weights = Weights { title: 50.0, description: 50.0 };

    /// Score contribution of already-capped match counts.
    pub fn score(&self, title_count: usize, description_count: usize) -> f64 {
        title_count as f64 * self.title + description_count as f64 * self.description
    }
}

/// Scale raw weights so they sum to 100.
///
/// A combined weight of zero or less means no preference and yields
/// [`Weights::EVEN`]. Individual negative weights are not clamped, so a
/// negative weight paired with a larger positive one produces percentages
/// outside `[0, 100]`.
pub fn normalize_weights(title_weight: i64, description_weight: i64) -> Weights {
    let total = i128::from(title_weight) + i128::from(description_weight);
    if total <= 0 {
        return Weights::EVEN;
    }
    let total = total as f64;
    Weights {
        title: title_weight as f64 / total * 100.0,
        description: description_weight as f64 / total * 100.0,
    }
}
