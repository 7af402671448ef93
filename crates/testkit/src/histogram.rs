//! Selection frequency bookkeeping for uniformity checks.

use std::collections::BTreeMap;

/// Counts how often each slot index was selected.
#[derive(Debug, Default, Clone)]
pub struct SelectionHistogram {
    counts: BTreeMap<usize, u64>,
    misses: u64,
    trials: u64,
}

impl SelectionHistogram {
    /// Empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one selection result.
    pub fn record(&mut self, selected: Option<usize>) {
        self.trials += 1;
        match selected {
            Some(index) => *self.counts.entry(index).or_insert(0) += 1,
            None => self.misses += 1,
        }
    }

    /// Number of recorded trials.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Trials that produced no selection.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// How often `index` was selected.
    pub fn count(&self, index: usize) -> u64 {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// Indices selected at least once, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.counts.keys().copied().collect()
    }

    /// Observed frequency of `index` among all trials.
    pub fn frequency(&self, index: usize) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.count(index) as f64 / self.trials as f64
    }

    /// Largest absolute gap between an index's frequency and `1 / expected.len()`.
    pub fn max_deviation_from_uniform(&self, expected: &[usize]) -> f64 {
        if expected.is_empty() {
            return 0.0;
        }
        let target = 1.0 / expected.len() as f64;
        expected
            .iter()
            .map(|&index| (self.frequency(index) - target).abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_hits_and_misses() {
        let mut histogram = SelectionHistogram::new();
        histogram.record(Some(2));
        histogram.record(Some(2));
        histogram.record(Some(5));
        histogram.record(None);

        assert_eq!(histogram.trials(), 4);
        assert_eq!(histogram.misses(), 1);
        assert_eq!(histogram.count(2), 2);
        assert_eq!(histogram.selected_indices(), vec![2, 5]);
        assert!((histogram.frequency(2) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn deviation_is_zero_for_perfect_split() {
        let mut histogram = SelectionHistogram::new();
        for index in [0, 1, 0, 1] {
            histogram.record(Some(index));
        }
        assert!(histogram.max_deviation_from_uniform(&[0, 1]) < 1e-12);
    }
}
