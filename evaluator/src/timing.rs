use serde::{Deserialize, Serialize};

const NANOS_PER_SECOND: f64 = 1e9;

/// Running extraction-time statistics.
///
/// Only positive samples are recorded. The total is kept in whole nanoseconds,
/// so merging partial stats in any order gives bit-identical results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingStats {
    pub count: u64,
    pub total_nanos: u64,
    pub min: f64,
    pub max: f64,
}

impl TimingStats {
    pub fn record(&mut self, seconds: f64) {
        if !seconds.is_finite() || seconds <= 0.0 {
            return;
        }
        if self.count == 0 {
            self.min = seconds;
            self.max = seconds;
        } else {
            self.min = self.min.min(seconds);
            self.max = self.max.max(seconds);
        }
        self.count += 1;
        self.total_nanos = self
            .total_nanos
            .saturating_add((seconds * NANOS_PER_SECOND).round() as u64);
    }

    pub fn merge(&mut self, other: &TimingStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.count += other.count;
        self.total_nanos = self.total_nanos.saturating_add(other.total_nanos);
    }

    /// Total in seconds.
    pub fn total(&self) -> f64 {
        self.total_nanos as f64 / NANOS_PER_SECOND
    }

    pub fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total() / self.count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_non_positive_samples() {
        let mut t = TimingStats::default();
        t.record(0.0);
        t.record(-1.0);
        t.record(f64::NAN);
        assert_eq!(t, TimingStats::default());
        assert_eq!(t.avg(), 0.0);
    }

    #[test]
    fn tracks_min_max_and_avg() {
        let mut t = TimingStats::default();
        for s in [2.0, 0.5, 3.5] {
            t.record(s);
        }
        assert_eq!(t.count, 3);
        assert_eq!(t.min, 0.5);
        assert_eq!(t.max, 3.5);
        assert!((t.avg() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn merge_matches_single_pass() {
        let mut left = TimingStats::default();
        left.record(1.0);
        left.record(4.0);
        let mut right = TimingStats::default();
        right.record(0.25);

        let mut all = TimingStats::default();
        for s in [1.0, 4.0, 0.25] {
            all.record(s);
        }

        left.merge(&right);
        assert_eq!(left, all);

        let mut empty = TimingStats::default();
        empty.merge(&all);
        assert_eq!(empty, all);
    }

    #[test]
    fn merge_order_does_not_change_the_total() {
        let samples = [0.1, 0.2, 0.3, 0.7, 1.1, 0.013, 2.9, 0.31];

        let mut sequential = TimingStats::default();
        for s in samples {
            sequential.record(s);
        }

        let mut reversed = TimingStats::default();
        for chunk in samples.chunks(3).rev() {
            let mut part = TimingStats::default();
            for s in chunk {
                part.record(*s);
            }
            reversed.merge(&part);
        }

        assert_eq!(reversed, sequential);
        assert_eq!(sequential.total(), 5.623);
    }
}
