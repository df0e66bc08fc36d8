//! Implicit rating for a "continue" press made while the answer is already shown.
//!
//! This is an input convention, not a scheduling rule: the chosen rating goes through the
//! same session transition as an explicit one.

use super::Rating;
use crate::config::AutoRatePolicy;

impl AutoRatePolicy {
    /// `elapsed_ms` is the time between reveal and the second continue.
    pub fn choose(&self, elapsed_ms: u64) -> Rating {
        if elapsed_ms < self.threshold_ms {
            self.fast
        } else {
            self.slow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_continue_is_easy() {
        let policy = AutoRatePolicy::default();
        assert_eq!(policy.choose(0), Rating::Easy);
        assert_eq!(policy.choose(999), Rating::Easy);
    }

    #[test]
    fn test_slow_continue_is_again() {
        let policy = AutoRatePolicy::default();
        assert_eq!(policy.choose(1000), Rating::Again);
        assert_eq!(policy.choose(60_000), Rating::Again);
    }

    #[test]
    fn test_custom_policy() {
        let policy = AutoRatePolicy {
            threshold_ms: 3000,
            fast: Rating::Good,
            slow: Rating::Hard,
        };
        assert_eq!(policy.choose(2999), Rating::Good);
        assert_eq!(policy.choose(3000), Rating::Hard);
    }
}
