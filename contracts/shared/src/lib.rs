#![no_std]
//! Shared reward math and constants for the staking ledger.
//! Kept free of storage access so quotes can be reproduced anywhere.

use soroban_sdk::contracttype;

// ============================================================================
// Constants
// ============================================================================

/// Seconds in a day
pub const SECONDS_PER_DAY: u64 = 86400;

/// Seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Elapsed time at which the 5% tier starts (1 year)
pub const ONE_YEAR_TIER_START: u64 = SECONDS_PER_YEAR;

/// Elapsed time at which the 6% tier starts (2 years)
pub const TWO_YEAR_TIER_START: u64 = 2 * SECONDS_PER_YEAR;

/// Elapsed time at which the 8% tier starts (5 years)
pub const FIVE_YEAR_TIER_START: u64 = 5 * SECONDS_PER_YEAR;

// ============================================================================
// Tier Types
// ============================================================================

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RewardTier {
    Unvested,
    OneYear,
    TwoYear,
    FiveYear,
}

impl RewardTier {
    /// Tier reached after `elapsed` seconds since the last settlement.
    /// Lower bounds are inclusive.
    pub fn for_elapsed(elapsed: u64) -> Self {
        if elapsed >= FIVE_YEAR_TIER_START {
            RewardTier::FiveYear
        } else if elapsed >= TWO_YEAR_TIER_START {
            RewardTier::TwoYear
        } else if elapsed >= ONE_YEAR_TIER_START {
            RewardTier::OneYear
        } else {
            RewardTier::Unvested
        }
    }

    /// Rate as a reduced fraction `(divisor, multiplier)`.
    /// 5% = 1/20, 6% = 3/50, 8% = 2/25.
    pub fn rate(&self) -> Option<(i128, i128)> {
        match self {
            RewardTier::Unvested => None,
            RewardTier::OneYear => Some((20, 1)),
            RewardTier::TwoYear => Some((50, 3)),
            RewardTier::FiveYear => Some((25, 2)),
        }
    }

    /// Rate in whole percent, for display.
    pub fn percent(&self) -> u32 {
        match self {
            RewardTier::Unvested => 0,
            RewardTier::OneYear => 5,
            RewardTier::TwoYear => 6,
            RewardTier::FiveYear => 8,
        }
    }
}

// ============================================================================
// Reward Calculator
// ============================================================================

/// Reward owed on `deposited` after `elapsed` seconds without a settlement.
///
/// The rate is applied as `deposited / divisor * multiplier`. Dividing first
/// truncates the remainder before scaling, so e.g. 6% of 99 yields 3 rather
/// than 5. Settled balances depend on this exact ordering; keep it.
pub fn pending_reward(deposited: i128, elapsed: u64) -> i128 {
    if deposited <= 0 {
        return 0;
    }
    match RewardTier::for_elapsed(elapsed).rate() {
        Some((divisor, multiplier)) => (deposited / divisor) * multiplier,
        None => 0,
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: i128) -> bool {
    amount > 0
}

/// Elapsed seconds between two ledger timestamps, zero if the clock went backwards
pub fn elapsed_since(start_time: u64, end_time: u64) -> u64 {
    end_time.saturating_sub(start_time)
}

/// Calculate time difference in days
pub fn time_diff_in_days(start_time: u64, end_time: u64) -> u64 {
    elapsed_since(start_time, end_time) / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(elapsed: u64) -> RewardTier {
        RewardTier::for_elapsed(elapsed)
    }

    #[test]
    fn test_tier_lower_bounds_are_inclusive() {
        assert_eq!(tier(ONE_YEAR_TIER_START - 1), RewardTier::Unvested);
        assert_eq!(tier(31_536_000), RewardTier::OneYear);
        assert_eq!(tier(63_072_000 - 1), RewardTier::OneYear);
        assert_eq!(tier(63_072_000), RewardTier::TwoYear);
        assert_eq!(tier(157_680_000 - 1), RewardTier::TwoYear);
        assert_eq!(tier(157_680_000), RewardTier::FiveYear);
        assert_eq!(tier(u64::MAX), RewardTier::FiveYear);
    }

    #[test]
    fn test_pending_reward_per_tier() {
        assert_eq!(pending_reward(1000, 0), 0);
        assert_eq!(pending_reward(1000, 31_535_999), 0);
        assert_eq!(pending_reward(1000, 31_536_000), 50);
        assert_eq!(pending_reward(1000, 31_536_001), 50);
        assert_eq!(pending_reward(1000, 63_072_000), 60);
        assert_eq!(pending_reward(1000, 157_680_000), 80);
    }

    #[test]
    fn test_pending_reward_zero_or_negative_deposit() {
        assert_eq!(pending_reward(0, 157_680_000), 0);
        assert_eq!(pending_reward(-1000, 157_680_000), 0);
    }

    // Known precision loss: the remainder is dropped before the rate is
    // scaled, so results can be lower than `deposited * percent / 100`.
    #[test]
    fn test_floor_then_multiply_precision_loss() {
        // 5%: 39 / 20 * 1 = 1, same as 39 * 5 / 100
        assert_eq!(pending_reward(39, ONE_YEAR_TIER_START), 1);
        // 6%: 99 / 50 * 3 = 3, while 99 * 6 / 100 = 5
        assert_eq!(pending_reward(99, TWO_YEAR_TIER_START), 3);
        assert_ne!(pending_reward(99, TWO_YEAR_TIER_START), 99 * 6 / 100);
        // 8%: 49 / 25 * 2 = 2, while 49 * 8 / 100 = 3
        assert_eq!(pending_reward(49, FIVE_YEAR_TIER_START), 2);
        // Below the divisor nothing accrues at all
        assert_eq!(pending_reward(19, FIVE_YEAR_TIER_START * 2), 0);
    }

    #[test]
    fn test_percent_matches_rate() {
        for tier in [
            RewardTier::OneYear,
            RewardTier::TwoYear,
            RewardTier::FiveYear,
        ] {
            let (divisor, multiplier) = tier.rate().unwrap();
            assert_eq!(multiplier * 100 / divisor, tier.percent() as i128);
        }
        assert_eq!(RewardTier::Unvested.rate(), None);
    }

    #[test]
    fn test_time_helpers() {
        assert_eq!(elapsed_since(100, 50), 0);
        assert_eq!(elapsed_since(50, 100), 50);
        assert_eq!(time_diff_in_days(0, SECONDS_PER_DAY * 3 + 5), 3);
        assert!(validate_positive_amount(1));
        assert!(!validate_positive_amount(0));
    }
}
