use rust_decimal::Decimal;

use crate::config::{ProgramConfig, StreakRules};
use crate::models::{ProgramEarnings, Result, RewardsError, UsageInput};
use crate::programs::ProgramId;

/// Consistency at or above this is modeled as hitting every cycle cap instead
/// of deriving an average run length between breaks.
const NEAR_PERFECT_CONSISTENCY: f64 = 0.95;

/// Crinkl's earnings model: daily-capped receipts with category multipliers,
/// streak cycles, a weekly bonus, and a holdings multiplier over everything.
pub struct CrinklCalculator {
    config: ProgramConfig,
}

impl CrinklCalculator {
    pub fn new(config: ProgramConfig) -> Result<Self> {
        if config.limits.per_day.is_none()
            || !config.has_categories()
            || !config.has_holdings()
            || !config.has_streaks()
            || !config.has_weekly_bonus()
        {
            return Err(RewardsError::Config(format!(
                "{} is missing tables required by the full-ruleset calculator",
                config.name
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    pub fn project(&self, input: &UsageInput) -> Result<ProgramEarnings> {
        input.validate()?;

        let (daily_cap, streaks, weekly) = match (
            self.config.limits.per_day,
            self.config.streaks.as_ref(),
            self.config.weekly_bonus.as_ref(),
        ) {
            (Some(cap), Some(streaks), Some(weekly)) => (cap, streaks, weekly),
            _ => {
                return Err(RewardsError::Config(format!(
                    "{} is missing tables required by the full-ruleset calculator",
                    self.config.name
                )))
            }
        };

        let total_days = input.total_days();
        let total_weeks = input.total_weeks();

        // Cap the daily rate before extrapolating over the horizon.
        let effective_rate = input.receipts_per_day.min(daily_cap);
        let total_receipts = total_days * effective_rate as u64;
        let receipt_rate_capped = input.receipts_per_day > daily_cap;

        let category_multiplier = self
            .config
            .category_multiplier(input.category)
            .ok_or(RewardsError::InvalidCategory {
                program: ProgramId::Crinkl,
                category: input.category,
            })?;
        let receipt_points =
            total_receipts as f64 * self.config.points_per_receipt * category_multiplier;

        let (streak_days, streak_points) = streak_earnings(input, streaks);

        // The weekly bonus qualifies on the raw scanning rate, not the capped
        // one; a qualifying user earns it every week of the horizon.
        let receipts_per_week = input.receipts_per_day as u64 * 7;
        let qualifying_weeks = if receipts_per_week >= weekly.min_receipts_per_week as u64 {
            total_weeks
        } else {
            0
        };
        let weekly_points = qualifying_weeks as f64 * weekly.points;

        let referral_points = input.referral_count as f64 * self.config.referral_points;

        let subtotal = receipt_points + streak_points + weekly_points + referral_points;

        let tier = self
            .config
            .holdings_tier(input.holdings_amount)
            .ok_or_else(|| {
                RewardsError::Config(format!(
                    "{}: no holdings tier admits {}",
                    self.config.name, input.holdings_amount
                ))
            })?;
        let multiplier = tier.multiplier;
        let total_points = (subtotal * multiplier).floor() as u64;

        // Buckets are floored independently after scaling, so their sum may
        // drift from total_points by at most (buckets - 1).
        let receipt_points = (receipt_points * multiplier).floor() as u64;
        let streak_points = (streak_points * multiplier).floor() as u64;
        let weekly_points = (weekly_points * multiplier).floor() as u64;
        let referral_points = (referral_points * multiplier).floor() as u64;

        let rate = self.config.points_to_usd;
        let total_usd = Decimal::from(total_points) * rate;

        Ok(ProgramEarnings {
            program: ProgramId::Crinkl,
            total_points,
            total_usd,
            monthly_usd: total_usd / Decimal::from(input.years as u64 * 12),
            yearly_usd: total_usd / Decimal::from(input.years),
            total_receipts,
            receipt_points,
            receipt_usd: Decimal::from(receipt_points) * rate,
            receipt_rate_capped,
            streak_days,
            streak_points,
            qualifying_weeks,
            weekly_points,
            referral_count: input.referral_count,
            referral_points,
            referral_usd: Decimal::from(referral_points) * rate,
            holdings_multiplier: multiplier,
            holdings_tier: tier.label.clone(),
        })
    }
}

/// Streak earnings before the holdings multiplier: (effective streak days,
/// raw points).
fn streak_earnings(input: &UsageInput, rules: &StreakRules) -> (u64, f64) {
    let consistency = input.streak_consistency;
    let effective_days = (input.total_days() as f64 * consistency).floor() as u64;

    if consistency == 0.0 {
        return (effective_days, 0.0);
    }

    if consistency >= NEAR_PERFECT_CONSISTENCY {
        let cycles_per_year = (365.0 / rules.cycle_days as f64).ceil();
        let total_cycles = cycles_per_year * input.years as f64;
        return (effective_days, total_cycles * rules.cycle_cap);
    }

    // Average run length between breaks, capped at one full cycle.
    let avg_days_between_breaks = (1.0 / (1.0 - consistency)).floor().max(1.0);
    let avg_streak_len = avg_days_between_breaks.min(rules.cycle_days as f64) as u64;

    let full_cycles = effective_days / avg_streak_len;
    let points_per_cycle = (avg_streak_len as f64 * rules.points_per_day).min(rules.cycle_cap);
    let remaining_days = effective_days % avg_streak_len;

    let points = full_cycles as f64 * points_per_cycle
        + (remaining_days as f64 * rules.points_per_day).min(rules.cycle_cap);
    (effective_days, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpendCategory;

    fn calculator() -> CrinklCalculator {
        CrinklCalculator::new(ProgramConfig::crinkl()).unwrap()
    }

    fn base_input() -> UsageInput {
        UsageInput {
            years: 1,
            receipts_per_day: 10,
            category: SpendCategory::Standard,
            holdings_amount: 0,
            referral_count: 0,
            streak_consistency: 0.0,
        }
    }

    #[test]
    fn test_worked_example_standard_year() {
        let earnings = calculator().project(&base_input()).unwrap();

        assert_eq!(earnings.total_receipts, 3650);
        assert!(!earnings.receipt_rate_capped);
        assert_eq!(earnings.receipt_points, 365_000);
        assert_eq!(earnings.qualifying_weeks, 52);
        assert_eq!(earnings.weekly_points, 26_000);
        assert_eq!(earnings.streak_points, 0);
        assert_eq!(earnings.total_points, 391_000);
        assert_eq!(earnings.total_usd, Decimal::new(39100, 2));
    }

    #[test]
    fn test_zero_consistency_earns_no_streak_points() {
        let mut input = base_input();
        input.streak_consistency = 0.0;
        input.referral_count = 5;
        input.holdings_amount = 7500;

        let earnings = calculator().project(&input).unwrap();
        assert_eq!(earnings.streak_points, 0);
    }

    #[test]
    fn test_zero_holdings_is_base_tier() {
        let earnings = calculator().project(&base_input()).unwrap();
        assert_eq!(earnings.holdings_multiplier, 1.0);
        assert_eq!(earnings.holdings_tier, "Base rate");
    }

    #[test]
    fn test_midrange_streak_approximation() {
        // 50% consistency: runs of 2 days, 182 effective days, 91 cycles of
        // 20 points, no remainder.
        let mut input = base_input();
        input.streak_consistency = 0.5;

        let earnings = calculator().project(&input).unwrap();
        assert_eq!(earnings.streak_days, 182);
        assert_eq!(earnings.streak_points, 1820);
    }

    #[test]
    fn test_near_perfect_streak_heuristic() {
        // ceil(365 / 50) = 8 cycles per year at the 500-point cap.
        let mut input = base_input();
        input.streak_consistency = 1.0;

        let earnings = calculator().project(&input).unwrap();
        assert_eq!(earnings.streak_days, 365);
        assert_eq!(earnings.streak_points, 4000);
    }

    #[test]
    fn test_heuristic_boundary_is_inclusive() {
        let mut at_boundary = base_input();
        at_boundary.streak_consistency = 0.95;
        let mut below_boundary = base_input();
        below_boundary.streak_consistency = 0.94;

        let at = calculator().project(&at_boundary).unwrap();
        let below = calculator().project(&below_boundary).unwrap();

        assert_eq!(at.streak_points, 4000);
        // Below the boundary the average-run approximation applies instead:
        // runs of 1/(1-0.94) -> 16 days, 343 effective days.
        assert_eq!(below.streak_days, 343);
        assert_eq!(below.streak_points, 21 * 160 + 70);
    }

    #[test]
    fn test_daily_cap_applies_before_extrapolation() {
        let mut input = base_input();
        input.receipts_per_day = 25;

        let earnings = calculator().project(&input).unwrap();
        assert!(earnings.receipt_rate_capped);
        assert_eq!(earnings.total_receipts, 3650);
    }

    #[test]
    fn test_weekly_bonus_checks_uncapped_rate() {
        // One receipt per day misses the 10-per-week threshold.
        let mut input = base_input();
        input.receipts_per_day = 1;

        let earnings = calculator().project(&input).unwrap();
        assert_eq!(earnings.qualifying_weeks, 0);
        assert_eq!(earnings.weekly_points, 0);

        // Two per day (14 per week) qualifies even though the daily cap
        // never binds.
        input.receipts_per_day = 2;
        let earnings = calculator().project(&input).unwrap();
        assert_eq!(earnings.qualifying_weeks, 52);
    }

    #[test]
    fn test_holdings_multiplier_scales_and_floors() {
        let mut input = base_input();
        input.holdings_amount = 7500;

        let earnings = calculator().project(&input).unwrap();
        assert_eq!(earnings.holdings_multiplier, 1.5);
        assert_eq!(earnings.holdings_tier, "5,001 - 10,000 tier");
        assert_eq!(earnings.total_points, 586_500);
        assert_eq!(earnings.total_usd, Decimal::new(58650, 2));
    }

    #[test]
    fn test_category_multiplier_applies_to_receipts_only() {
        let mut input = base_input();
        input.category = SpendCategory::Groceries;

        let earnings = calculator().project(&input).unwrap();
        assert_eq!(earnings.receipt_points, 1_095_000);
        assert_eq!(earnings.weekly_points, 26_000);
    }

    #[test]
    fn test_missing_category_is_rejected() {
        let mut config = ProgramConfig::crinkl();
        config
            .categories
            .as_mut()
            .unwrap()
            .remove(&SpendCategory::Coffee);
        let calculator = CrinklCalculator::new(config).unwrap();

        let mut input = base_input();
        input.category = SpendCategory::Coffee;

        match calculator.project(&input) {
            Err(RewardsError::InvalidCategory { category, .. }) => {
                assert_eq!(category, SpendCategory::Coffee);
            }
            Err(other) => panic!("expected InvalidCategory, got {}", other),
            Ok(_) => panic!("expected InvalidCategory, got a result"),
        }
    }

    #[test]
    fn test_constructor_rejects_flat_config() {
        assert!(CrinklCalculator::new(ProgramConfig::fetch()).is_err());
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut input = base_input();
        input.years = 0;
        assert!(calculator().project(&input).is_err());
    }
}
