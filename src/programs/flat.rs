use rust_decimal::Decimal;

use crate::config::ProgramConfig;
use crate::models::{ProgramEarnings, Result, RewardsError, UsageInput};
use crate::programs::ProgramId;

/// Flat-rate programs (Fetch Rewards, ReceiptPal): a weekly receipt cap, a
/// constant per-receipt rate, and referral bonuses. No categories, streaks,
/// weekly bonuses or holdings; those report neutral values.
pub struct FlatRateCalculator {
    program: ProgramId,
    config: ProgramConfig,
}

impl FlatRateCalculator {
    pub fn new(program: ProgramId, config: ProgramConfig) -> Result<Self> {
        if config.limits.per_week.is_none() {
            return Err(RewardsError::Config(format!(
                "{} requires a per-week receipt cap",
                config.name
            )));
        }
        Ok(Self { program, config })
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    pub fn project(&self, input: &UsageInput) -> Result<ProgramEarnings> {
        input.validate()?;

        let weekly_cap = self.config.limits.per_week.ok_or_else(|| {
            RewardsError::Config(format!("{} requires a per-week receipt cap", self.config.name))
        })? as u64;

        // Cap the weekly rate before extrapolating over the horizon.
        let raw_weekly_rate = input.receipts_per_day as u64 * 7;
        let weekly_rate = raw_weekly_rate.min(weekly_cap);
        let total_receipts = weekly_rate * input.total_weeks();
        let receipt_rate_capped = raw_weekly_rate > weekly_cap;

        let receipt_points = (total_receipts as f64 * self.config.points_per_receipt).floor() as u64;
        let referral_points =
            (input.referral_count as f64 * self.config.referral_points).floor() as u64;
        let total_points = receipt_points + referral_points;

        let rate = self.config.points_to_usd;
        let total_usd = Decimal::from(total_points) * rate;

        Ok(ProgramEarnings {
            program: self.program,
            total_points,
            total_usd,
            monthly_usd: total_usd / Decimal::from(input.years as u64 * 12),
            yearly_usd: total_usd / Decimal::from(input.years),
            total_receipts,
            receipt_points,
            receipt_usd: Decimal::from(receipt_points) * rate,
            receipt_rate_capped,
            streak_days: 0,
            streak_points: 0,
            qualifying_weeks: 0,
            weekly_points: 0,
            referral_count: input.referral_count,
            referral_points,
            referral_usd: Decimal::from(referral_points) * rate,
            holdings_multiplier: 1.0,
            holdings_tier: "N/A".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch() -> FlatRateCalculator {
        FlatRateCalculator::new(ProgramId::Fetch, ProgramConfig::fetch()).unwrap()
    }

    fn receiptpal() -> FlatRateCalculator {
        FlatRateCalculator::new(ProgramId::ReceiptPal, ProgramConfig::receiptpal()).unwrap()
    }

    fn base_input() -> UsageInput {
        UsageInput {
            years: 1,
            receipts_per_day: 10,
            ..UsageInput::default()
        }
    }

    #[test]
    fn test_fetch_worked_example() {
        let earnings = fetch().project(&base_input()).unwrap();

        assert!(earnings.receipt_rate_capped);
        assert_eq!(earnings.total_receipts, 1820);
        assert_eq!(earnings.receipt_points, 45_500);
        assert_eq!(earnings.total_points, 45_500);
        assert_eq!(earnings.total_usd, Decimal::new(4550, 2));
    }

    #[test]
    fn test_receiptpal_worked_example() {
        let mut input = base_input();
        input.referral_count = 1;

        let earnings = receiptpal().project(&input).unwrap();

        assert!(earnings.receipt_rate_capped);
        assert_eq!(earnings.total_receipts, 624);
        assert_eq!(earnings.receipt_points, 15_600);
        assert_eq!(earnings.referral_points, 250);
        assert_eq!(earnings.total_points, 15_850);
        assert_eq!(earnings.total_usd, Decimal::new(359_795, 4));
    }

    #[test]
    fn test_cap_boundary_is_exclusive() {
        // 5 per day is exactly Fetch's 35-per-week cap: capped stays false.
        let mut input = base_input();
        input.receipts_per_day = 5;

        let earnings = fetch().project(&input).unwrap();
        assert!(!earnings.receipt_rate_capped);
        assert_eq!(earnings.total_receipts, 1820);
    }

    #[test]
    fn test_unsupported_features_report_neutral_values() {
        let mut input = base_input();
        input.streak_consistency = 0.9;
        input.holdings_amount = 9000;

        let earnings = fetch().project(&input).unwrap();
        assert_eq!(earnings.streak_days, 0);
        assert_eq!(earnings.streak_points, 0);
        assert_eq!(earnings.qualifying_weeks, 0);
        assert_eq!(earnings.weekly_points, 0);
        assert_eq!(earnings.holdings_multiplier, 1.0);
        assert_eq!(earnings.holdings_tier, "N/A");
    }

    #[test]
    fn test_receipts_never_exceed_cap_times_weeks() {
        for receipts_per_day in 0..30 {
            for years in 1..4 {
                let input = UsageInput {
                    years,
                    receipts_per_day,
                    ..UsageInput::default()
                };
                let earnings = receiptpal().project(&input).unwrap();
                assert!(earnings.total_receipts <= 12 * 52 * years as u64);
                assert_eq!(
                    earnings.receipt_rate_capped,
                    receipts_per_day as u64 * 7 > 12
                );
            }
        }
    }

    #[test]
    fn test_constructor_requires_weekly_cap() {
        let mut config = ProgramConfig::fetch();
        config.limits.per_week = None;
        assert!(FlatRateCalculator::new(ProgramId::Fetch, config).is_err());
    }
}
