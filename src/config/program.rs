use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::SpendCategory;

/// Receipt caps a program enforces. Crinkl caps per day, the flat-rate
/// programs per week; a program may declare both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReceiptLimits {
    pub per_day: Option<u32>,
    pub per_week: Option<u32>,
}

/// One step of an ascending holdings schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingsTier {
    /// Inclusive upper bound; `None` marks the unbounded top tier.
    pub max: Option<u64>,
    pub multiplier: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakRules {
    pub points_per_day: f64,
    /// Most points a single streak cycle can pay out.
    pub cycle_cap: f64,
    /// Days in a full streak cycle.
    pub cycle_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyBonusRule {
    /// Minimum receipts per week to qualify, checked against the raw
    /// (uncapped) scanning rate.
    pub min_receipts_per_week: u32,
    pub points: f64,
}

/// Static rules for one reward program. The optional tables double as
/// capability flags: a feature exists exactly when its table is present, so a
/// flag and a table can never disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    pub name: String,
    pub points_per_receipt: f64,
    pub points_to_usd: Decimal,
    pub referral_points: f64,
    pub limits: ReceiptLimits,
    pub categories: Option<HashMap<SpendCategory, f64>>,
    pub holdings: Option<Vec<HoldingsTier>>,
    pub streaks: Option<StreakRules>,
    pub weekly_bonus: Option<WeeklyBonusRule>,
}

impl ProgramConfig {
    pub fn has_categories(&self) -> bool {
        self.categories.is_some()
    }

    pub fn has_holdings(&self) -> bool {
        self.holdings.is_some()
    }

    pub fn has_streaks(&self) -> bool {
        self.streaks.is_some()
    }

    pub fn has_weekly_bonus(&self) -> bool {
        self.weekly_bonus.is_some()
    }

    pub fn category_multiplier(&self, category: SpendCategory) -> Option<f64> {
        self.categories.as_ref()?.get(&category).copied()
    }

    /// First ascending tier whose bound admits `amount` (bounds inclusive).
    pub fn holdings_tier(&self, amount: u64) -> Option<&HoldingsTier> {
        self.holdings
            .as_ref()?
            .iter()
            .find(|tier| tier.max.map_or(true, |max| amount <= max))
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.points_per_receipt < 0.0 {
            return Err(format!("{}: points per receipt must be non-negative", self.name));
        }
        if self.points_to_usd < Decimal::ZERO {
            return Err(format!("{}: points-to-USD rate must be non-negative", self.name));
        }
        if self.referral_points < 0.0 {
            return Err(format!("{}: referral points must be non-negative", self.name));
        }
        if self.limits.per_day.is_none() && self.limits.per_week.is_none() {
            return Err(format!("{}: at least one receipt cap is required", self.name));
        }

        if let Some(tiers) = &self.holdings {
            if tiers.is_empty() {
                return Err(format!("{}: holdings schedule must not be empty", self.name));
            }
            let mut previous: Option<u64> = None;
            for (i, tier) in tiers.iter().enumerate() {
                match (tier.max, i == tiers.len() - 1) {
                    (None, false) => {
                        return Err(format!(
                            "{}: only the last holdings tier may be unbounded",
                            self.name
                        ));
                    }
                    (Some(max), _) => {
                        if previous.map_or(false, |prev| max <= prev) {
                            return Err(format!(
                                "{}: holdings tiers must have ascending bounds",
                                self.name
                            ));
                        }
                        previous = Some(max);
                    }
                    (None, true) => {}
                }
                if tier.multiplier <= 0.0 {
                    return Err(format!(
                        "{}: holdings multipliers must be positive",
                        self.name
                    ));
                }
            }
            if tiers.last().map_or(false, |tier| tier.max.is_some()) {
                return Err(format!(
                    "{}: the last holdings tier must be unbounded",
                    self.name
                ));
            }
        }

        if let Some(streaks) = &self.streaks {
            if streaks.cycle_days == 0 {
                return Err(format!("{}: streak cycle length must be positive", self.name));
            }
            if streaks.points_per_day < 0.0 || streaks.cycle_cap < 0.0 {
                return Err(format!("{}: streak rates must be non-negative", self.name));
            }
        }

        if let Some(categories) = &self.categories {
            if categories.values().any(|m| *m < 0.0) {
                return Err(format!(
                    "{}: category multipliers must be non-negative",
                    self.name
                ));
            }
        }

        Ok(())
    }

    /// Crinkl: the full ruleset. 100 points per receipt, category and
    /// holdings multipliers, streak cycles, weekly bonus, 10 receipts/day cap.
    pub fn crinkl() -> Self {
        Self {
            name: "Crinkl".to_string(),
            points_per_receipt: 100.0,
            // 100 points = $0.10
            points_to_usd: Decimal::new(1, 3),
            referral_points: 500.0,
            limits: ReceiptLimits {
                per_day: Some(10),
                per_week: Some(70),
            },
            categories: Some(HashMap::from([
                (SpendCategory::Mixed, 1.75),
                (SpendCategory::Groceries, 3.0),
                (SpendCategory::Restaurants, 3.0),
                (SpendCategory::Coffee, 2.0),
                (SpendCategory::Apparel, 1.5),
                (SpendCategory::Standard, 1.0),
            ])),
            holdings: Some(vec![
                HoldingsTier {
                    max: Some(1000),
                    multiplier: 1.0,
                    label: "Base rate".to_string(),
                },
                HoldingsTier {
                    max: Some(5000),
                    multiplier: 1.25,
                    label: "1,001 - 5,000 tier".to_string(),
                },
                HoldingsTier {
                    max: Some(10000),
                    multiplier: 1.5,
                    label: "5,001 - 10,000 tier".to_string(),
                },
                HoldingsTier {
                    max: None,
                    multiplier: 2.0,
                    label: "10,001+ tier".to_string(),
                },
            ]),
            streaks: Some(StreakRules {
                points_per_day: 10.0,
                cycle_cap: 500.0,
                cycle_days: 50,
            }),
            weekly_bonus: Some(WeeklyBonusRule {
                min_receipts_per_week: 10,
                points: 500.0,
            }),
        }
    }

    /// Fetch Rewards: flat 25 points per receipt, 35 receipts/week cap.
    pub fn fetch() -> Self {
        Self {
            name: "Fetch Rewards".to_string(),
            points_per_receipt: 25.0,
            // 1000 points = $1
            points_to_usd: Decimal::new(1, 3),
            referral_points: 1000.0,
            limits: ReceiptLimits {
                per_day: None,
                per_week: Some(35),
            },
            categories: None,
            holdings: None,
            streaks: None,
            weekly_bonus: None,
        }
    }

    /// ReceiptPal: flat 25 points per receipt, 12 receipts/week cap.
    pub fn receiptpal() -> Self {
        Self {
            name: "ReceiptPal".to_string(),
            points_per_receipt: 25.0,
            // 2200 points = $5
            points_to_usd: Decimal::new(227, 5),
            referral_points: 250.0,
            limits: ReceiptLimits {
                per_day: None,
                per_week: Some(12),
            },
            categories: None,
            holdings: None,
            streaks: None,
            weekly_bonus: None,
        }
    }
}
