use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Result, RewardsError};

/// Purchase-category mix the user mostly scans. Only Crinkl's multiplier
/// table distinguishes categories; the flat-rate programs ignore them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SpendCategory {
    Mixed,
    Groceries,
    Restaurants,
    Coffee,
    Apparel,
    Standard,
}

impl SpendCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpendCategory::Mixed => "mixed",
            SpendCategory::Groceries => "groceries",
            SpendCategory::Restaurants => "restaurants",
            SpendCategory::Coffee => "coffee",
            SpendCategory::Apparel => "apparel",
            SpendCategory::Standard => "standard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mixed" => Some(SpendCategory::Mixed),
            "groceries" => Some(SpendCategory::Groceries),
            "restaurants" => Some(SpendCategory::Restaurants),
            "coffee" => Some(SpendCategory::Coffee),
            "apparel" => Some(SpendCategory::Apparel),
            "standard" => Some(SpendCategory::Standard),
            _ => None,
        }
    }
}

impl fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized usage parameters shared by every program calculator.
///
/// The caller (CLI, UI, whatever drives the core) is responsible for turning
/// raw user input into one of these; the core only checks the preconditions
/// in [`UsageInput::validate`] and never clamps or corrects values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageInput {
    /// Projection horizon in whole years. Must be at least 1.
    pub years: u32,
    /// Raw scanning rate before any program cap is applied.
    pub receipts_per_day: u32,
    pub category: SpendCategory,
    /// Amount held in the program, for holdings-tier multipliers.
    pub holdings_amount: u64,
    pub referral_count: u32,
    /// Fraction of days the user keeps a scanning streak alive, in [0, 1].
    pub streak_consistency: f64,
}

impl Default for UsageInput {
    fn default() -> Self {
        Self {
            years: 1,
            receipts_per_day: 0,
            category: SpendCategory::Standard,
            holdings_amount: 0,
            referral_count: 0,
            streak_consistency: 0.0,
        }
    }
}

impl UsageInput {
    /// Checks the preconditions every calculator relies on. Monthly and
    /// yearly projections divide by the horizon, so `years == 0` is rejected
    /// rather than producing an undefined result.
    pub fn validate(&self) -> Result<()> {
        if self.years == 0 {
            return Err(RewardsError::InvalidInput(
                "years must be at least 1".to_string(),
            ));
        }
        if !self.streak_consistency.is_finite() {
            return Err(RewardsError::InvalidInput(format!(
                "streak consistency must be finite, got {}",
                self.streak_consistency
            )));
        }
        if !(0.0..=1.0).contains(&self.streak_consistency) {
            return Err(RewardsError::InvalidInput(format!(
                "streak consistency must be within [0, 1], got {}",
                self.streak_consistency
            )));
        }
        Ok(())
    }

    pub fn total_days(&self) -> u64 {
        self.years as u64 * 365
    }

    pub fn total_weeks(&self) -> u64 {
        self.years as u64 * 52
    }
}
