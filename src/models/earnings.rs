use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::programs::ProgramId;

/// Projected earnings for one program over the full input horizon.
///
/// Recomputed in full on every evaluation; never persisted. Programs without
/// streaks, weekly bonuses or holdings report the neutral values (zeros,
/// multiplier 1, tier "N/A") rather than omitting the fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramEarnings {
    pub program: ProgramId,
    pub total_points: u64,
    pub total_usd: Decimal,
    pub monthly_usd: Decimal,
    pub yearly_usd: Decimal,

    // Receipt scanning
    pub total_receipts: u64,
    pub receipt_points: u64,
    pub receipt_usd: Decimal,
    /// True when the requested scanning rate exceeded the program's cap.
    pub receipt_rate_capped: bool,

    // Streaks
    pub streak_days: u64,
    pub streak_points: u64,

    // Weekly bonus
    pub qualifying_weeks: u64,
    pub weekly_points: u64,

    // Referrals
    pub referral_count: u32,
    pub referral_points: u64,
    pub referral_usd: Decimal,

    // Holdings
    pub holdings_multiplier: f64,
    pub holdings_tier: String,
}

/// One row of the full cross-program ranking, best earner first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedProgram {
    pub rank: u32,
    pub program: ProgramId,
    pub total_usd: Decimal,
}

/// How the currently selected program stacks up against the best of the
/// remaining programs, plus the full ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub current: ProgramId,
    pub current_usd: Decimal,
    pub best_alternative: ProgramId,
    pub best_alternative_usd: Decimal,
    /// Signed: current minus best alternative. The only amount in the model
    /// allowed to go negative.
    pub difference_usd: Decimal,
    pub ranking: Vec<RankedProgram>,
}

impl ComparisonReport {
    pub fn current_leads(&self) -> bool {
        self.difference_usd >= Decimal::ZERO
    }
}
