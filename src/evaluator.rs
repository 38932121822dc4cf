use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use crate::config::Settings;
use crate::models::{
    ComparisonReport, ProgramEarnings, RankedProgram, Result, RewardsError, UsageInput,
};
use crate::programs::{CrinklCalculator, FlatRateCalculator, ProgramId};

/// Runs the per-program calculators against one shared input and ranks the
/// results. Holds no state between calls; every input change is a full
/// recompute.
pub struct Evaluator {
    crinkl: CrinklCalculator,
    fetch: FlatRateCalculator,
    receiptpal: FlatRateCalculator,
}

impl Evaluator {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            crinkl: CrinklCalculator::new(settings.programs.crinkl.clone())?,
            fetch: FlatRateCalculator::new(ProgramId::Fetch, settings.programs.fetch.clone())?,
            receiptpal: FlatRateCalculator::new(
                ProgramId::ReceiptPal,
                settings.programs.receiptpal.clone(),
            )?,
        })
    }

    pub fn evaluate(&self, program: ProgramId, input: &UsageInput) -> Result<ProgramEarnings> {
        let earnings = match program {
            ProgramId::Crinkl => self.crinkl.project(input),
            ProgramId::Fetch => self.fetch.project(input),
            ProgramId::ReceiptPal => self.receiptpal.project(input),
        }?;

        debug!(
            program = %program,
            total_points = earnings.total_points,
            total_usd = %earnings.total_usd,
            "Projected earnings"
        );

        Ok(earnings)
    }

    pub fn evaluate_all(&self, input: &UsageInput) -> Result<HashMap<ProgramId, ProgramEarnings>> {
        debug!(
            years = input.years,
            receipts_per_day = input.receipts_per_day,
            "Evaluating all programs"
        );

        let mut results = HashMap::with_capacity(ProgramId::ALL.len());
        for program in ProgramId::ALL {
            results.insert(program, self.evaluate(program, input)?);
        }
        Ok(results)
    }

    /// Ranks every program in `results` and positions `current` against the
    /// best of the rest.
    pub fn compare(
        &self,
        current: ProgramId,
        results: &HashMap<ProgramId, ProgramEarnings>,
    ) -> Result<ComparisonReport> {
        let current_result = results.get(&current).ok_or_else(|| {
            RewardsError::InvalidInput(format!("no evaluation result for {}", current))
        })?;

        // Best alternative: scan the remaining programs in declaration
        // order, first seen wins on exact ties.
        let mut best: Option<(ProgramId, Decimal)> = None;
        for program in ProgramId::ALL {
            if program == current {
                continue;
            }
            let Some(result) = results.get(&program) else {
                continue;
            };
            match best {
                Some((_, best_usd)) if result.total_usd <= best_usd => {}
                _ => best = Some((program, result.total_usd)),
            }
        }
        let (best_alternative, best_alternative_usd) = best.ok_or_else(|| {
            RewardsError::InvalidInput(
                "comparison requires at least one other program result".to_string(),
            )
        })?;

        // Declaration order in, stable sort by earnings out: exact ties keep
        // declaration order.
        let mut ranking: Vec<RankedProgram> = ProgramId::ALL
            .iter()
            .filter_map(|program| results.get(program))
            .map(|result| RankedProgram {
                rank: 0,
                program: result.program,
                total_usd: result.total_usd,
            })
            .collect();
        ranking.sort_by(|a, b| b.total_usd.cmp(&a.total_usd));
        for (position, row) in ranking.iter_mut().enumerate() {
            row.rank = position as u32 + 1;
        }

        Ok(ComparisonReport {
            current,
            current_usd: current_result.total_usd,
            best_alternative,
            best_alternative_usd,
            difference_usd: current_result.total_usd - best_alternative_usd,
            ranking,
        })
    }
}
