pub mod config;
pub mod evaluator;
pub mod models;
pub mod programs;

pub use config::{ProgramConfig, Settings};
pub use evaluator::Evaluator;
pub use models::{
    ComparisonReport, ProgramEarnings, RankedProgram, Result, RewardsError, SpendCategory,
    UsageInput,
};
pub use programs::ProgramId;

// Re-export commonly used types
pub use rust_decimal::Decimal;
