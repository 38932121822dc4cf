pub mod program;
pub mod settings;

pub use program::{HoldingsTier, ProgramConfig, ReceiptLimits, StreakRules, WeeklyBonusRule};
pub use settings::{AppSettings, ProgramCatalog, Settings};
