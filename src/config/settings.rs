use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ProgramConfig;
use crate::programs::ProgramId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub programs: ProgramCatalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

/// The three competing programs the evaluator knows about. Constants default
/// to the published rates but can be overridden from files or environment,
/// e.g. to model a promotional rate change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramCatalog {
    pub crinkl: ProgramConfig,
    pub fetch: ProgramConfig,
    pub receiptpal: ProgramConfig,
}

impl ProgramCatalog {
    pub fn get(&self, program: ProgramId) -> &ProgramConfig {
        match program {
            ProgramId::Crinkl => &self.crinkl,
            ProgramId::Fetch => &self.fetch,
            ProgramId::ReceiptPal => &self.receiptpal,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Receipt Rewards".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            programs: ProgramCatalog {
                crinkl: ProgramConfig::crinkl(),
                fetch: ProgramConfig::fetch(),
                receiptpal: ProgramConfig::receiptpal(),
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("RECEIPT_REWARDS"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        for program in ProgramId::ALL {
            self.programs.get(program).validate()?;
        }

        // Crinkl's calculator extrapolates from a daily rate; the flat-rate
        // calculators extrapolate from a weekly one.
        if self.programs.crinkl.limits.per_day.is_none() {
            return Err("Crinkl requires a per-day receipt cap".to_string());
        }
        for program in [ProgramId::Fetch, ProgramId::ReceiptPal] {
            if self.programs.get(program).limits.per_week.is_none() {
                return Err(format!("{} requires a per-week receipt cap", program));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_catalog_lookup_matches_program() {
        let settings = Settings::default();
        assert_eq!(settings.programs.get(ProgramId::Crinkl).name, "Crinkl");
        assert_eq!(settings.programs.get(ProgramId::Fetch).name, "Fetch Rewards");
        assert_eq!(settings.programs.get(ProgramId::ReceiptPal).name, "ReceiptPal");
    }

    #[test]
    fn test_validate_rejects_missing_weekly_cap() {
        let mut settings = Settings::default();
        settings.programs.fetch.limits.per_week = None;
        settings.programs.fetch.limits.per_day = Some(5);
        assert!(settings.validate().is_err());
    }
}
