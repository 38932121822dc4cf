pub mod crinkl;
pub mod flat;

pub use crinkl::CrinklCalculator;
pub use flat::FlatRateCalculator;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three competing receipt-reward programs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProgramId {
    Crinkl,
    Fetch,
    ReceiptPal,
}

impl ProgramId {
    /// Declaration order. Doubles as the tie-break order for rankings and
    /// best-alternative searches.
    pub const ALL: [ProgramId; 3] = [ProgramId::Crinkl, ProgramId::Fetch, ProgramId::ReceiptPal];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramId::Crinkl => "crinkl",
            ProgramId::Fetch => "fetch",
            ProgramId::ReceiptPal => "receiptpal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "crinkl" => Some(ProgramId::Crinkl),
            "fetch" => Some(ProgramId::Fetch),
            "receiptpal" | "receipt-pal" => Some(ProgramId::ReceiptPal),
            _ => None,
        }
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_parsing() {
        assert_eq!(ProgramId::from_str("crinkl"), Some(ProgramId::Crinkl));
        assert_eq!(ProgramId::from_str("Fetch"), Some(ProgramId::Fetch));
        assert_eq!(ProgramId::from_str("receipt-pal"), Some(ProgramId::ReceiptPal));
        assert_eq!(ProgramId::from_str("ibotta"), None);
    }

    #[test]
    fn test_declaration_order() {
        assert_eq!(
            ProgramId::ALL,
            [ProgramId::Crinkl, ProgramId::Fetch, ProgramId::ReceiptPal]
        );
    }
}
