use crate::models::SpendCategory;
use crate::programs::ProgramId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewardsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("category '{category}' is not in the {program} multiplier table")]
    InvalidCategory {
        program: ProgramId,
        category: SpendCategory,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RewardsError>;
