pub mod earnings;
pub mod error;
pub mod input;

pub use earnings::*;
pub use error::*;
pub use input::*;
