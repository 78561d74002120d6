pub mod ai;
pub mod card;

pub use ai::*;
pub use card::*;
