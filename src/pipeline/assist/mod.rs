pub mod orchestrator;
pub mod prompt;
pub mod validate;

pub use orchestrator::*;
pub use prompt::*;
pub use validate::*;
