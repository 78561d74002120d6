pub mod assist;
pub mod extraction;
pub mod generation;
