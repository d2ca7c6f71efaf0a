//! Game domain: bet selections, drawn outcomes and the pure evaluator.

pub mod evaluator;
pub mod types;
