//! AI components

pub mod diagnostics;
pub mod fsm;
pub mod history;
pub mod memory;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod fsm_tests;
#[cfg(test)]
mod history_tests;

// Re-export all components
pub use diagnostics::*;
pub use fsm::*;
pub use history::*;
pub use memory::*;
