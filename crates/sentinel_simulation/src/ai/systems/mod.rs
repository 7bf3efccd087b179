//! AI systems (ECS обвязка над controller / selector)

pub mod fsm;
pub mod init;
pub mod reactions;

// Re-export all systems
pub use fsm::*;
pub use init::*;
pub use reactions::*;
