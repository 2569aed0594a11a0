//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod bind;
mod chain;

pub use bind::Bind;
pub use chain::Chain;
