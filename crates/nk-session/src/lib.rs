//! Per-conversation dialog state, threaded through the platform's session attributes.

pub mod state;

pub use state::*;

#[cfg(test)]
mod tests;
