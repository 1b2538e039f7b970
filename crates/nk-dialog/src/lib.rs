//! Dialog controller: intent dispatch over the accumulated session state.

pub mod controller;
pub mod envelope;
pub mod intent;
pub mod render;

pub use controller::DialogController;
pub use envelope::*;
pub use intent::Intent;
