//! Dashboard layer for Shorecrew: the controller that owns application
//! state, the render layer that projects it into text fragments, and the
//! command wiring that connects user input to state-mutating handlers.

pub mod command;
pub mod controller;
pub mod counter;
pub mod render;
pub mod state;

pub use command::{Command, ParseError};
pub use controller::Controller;
pub use state::AppState;
