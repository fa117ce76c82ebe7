//! Keyboard input mapping for the terminal frontends

pub mod handler;

pub use handler::{InputHandler, KeyAction};
