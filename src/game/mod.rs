//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! An external agent drives it one relative action at a time and reads back a
//! reward; frontends only ever see the state through a shared reference.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{BLOCK_SIZE, GameConfig, SPEED};
pub use engine::{SnakeGameAI, StepInfo, StepResult};
pub use error::GameError;
pub use state::{CollisionType, GameState, Point, Snake};
