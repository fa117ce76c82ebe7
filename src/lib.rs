//! Snake AI - a grid Snake simulation for reinforcement-learning agents
//!
//! This library provides:
//! - Core simulation with a relative-action step/reward API (game module)
//! - Agent-facing environment with tensor observations (rl module)
//! - Scripted drivers for demos and smoke runs (policy module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Execution modes (human, watch, headless)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod policy;
pub mod render;
pub mod rl;
