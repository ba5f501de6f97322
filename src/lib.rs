//! # Connect Four AI
//!
//! Connect Four with an alpha-beta minimax opponent. The search mutates a
//! single board in place, undoing each trial move on the way back up, and
//! scores the horizon with a windowed line evaluator.
//!
//! ## Modules
//!
//! - [`game`]: Board with gravity, win detection, game session and tally
//! - [`ai`]: Heuristic, alpha-beta search, difficulty tiers, agents
//! - [`ui`]: Terminal UI for human vs human or human vs computer play
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
