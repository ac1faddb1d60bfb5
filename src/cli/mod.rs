//! CLI infrastructure for the hexapawn simulator
//!
//! This module provides the command-line interface for running self-play
//! training and for watching episodes turn by turn.

pub mod commands;
pub mod config;
pub mod output;
