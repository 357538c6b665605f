//! `tempocue` - Resistance-training tempo timer
//!
//! This library parses tempo notation such as `3/1/1/0`, runs the
//! four-phase countdown engine, and drives it from a periodic clock.

pub mod cli;
pub mod config;
pub mod diagram;
pub mod driver;
pub mod error;
pub mod observability;
pub mod presets;
pub mod tempo;
