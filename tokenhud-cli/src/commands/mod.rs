//! CLI command implementations.

pub mod hud;
pub mod path;
pub mod set;
pub mod show;
