//! Common types, traits, and error definitions for grid_astar
//!
//! This module provides the foundational building blocks shared by the
//! map generator, the planner and the renderer.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
