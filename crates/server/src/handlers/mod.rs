//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `autoseo-server`.
//! The handlers are split into sub-modules by the content they act on.

pub mod general;
pub mod media;
pub mod posts;
pub mod settings;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use general::*;
pub use media::*;
pub use posts::*;
pub use settings::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
