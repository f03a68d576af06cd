//! Core Module - infrastructure shared by every endpoint
//!
//! - Configuration
//! - Error handling
//! - Display formatting
//! - Application state

pub mod config;
pub mod error;
pub mod format;
pub mod state;

pub use config::Config;
pub use error::{AppError, store_unavailable};
pub use state::AppState;
