//! Application layer.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (TextBuffer, Settings, Messages)
//! - `infrastructure/` - External integrations (error)
//! - `window_manager/` - Window trait, registry and per-frame driver
//! - `state.rs` - Main application coordinator

pub mod domain;
pub mod infrastructure;
pub mod state;
pub mod window_manager;

// Re-exports for convenient external access
pub use domain::{AppSettings, Message, TextBuffer};
pub use infrastructure::error::{AppError, Result};
pub use window_manager::{
    RegisteredWindow, Window, WindowContext, WindowId, WindowManager, WindowMeta, WindowRegistry,
};
