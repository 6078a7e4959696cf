//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - The NUL-terminated text buffer edited by input widgets
//! - Application settings
//! - Message types for the event system

pub mod messages;
pub mod settings;
pub mod text_buffer;

pub use messages::Message;
pub use settings::AppSettings;
pub use text_buffer::TextBuffer;
