//! Built-in tool windows.

pub mod icons;
pub mod textedit;

pub use textedit::TextEditWindow;

use crate::app::infrastructure::error::Result;
use crate::app::window_manager::WindowRegistry;

/// Registry holding every built-in window, in menu order.
pub fn default_registry() -> Result<WindowRegistry> {
    let mut registry = WindowRegistry::new();
    registry.register::<TextEditWindow>()?;
    Ok(registry)
}
