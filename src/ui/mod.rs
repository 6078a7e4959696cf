pub mod fltk_backend;
#[cfg(test)]
pub mod headless;
pub mod immediate;
pub mod main_window;
pub mod menu;

pub use fltk_backend::FltkUi;
pub use immediate::{Ui, Vec2, WindowFlags};
