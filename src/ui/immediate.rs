//! Immediate-mode drawing surface used by windows.
//!
//! A window describes its whole contents every frame by calling into [`Ui`].
//! Widgets are identified by their label; everything after `##` in a label is
//! identity only and never displayed, so `"TextEdit Window##3"` shows as
//! `TextEdit Window` while staying distinct from `"TextEdit Window##4"`.

use crate::app::domain::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Options for [`Ui::begin_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFlags {
    /// Shrink or grow the window to fit its contents every frame.
    pub always_auto_resize: bool,
}

impl WindowFlags {
    pub const NONE: Self = Self {
        always_auto_resize: false,
    };
    pub const ALWAYS_AUTO_RESIZE: Self = Self {
        always_auto_resize: true,
    };
}

pub trait Ui {
    /// Start describing the window `label`. Returns false if it is hidden or
    /// collapsed; `end_window` must be called either way.
    ///
    /// When `open` is given the window gets a close control, and closing it
    /// sets `*open = false`.
    fn begin_window(&mut self, label: &str, open: Option<&mut bool>, flags: WindowFlags) -> bool;

    fn end_window(&mut self);

    /// Returns true on the frame the button was clicked.
    fn button(&mut self, label: &str) -> bool;

    /// Place the next widget on the same row as the previous one.
    fn same_line(&mut self);

    fn text(&mut self, text: &str);

    /// Single-line field bound to `buffer`. Returns true if the user edited it.
    fn input_text(&mut self, id: &str, buffer: &mut TextBuffer) -> bool;

    /// Multi-line field bound to `buffer`. Negative size components fill the
    /// window minus that margin.
    fn input_text_multiline(&mut self, id: &str, buffer: &mut TextBuffer, size: Vec2) -> bool;

    /// Resize the current window.
    fn set_window_size(&mut self, size: Vec2);
}

/// Split `label` into its displayed part and its identity suffix.
pub fn split_label(label: &str) -> (&str, &str) {
    match label.find("##") {
        Some(idx) => (&label[..idx], &label[idx + 2..]),
        None => (label, ""),
    }
}

/// The part of `label` that is shown to the user.
pub fn display_label(label: &str) -> &str {
    split_label(label).0
}

/// Resolve a requested extent against the space available: positive values
/// are taken as-is, zero means "use the default", negative values mean "fill
/// the available space minus that margin".
pub fn resolve_extent(requested: f32, available: i32, default: i32) -> i32 {
    if requested > 0.0 {
        requested.round() as i32
    } else if requested < 0.0 {
        (available + requested.round() as i32).max(1)
    } else {
        default
    }
}
