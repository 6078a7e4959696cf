//! Window management - the contract between tool windows and the host.
//!
//! A tool window implements [`Window`] and is driven once per frame by the
//! [`WindowManager`]. During `render` it talks to the host only through the
//! [`WindowContext`] it is handed: opening and ending its frame window,
//! drawing through the immediate-mode [`Ui`], and queueing its own deletion.
//! Windows that can be opened by name also implement [`RegisteredWindow`] and
//! are listed in a [`WindowRegistry`].

pub mod manager;
pub mod registry;

use std::fmt;

use crate::ui::immediate::{Ui, WindowFlags};

pub use manager::WindowManager;
pub use registry::{WindowDescriptor, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static description of a window kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMeta {
    /// Stable key used for lookups and settings
    pub name: &'static str,
    /// Menu group the window is listed under
    pub category: &'static str,
    pub title: &'static str,
    /// Open at startup unless settings say otherwise
    pub default_visible: bool,
}

pub trait Window {
    /// Describe the window for this frame.
    fn render(&mut self, ctx: &mut WindowContext<'_>);

    /// Called once at application startup, before the first frame, for
    /// windows that are visible at startup.
    fn pre_start_initialize(&mut self) {}

    /// Called once when the window is handed to the manager.
    fn initialize(&mut self) {}
}

/// A window kind that can be created by name from the registry.
pub trait RegisteredWindow: Window + Default + 'static {
    const META: WindowMeta;
}

/// Per-window bookkeeping owned by the manager.
#[derive(Debug)]
pub(crate) struct WindowState {
    pub(crate) id: WindowId,
    pub(crate) meta: WindowMeta,
    pub(crate) label: String,
    pub(crate) deletion_queued: bool,
}

impl WindowState {
    pub(crate) fn new(id: WindowId, meta: WindowMeta) -> Self {
        Self {
            id,
            meta,
            label: format!("{}##{}", meta.title, id),
            deletion_queued: false,
        }
    }
}

/// What a window may do to its host while rendering.
pub struct WindowContext<'a> {
    state: &'a mut WindowState,
    ui: &'a mut dyn Ui,
}

impl<'a> WindowContext<'a> {
    pub(crate) fn new(state: &'a mut WindowState, ui: &'a mut dyn Ui) -> Self {
        Self { state, ui }
    }

    pub fn id(&self) -> WindowId {
        self.state.id
    }

    pub fn meta(&self) -> &WindowMeta {
        &self.state.meta
    }

    /// Immediate-mode label of this window: the title plus a unique suffix.
    pub fn label(&self) -> &str {
        &self.state.label
    }

    /// Begin this window's frame window. Must be paired with
    /// [`WindowContext::end_window`] whatever it returns.
    pub fn open_window(&mut self, open: Option<&mut bool>, flags: WindowFlags) -> bool {
        self.ui.begin_window(&self.state.label, open, flags)
    }

    pub fn end_window(&mut self) {
        self.ui.end_window();
    }

    /// Ask the host to drop this window once the current frame is done.
    pub fn queue_deletion(&mut self) {
        if !self.state.deletion_queued {
            tracing::debug!("Window {} queued for deletion", self.state.label);
        }
        self.state.deletion_queued = true;
    }

    pub fn is_queued_for_deletion(&self) -> bool {
        self.state.deletion_queued
    }

    pub fn ui(&mut self) -> &mut dyn Ui {
        &mut *self.ui
    }
}
