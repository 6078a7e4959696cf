use crate::app::domain::AppSettings;
use crate::app::infrastructure::error::{AppError, Result};
use crate::ui::immediate::Ui;

use super::{RegisteredWindow, Window, WindowContext, WindowId, WindowMeta, WindowRegistry, WindowState};

struct ManagedWindow {
    state: WindowState,
    window: Box<dyn Window>,
}

/// Owns the live windows and drives them once per frame.
///
/// Windows never destroy themselves: they queue their deletion from `render`
/// and the manager drops them after every window has rendered for the frame.
pub struct WindowManager {
    registry: WindowRegistry,
    windows: Vec<ManagedWindow>,
    next_id: u64,
}

impl WindowManager {
    pub fn new(registry: WindowRegistry) -> Self {
        Self {
            registry,
            windows: Vec::new(),
            next_id: 1,
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    fn next_window_id(&mut self) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Open every registered window that is visible at startup. Each one gets
    /// `pre_start_initialize` before being spawned.
    pub fn startup(&mut self, settings: &AppSettings) -> Vec<WindowId> {
        let pending: Vec<(WindowMeta, Box<dyn Window>)> = self
            .registry
            .iter()
            .filter(|d| settings.is_visible_at_startup(d.meta.name, d.meta.default_visible))
            .map(|d| (d.meta, d.create()))
            .collect();

        pending
            .into_iter()
            .map(|(meta, mut window)| {
                window.pre_start_initialize();
                self.spawn_boxed(meta, window)
            })
            .collect()
    }

    pub fn spawn<T: RegisteredWindow>(&mut self, window: T) -> WindowId {
        self.spawn_boxed(T::META, Box::new(window))
    }

    pub fn spawn_boxed(&mut self, meta: WindowMeta, mut window: Box<dyn Window>) -> WindowId {
        let id = self.next_window_id();
        window.initialize();
        let state = WindowState::new(id, meta);
        tracing::info!("Opened window {}", state.label);
        self.windows.push(ManagedWindow { state, window });
        id
    }

    /// Open a fresh default instance of a registered window
    pub fn open_by_name(&mut self, name: &str) -> Result<WindowId> {
        let desc = self
            .registry
            .get(name)
            .ok_or_else(|| AppError::UnknownWindow(name.to_string()))?;
        let meta = desc.meta;
        let window = desc.create();
        Ok(self.spawn_boxed(meta, window))
    }

    /// Render every live window once, then drop the ones that queued their
    /// deletion. Returns the ids dropped this frame.
    pub fn render_frame(&mut self, ui: &mut dyn Ui) -> Vec<WindowId> {
        for managed in &mut self.windows {
            let mut ctx = WindowContext::new(&mut managed.state, &mut *ui);
            managed.window.render(&mut ctx);
        }
        self.flush_deletions()
    }

    fn flush_deletions(&mut self) -> Vec<WindowId> {
        let mut removed = Vec::new();
        self.windows.retain(|managed| {
            if managed.state.deletion_queued {
                tracing::info!("Closed window {}", managed.state.label);
                removed.push(managed.state.id);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Queue a window for deletion from outside its render call. Returns
    /// false if no such window is live.
    pub fn close(&mut self, id: WindowId) -> bool {
        match self.windows.iter_mut().find(|m| m.state.id == id) {
            Some(managed) => {
                managed.state.deletion_queued = true;
                true
            }
            None => false,
        }
    }

    /// Queue every live window for deletion.
    pub fn close_all(&mut self) {
        for managed in &mut self.windows {
            managed.state.deletion_queued = true;
        }
    }

    /// Live and not queued for deletion
    pub fn is_open(&self, id: WindowId) -> bool {
        self.windows
            .iter()
            .any(|m| m.state.id == id && !m.state.deletion_queued)
    }

    pub fn meta(&self, id: WindowId) -> Option<&WindowMeta> {
        self.windows
            .iter()
            .find(|m| m.state.id == id)
            .map(|m| &m.state.meta)
    }

    pub fn label(&self, id: WindowId) -> Option<&str> {
        self.windows
            .iter()
            .find(|m| m.state.id == id)
            .map(|m| m.state.label.as_str())
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|m| m.state.id).collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
