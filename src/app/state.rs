use std::rc::Rc;

use crate::app::domain::{AppSettings, Message};
use crate::app::window_manager::{WindowId, WindowManager};
use crate::windows::TextEditWindow;

/// Main application coordinator: turns host messages into window manager
/// calls and keeps the state the main window displays.
pub struct AppState {
    pub manager: WindowManager,
    pub settings: AppSettings,
    note: String,
    notify: Rc<dyn Fn(Message)>,
    running: bool,
}

impl AppState {
    /// `notify` feeds messages back into the host loop; save callbacks of
    /// spawned windows go through it.
    pub fn new(manager: WindowManager, settings: AppSettings, notify: impl Fn(Message) + 'static) -> Self {
        Self {
            manager,
            settings,
            note: String::new(),
            notify: Rc::new(notify),
            running: true,
        }
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle(&mut self, msg: Message) {
        tracing::debug!("Handling {msg:?}");
        match msg {
            Message::EditNote => {
                self.edit_note();
            }
            Message::OpenWindow(name) => {
                if let Err(e) = self.manager.open_by_name(name) {
                    tracing::warn!("Cannot open window: {e}");
                }
            }
            Message::NoteSaved(text) => {
                tracing::info!("Note updated ({} bytes)", text.len());
                self.note = text;
            }
            Message::FileQuit | Message::WindowClose => {
                self.manager.close_all();
                self.running = false;
            }
        }
    }

    /// Open a TextEdit Window on the current note; confirming it sends
    /// `NoteSaved` back through the host loop.
    pub fn edit_note(&mut self) -> WindowId {
        let notify = self.notify.clone();
        let window = TextEditWindow::new(&self.note, move |text| notify(Message::NoteSaved(text)));
        self.manager.spawn(window)
    }
}
