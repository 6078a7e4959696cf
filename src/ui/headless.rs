//! Scripted [`Ui`] for driving windows without a display.
//!
//! Tests queue clicks and typed text, run a frame, then inspect the recorded
//! calls.

use std::collections::{HashMap, HashSet};

use crate::app::domain::TextBuffer;

use super::immediate::{Ui, Vec2, WindowFlags, display_label};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    BeginWindow { label: String, flags: WindowFlags },
    EndWindow,
    Button(String),
    SameLine,
    Text(String),
    InputText { id: String, multiline: bool },
    SetWindowSize(Vec2),
}

#[derive(Debug, Default)]
pub struct HeadlessUi {
    pub events: Vec<UiEvent>,
    /// (window title or None for any window, button label)
    clicks: Vec<(Option<String>, String)>,
    typed: HashMap<String, String>,
    collapsed: HashSet<String>,
    close_requests: HashSet<String>,
    window_stack: Vec<String>,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the calls recorded so far.
    pub fn new_frame(&mut self) {
        self.events.clear();
    }

    /// Click the first button labelled `label` on the next frame.
    pub fn click(&mut self, label: &str) {
        self.clicks.push((None, label.to_string()));
    }

    /// Click `label` inside the window whose full label is `window`.
    pub fn click_in(&mut self, window: &str, label: &str) {
        self.clicks.push((Some(window.to_string()), label.to_string()));
    }

    /// Replace the contents of input `id` as if the user typed it.
    pub fn type_text(&mut self, id: &str, text: &str) {
        self.typed.insert(id.to_string(), text.to_string());
    }

    /// Report the window as collapsed: `begin_window` returns false.
    pub fn collapse(&mut self, window: &str) {
        self.collapsed.insert(window.to_string());
    }

    /// Press the close control of `window` on the next frame.
    pub fn request_close(&mut self, window: &str) {
        self.close_requests.insert(window.to_string());
    }

    pub fn buttons(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Button(label) => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn window_sizes(&self) -> Vec<Vec2> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::SetWindowSize(size) => Some(*size),
                _ => None,
            })
            .collect()
    }

    pub fn begun_windows(&self) -> Vec<(&str, WindowFlags)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::BeginWindow { label, flags } => Some((label.as_str(), *flags)),
                _ => None,
            })
            .collect()
    }

    pub fn inputs(&self) -> Vec<(&str, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::InputText { id, multiline } => Some((id.as_str(), *multiline)),
                _ => None,
            })
            .collect()
    }

    fn take_typed(&mut self, id: &str, buffer: &mut TextBuffer) -> bool {
        match self.typed.remove(id) {
            Some(text) => buffer.write(&text),
            None => false,
        }
    }
}

impl Ui for HeadlessUi {
    fn begin_window(&mut self, label: &str, open: Option<&mut bool>, flags: WindowFlags) -> bool {
        self.events.push(UiEvent::BeginWindow {
            label: label.to_string(),
            flags,
        });
        self.window_stack.push(label.to_string());

        if self.close_requests.remove(label) {
            if let Some(open) = open {
                *open = false;
                return false;
            }
        }
        !self.collapsed.contains(label)
    }

    fn end_window(&mut self) {
        self.events.push(UiEvent::EndWindow);
        self.window_stack.pop();
    }

    fn button(&mut self, label: &str) -> bool {
        self.events.push(UiEvent::Button(display_label(label).to_string()));
        let current = self.window_stack.last().cloned();
        let hit = self.clicks.iter().position(|(window, wanted)| {
            wanted == label && (window.is_none() || *window == current)
        });
        match hit {
            Some(idx) => {
                self.clicks.remove(idx);
                true
            }
            None => false,
        }
    }

    fn same_line(&mut self) {
        self.events.push(UiEvent::SameLine);
    }

    fn text(&mut self, text: &str) {
        self.events.push(UiEvent::Text(text.to_string()));
    }

    fn input_text(&mut self, id: &str, buffer: &mut TextBuffer) -> bool {
        self.events.push(UiEvent::InputText {
            id: id.to_string(),
            multiline: false,
        });
        self.take_typed(id, buffer)
    }

    fn input_text_multiline(&mut self, id: &str, buffer: &mut TextBuffer, _size: Vec2) -> bool {
        self.events.push(UiEvent::InputText {
            id: id.to_string(),
            multiline: true,
        });
        self.take_typed(id, buffer)
    }

    fn set_window_size(&mut self, size: Vec2) {
        self.events.push(UiEvent::SetWindowSize(size));
    }
}

mod tests {
    use super::*;

    #[test]
    fn test_close_request_clears_open_flag() {
        let mut ui = HeadlessUi::new();
        ui.request_close("W##1");
        let mut open = true;
        assert!(!ui.begin_window("W##1", Some(&mut open), WindowFlags::NONE));
        ui.end_window();
        assert!(!open);
    }

    #[test]
    fn test_close_request_ignored_without_open_flag() {
        let mut ui = HeadlessUi::new();
        ui.request_close("W##1");
        assert!(ui.begin_window("W##1", None, WindowFlags::NONE));
        ui.end_window();
    }

    #[test]
    fn test_click_scoped_to_window() {
        let mut ui = HeadlessUi::new();
        ui.click_in("B##2", "Go");

        ui.begin_window("A##1", None, WindowFlags::NONE);
        assert!(!ui.button("Go"));
        ui.end_window();

        ui.begin_window("B##2", None, WindowFlags::NONE);
        assert!(ui.button("Go"));
        assert!(!ui.button("Go"));
        ui.end_window();
    }

    #[test]
    fn test_typed_text_consumed_once() {
        let mut ui = HeadlessUi::new();
        let mut buffer = TextBuffer::new("");
        ui.type_text("##in", "abc");
        assert!(ui.input_text("##in", &mut buffer));
        assert!(!ui.input_text("##in", &mut buffer));
        assert_eq!(buffer.as_str(), "abc");
    }
}
