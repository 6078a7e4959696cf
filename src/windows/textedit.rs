use crate::app::domain::TextBuffer;
use crate::app::window_manager::{RegisteredWindow, Window, WindowContext, WindowMeta};
use crate::ui::immediate::{Vec2, WindowFlags};

use super::icons;

/// Window size requested when switching to the multi-line editor.
pub const EXPANDED_SIZE: Vec2 = Vec2::new(500.0, 200.0);

/// The multi-line editor fills the window minus this margin.
const MULTILINE_SIZE: Vec2 = Vec2::new(-10.0, -10.0);

const SINGLE_LINE_ID: &str = "##input";
const MULTI_LINE_ID: &str = "##input2";

pub type SaveCallback = Box<dyn FnOnce(String)>;

/// Edit a string in a small window and hand the result back.
///
/// Starts as a single-line field unless the text already spans several lines.
/// Confirming passes the edited text to the save callback and closes the
/// window; cancelling just closes it.
pub struct TextEditWindow {
    text: TextBuffer,
    collapsed: bool,
    on_save: Option<SaveCallback>,
}

impl TextEditWindow {
    pub fn new(input: &str, on_save: impl FnOnce(String) + 'static) -> Self {
        Self {
            text: TextBuffer::new(input),
            collapsed: !input.contains('\n'),
            on_save: Some(Box::new(on_save)),
        }
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.text.capacity()
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.text
    }

    fn save(&mut self) {
        match self.on_save.take() {
            Some(on_save) => {
                let text = self.text.to_string();
                tracing::debug!("TextEdit confirmed ({} bytes)", text.len());
                on_save(text);
            }
            None => tracing::debug!("TextEdit already confirmed; ignoring"),
        }
    }

    fn draw_contents(&mut self, ctx: &mut WindowContext<'_>) {
        let mut confirm = false;
        let mut cancel = false;
        let ui = ctx.ui();

        let toggle = if self.collapsed { icons::FORWARD } else { icons::BACK };
        if ui.button(toggle) {
            self.collapsed = !self.collapsed;
            if !self.collapsed {
                ui.set_window_size(EXPANDED_SIZE);
            }
        }
        ui.same_line();
        if ui.button(icons::CHECK) {
            confirm = true;
        }
        ui.same_line();
        if ui.button(icons::CROSS) {
            cancel = true;
        }
        ui.same_line();
        ui.text(&format!("{}/{}", self.text.len(), self.text.capacity()));

        let edited = if self.collapsed {
            ui.input_text(SINGLE_LINE_ID, &mut self.text)
        } else {
            ui.input_text_multiline(MULTI_LINE_ID, &mut self.text, MULTILINE_SIZE)
        };
        if edited && self.text.grow_if_needed() {
            tracing::debug!("TextEdit buffer grown to {} bytes", self.text.capacity());
        }

        if ctx.is_queued_for_deletion() {
            return;
        }
        if confirm {
            self.save();
            ctx.queue_deletion();
        } else if cancel {
            tracing::debug!("TextEdit cancelled");
            ctx.queue_deletion();
        }
    }
}

impl Default for TextEditWindow {
    fn default() -> Self {
        Self::new("", |_| {})
    }
}

impl Window for TextEditWindow {
    fn render(&mut self, ctx: &mut WindowContext<'_>) {
        let flags = if self.collapsed {
            WindowFlags::ALWAYS_AUTO_RESIZE
        } else {
            WindowFlags::NONE
        };
        if ctx.open_window(None, flags) {
            self.draw_contents(ctx);
        }
        ctx.end_window();
    }
}

impl RegisteredWindow for TextEditWindow {
    const META: WindowMeta = WindowMeta {
        name: "textedit_window",
        category: "Tools",
        title: "TextEdit Window",
        default_visible: false,
    };
}
