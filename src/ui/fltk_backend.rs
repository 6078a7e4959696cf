//! [`Ui`] implemented on top of FLTK's retained widgets.
//!
//! Every immediate-mode window label maps to one top-level FLTK window, and
//! every widget id inside it to one cached FLTK widget. Each frame the widgets
//! that get described are positioned and shown; the rest are hidden. Clicks
//! and edits arrive through FLTK callbacks and are reported on the next call
//! for that widget.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use fltk::{
    app,
    button::Button,
    draw,
    enums::{Align, CallbackTrigger, Event, Font},
    frame::Frame,
    input::{Input, MultilineInput},
    prelude::*,
    window::Window,
};

use crate::app::domain::TextBuffer;

use super::immediate::{Ui, Vec2, WindowFlags, display_label, resolve_extent};

const PADDING: i32 = 8;
const SPACING: i32 = 6;
const ROW_HEIGHT: i32 = 28;
const LABEL_SIZE: i32 = 14;
const SINGLE_LINE_WIDTH: i32 = 260;
const MULTI_LINE_DEFAULT: (i32, i32) = (320, 120);
const NEW_WINDOW_SIZE: (i32, i32) = (400, 120);

/// Cursor-based row layout: widgets flow top to bottom, `same_line` keeps the
/// next one on the current row.
#[derive(Debug, Default, Clone, PartialEq)]
struct RowLayout {
    started: bool,
    same_line: bool,
    row_y: i32,
    row_height: i32,
    next_x: i32,
    extent_w: i32,
    extent_h: i32,
}

impl RowLayout {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn same_line(&mut self) {
        self.same_line = true;
    }

    /// Where the next widget will be placed.
    fn next_origin(&self) -> (i32, i32) {
        if !self.started {
            (PADDING, PADDING)
        } else if self.same_line {
            (self.next_x + SPACING, self.row_y)
        } else {
            (PADDING, self.row_y + self.row_height + SPACING)
        }
    }

    fn place(&mut self, w: i32, h: i32) -> (i32, i32) {
        let (x, y) = self.next_origin();
        if !self.started || !self.same_line {
            self.row_y = y;
            self.row_height = 0;
        }
        self.started = true;
        self.same_line = false;
        self.row_height = self.row_height.max(h);
        self.next_x = x + w;
        self.extent_w = self.extent_w.max(x + w);
        self.extent_h = self.extent_h.max(y + h);
        (x, y)
    }

    /// Window size that fits everything placed so far.
    fn content_size(&self) -> (i32, i32) {
        (
            (self.extent_w + PADDING).max(1),
            (self.extent_h + PADDING).max(1),
        )
    }
}

enum Widget {
    Button { button: Button, clicked: Rc<Cell<bool>> },
    Label { frame: Frame, text: String },
    Line { input: Input, changed: Rc<Cell<bool>> },
    Multi { input: MultilineInput, changed: Rc<Cell<bool>> },
}

impl Widget {
    fn hide(&mut self) {
        match self {
            Widget::Button { button, .. } => button.hide(),
            Widget::Label { frame, .. } => frame.hide(),
            Widget::Line { input, .. } => input.hide(),
            Widget::Multi { input, .. } => input.hide(),
        }
    }
}

struct Slot {
    widget: Widget,
    touched: bool,
}

struct HostWindow {
    window: Window,
    close_requested: Rc<Cell<bool>>,
    slots: HashMap<String, Slot>,
    layout: RowLayout,
    auto_resize: bool,
    visible: bool,
    begun: bool,
    text_count: usize,
}

impl HostWindow {
    fn new(label: &str) -> Self {
        let mut window = Window::default()
            .with_size(NEW_WINDOW_SIZE.0, NEW_WINDOW_SIZE.1)
            .with_label(display_label(label))
            .center_screen();
        window.end();
        window.make_resizable(true);

        // The close button only raises a request; whether the window actually
        // goes away is up to the caller of begin_window
        let close_requested = Rc::new(Cell::new(false));
        let flag = close_requested.clone();
        window.set_callback(move |_| {
            if app::event() == Event::Close {
                flag.set(true);
            }
        });

        Self {
            window,
            close_requested,
            slots: HashMap::new(),
            layout: RowLayout::default(),
            auto_resize: false,
            visible: false,
            begun: false,
            text_count: 0,
        }
    }

    fn start_frame(&mut self, visible: bool, flags: WindowFlags) {
        self.begun = true;
        self.visible = visible;
        if !visible {
            if self.window.shown() {
                self.window.hide();
            }
            return;
        }

        self.layout.reset();
        self.auto_resize = flags.always_auto_resize;
        self.text_count = 0;
        for slot in self.slots.values_mut() {
            slot.touched = false;
        }
        if !self.window.shown() {
            self.window.show();
        }
    }

    fn finish_frame(&mut self) {
        if !self.visible {
            return;
        }
        for slot in self.slots.values_mut().filter(|s| !s.touched) {
            slot.widget.hide();
        }
        if self.auto_resize {
            let (w, h) = self.layout.content_size();
            if self.window.w() != w || self.window.h() != h {
                let (x, y) = (self.window.x(), self.window.y());
                self.window.resize(x, y, w, h);
            }
        }
        self.window.redraw();
    }

    fn slot(&mut self, key: String, create: impl FnOnce() -> Widget) -> &mut Slot {
        let window = &mut self.window;
        let slot = self.slots.entry(key).or_insert_with(|| {
            let widget = create();
            match &widget {
                Widget::Button { button, .. } => window.add(button),
                Widget::Label { frame, .. } => window.add(frame),
                Widget::Line { input, .. } => window.add(input),
                Widget::Multi { input, .. } => window.add(input),
            }
            Slot {
                widget,
                touched: false,
            }
        });
        slot.touched = true;
        slot
    }

    fn button(&mut self, label: &str) -> bool {
        if !self.visible {
            return false;
        }
        let shown = display_label(label).to_string();
        let (w, h) = (measure_label(&shown) + 2 * PADDING, ROW_HEIGHT);
        let (x, y) = self.layout.place(w, h);

        let slot = self.slot(format!("button:{label}"), || {
            let mut button = Button::default().with_label(&shown);
            let clicked = Rc::new(Cell::new(false));
            let flag = clicked.clone();
            button.set_callback(move |_| flag.set(true));
            Widget::Button { button, clicked }
        });
        let Widget::Button { button, clicked } = &mut slot.widget else {
            return false;
        };
        button.resize(x, y, w, h);
        button.show();
        clicked.replace(false)
    }

    fn text(&mut self, text: &str) {
        if !self.visible {
            return;
        }
        let (w, h) = (measure_label(text) + 4, ROW_HEIGHT);
        let (x, y) = self.layout.place(w, h);
        let key = format!("text:{}", self.text_count);
        self.text_count += 1;

        let slot = self.slot(key, || {
            let mut frame = Frame::default();
            frame.set_align(Align::Left | Align::Inside);
            Widget::Label {
                frame,
                text: String::new(),
            }
        });
        let Widget::Label { frame, text: shown } = &mut slot.widget else {
            return;
        };
        if shown.as_str() != text {
            // '@' starts a symbol in FLTK labels
            frame.set_label(&text.replace('@', "@@"));
            *shown = text.to_string();
        }
        frame.resize(x, y, w, h);
        frame.show();
    }

    fn input_line(&mut self, id: &str, buffer: &mut TextBuffer) -> bool {
        if !self.visible {
            return false;
        }
        let (w, h) = (SINGLE_LINE_WIDTH, ROW_HEIGHT);
        let (x, y) = self.layout.place(w, h);

        let slot = self.slot(format!("input:{id}"), || {
            let mut input = Input::default();
            let changed = watch_changes(&mut input);
            Widget::Line { input, changed }
        });
        let Widget::Line { input, changed } = &mut slot.widget else {
            return false;
        };
        input.resize(x, y, w, h);
        input.show();
        sync_input(input, changed, buffer)
    }

    fn input_multi(&mut self, id: &str, buffer: &mut TextBuffer, size: Vec2) -> bool {
        if !self.visible {
            return false;
        }
        let (x, y) = self.layout.next_origin();
        let w = resolve_extent(size.x, self.window.w() - x, MULTI_LINE_DEFAULT.0);
        let h = resolve_extent(size.y, self.window.h() - y, MULTI_LINE_DEFAULT.1);
        self.layout.place(w, h);

        let slot = self.slot(format!("multi:{id}"), || {
            let mut input = MultilineInput::default();
            let changed = watch_changes(&mut input);
            Widget::Multi { input, changed }
        });
        let Widget::Multi { input, changed } = &mut slot.widget else {
            return false;
        };
        input.resize(x, y, w, h);
        input.show();
        sync_input(input, changed, buffer)
    }

    fn set_size(&mut self, size: Vec2) {
        let w = (size.x.round() as i32).max(1);
        let h = (size.y.round() as i32).max(1);
        let (x, y) = (self.window.x(), self.window.y());
        self.window.resize(x, y, w, h);
    }
}

fn measure_label(text: &str) -> i32 {
    if text.is_empty() {
        return 0;
    }
    draw::set_font(Font::Helvetica, LABEL_SIZE);
    draw::measure(text, false).0
}

fn watch_changes<I: InputExt>(input: &mut I) -> Rc<Cell<bool>> {
    let changed = Rc::new(Cell::new(false));
    let flag = changed.clone();
    input.set_trigger(CallbackTrigger::Changed);
    input.set_callback(move |_| flag.set(true));
    changed
}

/// Move user edits from the widget into the buffer, or buffer changes into
/// the widget. Returns true if the user edited the text.
fn sync_input<I: InputExt>(input: &mut I, changed: &Cell<bool>, buffer: &mut TextBuffer) -> bool {
    input.set_maximum_size(buffer.max_text_len() as i32);

    if changed.replace(false) {
        let value = input.value();
        let edited = buffer.write(&value);
        let stored = buffer.as_str();
        if stored != value.as_str() {
            // Truncated to capacity
            input.set_value(&stored);
        }
        edited
    } else {
        let stored = buffer.as_str();
        if input.value() != stored {
            input.set_value(&stored);
        }
        false
    }
}

/// Immediate-mode [`Ui`] backed by FLTK windows.
///
/// Call [`FltkUi::new_frame`] before and [`FltkUi::end_frame`] after each
/// pass over the windows. Windows not begun during a frame are destroyed at
/// its end.
#[derive(Default)]
pub struct FltkUi {
    windows: HashMap<String, HostWindow>,
    stack: Vec<String>,
}

impl FltkUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_frame(&mut self) {
        if !self.stack.is_empty() {
            tracing::warn!("{} window(s) left open at frame start", self.stack.len());
            self.stack.clear();
        }
        for host in self.windows.values_mut() {
            host.begun = false;
        }
    }

    pub fn end_frame(&mut self) {
        let stale: Vec<String> = self
            .windows
            .iter()
            .filter(|(_, host)| !host.begun)
            .map(|(label, _)| label.clone())
            .collect();
        for label in stale {
            if let Some(host) = self.windows.remove(&label) {
                tracing::debug!("Destroying host window {label}");
                app::delete_widget(host.window);
            }
        }
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn current(&mut self) -> Option<&mut HostWindow> {
        let label = self.stack.last()?;
        self.windows.get_mut(label)
    }
}

impl Ui for FltkUi {
    fn begin_window(&mut self, label: &str, open: Option<&mut bool>, flags: WindowFlags) -> bool {
        let host = self
            .windows
            .entry(label.to_string())
            .or_insert_with(|| HostWindow::new(label));
        self.stack.push(label.to_string());

        let close_requested = host.close_requested.replace(false);
        let visible = match open {
            Some(open) => {
                if close_requested {
                    *open = false;
                }
                *open
            }
            None => true,
        };
        host.start_frame(visible, flags);
        visible
    }

    fn end_window(&mut self) {
        let Some(label) = self.stack.pop() else {
            tracing::warn!("end_window without begin_window");
            return;
        };
        if let Some(host) = self.windows.get_mut(&label) {
            host.finish_frame();
        }
    }

    fn button(&mut self, label: &str) -> bool {
        self.current().is_some_and(|host| host.button(label))
    }

    fn same_line(&mut self) {
        if let Some(host) = self.current() {
            host.layout.same_line();
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(host) = self.current() {
            host.text(text);
        }
    }

    fn input_text(&mut self, id: &str, buffer: &mut TextBuffer) -> bool {
        self.current()
            .is_some_and(|host| host.input_line(id, buffer))
    }

    fn input_text_multiline(&mut self, id: &str, buffer: &mut TextBuffer, size: Vec2) -> bool {
        self.current()
            .is_some_and(|host| host.input_multi(id, buffer, size))
    }

    fn set_window_size(&mut self, size: Vec2) {
        if let Some(host) = self.current() {
            host.set_size(size);
        }
    }
}
