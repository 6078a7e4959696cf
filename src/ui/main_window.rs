use fltk::{
    enums::{Align, Color},
    frame::Frame,
    group::{Flex, FlexType},
    menu::MenuBar,
    prelude::*,
    window::Window,
};

use crate::app::domain::AppSettings;

const EMPTY_NOTE_HINT: &str = "(empty note - use File/Edit Note...)";

pub struct MainWidgets {
    pub wind: Window,
    pub flex: Flex,
    pub menu: MenuBar,
    pub note_frame: Frame,
}

pub fn build_main_window(settings: &AppSettings) -> MainWidgets {
    let (w, h) = (settings.host_width, settings.host_height);
    let mut wind = Window::new(100, 100, w, h, "prometheus");
    wind.set_xclass("prometheus");

    let mut flex = Flex::new(0, 0, w, h, None);
    flex.set_type(FlexType::Column);

    let menu = MenuBar::new(0, 0, 0, 30, "");
    flex.fixed(&menu, 30);

    let mut note_frame = Frame::default();
    note_frame.set_align(Align::Left | Align::Top | Align::Inside | Align::Wrap);
    note_frame.set_label_color(Color::from_rgb(60, 60, 60));

    flex.end();
    wind.resizable(&flex);
    // Tool windows are top-level; nothing else may land inside this one
    wind.end();

    MainWidgets {
        wind,
        flex,
        menu,
        note_frame,
    }
}

/// Text shown in the note frame for `note`.
pub fn note_label(note: &str) -> String {
    if note.is_empty() {
        EMPTY_NOTE_HINT.to_string()
    } else {
        note.replace('@', "@@")
    }
}

pub fn show_note(frame: &mut Frame, note: &str) {
    frame.set_label(&note_label(note));
    frame.redraw();
}
