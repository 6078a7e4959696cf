use fltk::{
    app::Sender,
    enums::Shortcut,
    menu::{MenuBar, MenuFlag},
    prelude::*,
};

use crate::app::domain::Message;
use crate::app::window_manager::WindowRegistry;

pub fn build_menu(menu: &mut MenuBar, sender: &Sender<Message>, registry: &WindowRegistry) {
    let s = sender;

    // File
    menu.add("File/Edit Note...", Shortcut::Ctrl | 'e', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::EditNote) });
    menu.add("File/Quit", Shortcut::Ctrl | 'q', MenuFlag::Normal, { let s = *s; move |_| s.send(Message::FileQuit) });

    // One submenu per registry category
    for category in registry.categories() {
        for desc in registry.in_category(category) {
            let name = desc.meta.name;
            menu.add(&menu_path(category, desc.meta.title), Shortcut::None, MenuFlag::Normal, { let s = *s; move |_| s.send(Message::OpenWindow(name)) });
        }
    }
}

/// Menu item path for a window title. `/` would open a submenu and `&` marks
/// a shortcut letter, so both are escaped.
pub fn menu_path(category: &str, title: &str) -> String {
    let escape = |part: &str| part.replace('&', "&&").replace('/', "\\/");
    format!("{}/{}", escape(category), escape(title))
}
