use fltk::{app, enums::Event, prelude::*};

use prometheus::app::domain::{AppSettings, Message};
use prometheus::app::state::AppState;
use prometheus::app::window_manager::WindowManager;
use prometheus::ui::FltkUi;
use prometheus::ui::main_window::{build_main_window, show_note};
use prometheus::ui::menu::build_menu;
use prometheus::windows::default_registry;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn,prometheus=info"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() {
    init_tracing();

    let app = app::App::default();
    let settings = AppSettings::load();
    let registry = match default_registry() {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("Failed to register windows: {e}");
            std::process::exit(1);
        }
    };

    let (sender, receiver) = app::channel::<Message>();

    let mut widgets = build_main_window(&settings);
    build_menu(&mut widgets.menu, &sender, &registry);
    widgets.wind.set_callback(move |_| {
        if app::event() == Event::Close {
            sender.send(Message::WindowClose);
        }
    });
    widgets.wind.show();

    let mut manager = WindowManager::new(registry);
    manager.startup(&settings);

    let frame_interval = settings.frame_interval_ms as f64 / 1000.0;
    let mut state = AppState::new(manager, settings, move |msg| sender.send(msg));
    let mut ui = FltkUi::new();
    show_note(&mut widgets.note_frame, state.note());

    while state.is_running() {
        if let Err(e) = app::wait_for(frame_interval) {
            tracing::error!("Event loop failed: {e}");
            break;
        }

        while let Some(msg) = receiver.recv() {
            let note_changed = matches!(msg, Message::NoteSaved(_));
            state.handle(msg);
            if note_changed {
                show_note(&mut widgets.note_frame, state.note());
            }
        }

        ui.new_frame();
        state.manager.render_frame(&mut ui);
        ui.end_frame();
    }

    // A frame with nothing begun destroys every tool window's FLTK counterpart
    ui.new_frame();
    ui.end_frame();

    state.settings.host_width = widgets.wind.w();
    state.settings.host_height = widgets.wind.h();
    if let Err(e) = state.settings.save() {
        tracing::warn!("Failed to save settings: {e}");
    }
    app.quit();
}
