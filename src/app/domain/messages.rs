/// All messages that can be sent through the FLTK channel.
/// Menu callbacks and window save callbacks send one of these; the dispatch
/// loop in main hands them to `AppState`.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // File
    EditNote,
    FileQuit,
    WindowClose,

    // Tools: open a registered window by name
    OpenWindow(&'static str),

    // Results from tool windows
    NoteSaved(String),
}
