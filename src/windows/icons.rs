//! Glyphs used as button labels.

pub const FORWARD: &str = "\u{25b6}";
pub const BACK: &str = "\u{25c0}";
pub const CHECK: &str = "\u{2714}";
pub const CROSS: &str = "\u{2716}";
