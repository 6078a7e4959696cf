use std::borrow::Cow;
use std::fmt;

/// Capacity added on construction and on every growth step.
pub const GROWTH_INCREMENT: usize = 512;

/// Minimum free bytes (capacity minus length) kept after each edit.
pub const HEADROOM_THRESHOLD: usize = 10;

/// NUL-terminated, growable byte buffer edited in place by an input widget.
///
/// The allocated size is the capacity. Text occupies the bytes before the
/// first NUL, so at most `capacity() - 1` bytes of text fit. Widgets write into
/// it through [`TextBuffer::write`] and call [`TextBuffer::grow_if_needed`]
/// after each edit to keep room for the next keystrokes.
#[derive(Clone, PartialEq, Eq)]
pub struct TextBuffer {
    bytes: Vec<u8>,
}

impl TextBuffer {
    /// Build a buffer holding `initial` with [`GROWTH_INCREMENT`] bytes of
    /// headroom. An embedded NUL ends the text, as it would in C.
    pub fn new(initial: &str) -> Self {
        let mut bytes = vec![0u8; initial.len() + GROWTH_INCREMENT];
        bytes[..initial.len()].copy_from_slice(initial.as_bytes());
        Self { bytes }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Length of the text in bytes, not counting the terminator.
    pub fn len(&self) -> usize {
        self.bytes
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(self.bytes.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn headroom(&self) -> usize {
        self.capacity() - self.len()
    }

    /// Largest text, in bytes, an input widget may write.
    pub fn max_text_len(&self) -> usize {
        self.capacity().saturating_sub(1)
    }

    /// Text up to the terminator. Invalid UTF-8 is replaced, never rejected.
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes[..self.len()])
    }

    /// The raw allocation, terminator and spare capacity included.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    /// Replace the text with what the user typed.
    ///
    /// Input longer than [`TextBuffer::max_text_len`] is cut at the last char
    /// boundary that fits. Returns true if the stored text changed.
    pub fn write(&mut self, text: &str) -> bool {
        let text = match text.find('\0') {
            Some(nul) => &text[..nul],
            None => text,
        };
        let fitted = truncate_to_boundary(text, self.max_text_len());
        if fitted.as_bytes() == &self.bytes[..self.len()] {
            return false;
        }

        self.bytes[..fitted.len()].copy_from_slice(fitted.as_bytes());
        self.bytes[fitted.len()..].fill(0);
        true
    }

    /// Grow capacity by [`GROWTH_INCREMENT`] when headroom has fallen below
    /// [`HEADROOM_THRESHOLD`]. Existing text is untouched. Returns true if the
    /// buffer grew.
    pub fn grow_if_needed(&mut self) -> bool {
        if self.headroom() >= HEADROOM_THRESHOLD {
            return false;
        }
        let new_capacity = self.capacity() + GROWTH_INCREMENT;
        self.bytes.resize(new_capacity, 0);
        true
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.as_str())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Longest prefix of `text` that is at most `max` bytes and ends on a char
/// boundary.
pub fn truncate_to_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_holds_text_then_terminator() {
        let buf = TextBuffer::new("hello");
        assert_eq!(buf.capacity(), 5 + GROWTH_INCREMENT);
        assert_eq!(&buf.as_bytes_with_nul()[..6], b"hello\0");
        assert_eq!(buf.as_str(), "hello");
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn test_new_empty() {
        let buf = TextBuffer::new("");
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), GROWTH_INCREMENT);
        assert_eq!(buf.as_bytes_with_nul()[0], 0);
    }

    #[test]
    fn test_new_multibyte() {
        let buf = TextBuffer::new("héllo 🦀");
        assert_eq!(buf.as_str(), "héllo 🦀");
        assert_eq!(buf.len(), "héllo 🦀".len());
    }

    #[test]
    fn test_embedded_nul_ends_text() {
        let buf = TextBuffer::new("ab\0cd");
        assert_eq!(buf.as_str(), "ab");
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn test_write_replaces_and_clears_tail() {
        let mut buf = TextBuffer::new("a longer line");
        assert!(buf.write("short"));
        assert_eq!(buf.as_str(), "short");
        assert!(buf.as_bytes_with_nul()[5..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_write_same_text_reports_unchanged() {
        let mut buf = TextBuffer::new("same");
        assert!(!buf.write("same"));
    }

    #[test]
    fn test_write_truncates_to_capacity() {
        let mut buf = TextBuffer::new("");
        let long = "x".repeat(GROWTH_INCREMENT * 2);
        assert!(buf.write(&long));
        assert_eq!(buf.len(), GROWTH_INCREMENT - 1);
        assert_eq!(buf.headroom(), 1);
    }

    #[test]
    fn test_write_truncates_at_char_boundary() {
        let mut buf = TextBuffer::new("");
        // 511 bytes of room: 255 two-byte chars fit, the 256th does not
        let text = "é".repeat(300);
        buf.write(&text);
        assert_eq!(buf.len(), 510);
        assert_eq!(buf.as_str(), "é".repeat(255));
    }

    #[test]
    fn test_no_growth_with_enough_headroom() {
        let mut buf = TextBuffer::new("abc");
        let before = buf.capacity();
        assert!(!buf.grow_if_needed());
        assert_eq!(buf.capacity(), before);
    }

    #[test]
    fn test_growth_when_headroom_below_threshold() {
        let mut buf = TextBuffer::new("");
        let typed = "y".repeat(GROWTH_INCREMENT - HEADROOM_THRESHOLD + 1);
        buf.write(&typed);
        assert!(buf.headroom() < HEADROOM_THRESHOLD);

        assert!(buf.grow_if_needed());
        assert_eq!(buf.capacity(), GROWTH_INCREMENT * 2);
        assert_eq!(buf.as_str(), typed);
        assert!(buf.headroom() >= HEADROOM_THRESHOLD);
    }

    #[test]
    fn test_growth_boundary_exactly_at_threshold() {
        let mut buf = TextBuffer::new("");
        buf.write(&"z".repeat(GROWTH_INCREMENT - HEADROOM_THRESHOLD));
        assert_eq!(buf.headroom(), HEADROOM_THRESHOLD);
        assert!(!buf.grow_if_needed());
    }

    #[test]
    fn test_repeated_typing_keeps_content() {
        let mut buf = TextBuffer::new("");
        let mut expected = String::new();
        for i in 0..2000 {
            expected.push(char::from(b'a' + (i % 26) as u8));
            buf.write(&expected);
            buf.grow_if_needed();
            assert!(buf.headroom() >= HEADROOM_THRESHOLD);
        }
        assert_eq!(buf.as_str(), expected);
    }

    #[test]
    fn test_truncate_to_boundary() {
        assert_eq!(truncate_to_boundary("abc", 10), "abc");
        assert_eq!(truncate_to_boundary("abc", 2), "ab");
        assert_eq!(truncate_to_boundary("aé", 2), "a");
        assert_eq!(truncate_to_boundary("", 0), "");
    }

    #[test]
    fn test_display() {
        let buf = TextBuffer::new("shown");
        assert_eq!(buf.to_string(), "shown");
    }
}
