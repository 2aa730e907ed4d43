use crate::Stack;

/// An editor buffer: an ordered sequence of characters with an insertion
/// point called the cursor.
///
/// The text is split at the cursor into two stacks. `before` holds the
/// characters to the left of the cursor with the nearest one on top; `after`
/// holds the characters to the right, again nearest on top. Every edit and
/// single-step cursor move is O(1); jumping to either end is linear.
#[derive(Default)]
pub struct EditorBuffer {
    before: Stack<char>,
    after: Stack<char>,
}

impl EditorBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor one character forward. Has no effect at the end of
    /// the buffer.
    pub fn move_cursor_forward(&mut self) {
        if let Ok(ch) = self.after.pop() {
            self.before.push(ch);
        }
    }

    /// Moves the cursor one character backward. Has no effect at the start
    /// of the buffer.
    pub fn move_cursor_backward(&mut self) {
        if let Ok(ch) = self.before.pop() {
            self.after.push(ch);
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        while let Ok(ch) = self.before.pop() {
            self.after.push(ch);
        }
    }

    pub fn move_cursor_to_end(&mut self) {
        while let Ok(ch) = self.after.pop() {
            self.before.push(ch);
        }
    }

    /// Inserts `ch` at the cursor, leaving the cursor after it.
    pub fn insert_character(&mut self, ch: char) {
        self.before.push(ch);
    }

    /// Deletes the character immediately after the cursor, if any.
    pub fn delete_character(&mut self) {
        self.after.pop().ok();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The contents of the buffer.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text: Vec<char> = self.before.iter().copied().collect();
        text.reverse();
        text.extend(self.after.iter());
        text.into_iter().collect()
    }

    /// The index of the cursor, in `0..=len`.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.before.len()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("text", &self.text())
            .field("cursor", &self.cursor())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> EditorBuffer {
        let mut buffer = EditorBuffer::new();
        text.chars().for_each(|ch| buffer.insert_character(ch));
        buffer
    }

    #[test]
    fn insert_leaves_cursor_after() {
        let buffer = buffer("ABC");

        assert_eq!(buffer.text(), "ABC");
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn cursor_moves_clamp_at_ends() {
        let mut buffer = buffer("AB");

        buffer.move_cursor_forward();
        assert_eq!(buffer.cursor(), 2);

        buffer.move_cursor_to_start();
        assert_eq!(buffer.cursor(), 0);
        buffer.move_cursor_backward();
        assert_eq!(buffer.cursor(), 0);

        buffer.move_cursor_forward();
        assert_eq!(buffer.cursor(), 1);
        buffer.move_cursor_to_end();
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn edit_in_the_middle() {
        let mut buffer = buffer("ACD");

        buffer.move_cursor_to_start();
        buffer.move_cursor_forward();
        buffer.insert_character('B');
        assert_eq!(buffer.text(), "ABCD");
        assert_eq!(buffer.cursor(), 2);

        buffer.delete_character();
        assert_eq!(buffer.text(), "ABD");
        assert_eq!(buffer.cursor(), 2);

        buffer.move_cursor_to_end();
        buffer.delete_character();
        assert_eq!(buffer.text(), "ABD");
    }

    #[test]
    fn empty_buffer() {
        let mut buffer = EditorBuffer::new();

        buffer.delete_character();
        buffer.move_cursor_backward();
        buffer.move_cursor_forward();

        assert!(buffer.is_empty());
        assert_eq!(buffer.text(), "");
        assert_eq!(buffer.cursor(), 0);
    }
}
