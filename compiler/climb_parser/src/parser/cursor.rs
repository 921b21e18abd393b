//! Byte-offset scan cursor over the expression source.

/// Scan position within the source. Only ever moves forward.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    /// The full source being parsed
    source: &'src str,
    /// Byte offset of the next unread character
    position: usize,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at the start of `source`
    pub fn new(source: &'src str) -> Self {
        Self::at(source, 0)
    }

    /// Create a cursor at a byte offset, clamped to the end of `source`
    pub fn at(source: &'src str, position: usize) -> Self {
        Cursor {
            source,
            position: position.min(source.len()),
        }
    }

    /// The next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Whether the next character is `expected`
    pub fn test(&self, expected: char) -> bool {
        self.peek() == Some(expected)
    }

    /// Consume `c`, which must be the character just peeked
    pub fn bump(&mut self, c: char) {
        debug_assert!(self.test(c));
        self.advance(c.len_utf8());
    }

    /// Skip `len` bytes
    pub fn advance(&mut self, len: usize) {
        self.position = (self.position + len).min(self.source.len());
    }

    /// The unread part of the source
    pub fn rest(&self) -> &'src str {
        &self.source[self.position..]
    }

    /// Byte offset of the next unread character
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if we're at the end of input
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }
}
