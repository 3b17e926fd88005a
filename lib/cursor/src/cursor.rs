use std::fmt::{Debug, Formatter};

/// 1-based line in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct Line(pub usize);

#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
    line: Line,
}

impl<'a> Debug for Cursor<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The source is usually too verbose, so only print it in alternate mode
        let alternate = f.alternate();
        let mut s = f.debug_struct("Cursor");
        s.field("line", &self.line).field("offset", &self.offset);
        if alternate {
            s.field("source", &self.source);
        }
        s.finish()
    }
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0, line: Line(1) }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Consumes the next char only if it is `expected`.
    pub fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    pub fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.next();
        }
    }

    /// Source text between `start` (an earlier copy of this cursor) and the current position.
    pub fn slice_from(&self, start: &Cursor<'a>) -> &'a str {
        debug_assert!(std::ptr::eq(self.source, start.source));
        &self.source[start.offset..self.offset]
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line.0 += 1;
        }
        Some(c)
    }
}
