use cursor::{Cursor, Line};

pub mod token;
pub use token::{Token, TokenData, TokenType};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
    #[error("Unexpected character.")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub line: Line,
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Lazily scans a source string. Always yields a final `Eof` token and then stops.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), done: false }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.peek() {
                Some(' ' | '\r' | '\t' | '\n') => {
                    self.cursor.next();
                }
                Some('/') if self.cursor.peek_next() == Some('/') => {
                    self.cursor.advance_while(|c| c != '\n');
                }
                _ => return,
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token<'a>> {
        self.skip_whitespace_and_comments();

        let start = self.cursor.clone();
        let Some(c) = self.cursor.next() else {
            self.done = true;
            return Ok(Token::new(Eof, "", self.cursor.line()));
        };

        let data = match c {
            '(' => LeftParen,
            ')' => RightParen,
            ',' => Comma,
            '-' => Minus,
            '+' => Plus,
            '/' => Slash,
            '*' => Star,
            '?' => Question,
            ':' => Colon,

            '!' => self.either('=', BangEqual, Bang),
            '=' => self.either('=', EqualEqual, Equal),
            '<' => self.either('=', LessEqual, Less),
            '>' => self.either('=', GreaterEqual, Greater),

            '"' => self.string(&start)?,
            c if c.is_ascii_digit() => self.number(&start),
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(&start),

            c => return Err(self.error(ScanErrorType::UnexpectedCharacter(c), start.line())),
        };

        Ok(Token::new(data, self.cursor.slice_from(&start), start.line()))
    }

    fn either(
        &mut self,
        next: char,
        matched: TokenData<'a>,
        single: TokenData<'a>,
    ) -> TokenData<'a> {
        if self.cursor.advance_if(next) {
            matched
        } else {
            single
        }
    }

    fn string(&mut self, start: &Cursor<'a>) -> Result<TokenData<'a>> {
        self.cursor.advance_while(|c| c != '"');
        if !self.cursor.advance_if('"') {
            return Err(self.error(ScanErrorType::UnterminatedString, self.cursor.line()));
        }

        let lexeme = self.cursor.slice_from(start);
        Ok(Str(&lexeme[1..lexeme.len() - 1]))
    }

    fn number(&mut self, start: &Cursor<'a>) -> TokenData<'a> {
        self.cursor.advance_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        // Digits with an optional fraction always parse; too large a literal becomes infinity
        let lexeme = self.cursor.slice_from(start);
        Number(lexeme.parse().unwrap_or_else(|e| unreachable!("Scanned number {lexeme}: {e}")))
    }

    fn identifier(&mut self, start: &Cursor<'a>) -> TokenData<'a> {
        self.cursor.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');

        match self.cursor.slice_from(start) {
            "true" => True,
            "false" => False,
            "nil" => Nil,
            _ => Identifier,
        }
    }

    fn error(&self, error: ScanErrorType, line: Line) -> ScanError {
        ScanError { error, line }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        Some(self.scan_token())
    }
}
