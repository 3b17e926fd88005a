mod expr;
pub mod printer;

use cursor::Line;
use errors::{SyntaxError, SyntaxErrors};
pub use expr::{Expr, LiteralValue};
use scanner::{Token, TokenData, TokenStream, TokenType};

use TokenType::*;

pub type Result<T> = std::result::Result<T, SyntaxError>;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum SyntaxErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expect ':' after then branch of conditional expression.")]
    ExpectedColon,
    #[error("Missing left-hand operand.")]
    MissingLeftOperand,
    #[error("Expect end of expression.")]
    ExpectedEnd,
}

impl SyntaxErrorType {
    pub fn at(self, token: &Token) -> SyntaxError {
        SyntaxError {
            line: token.line(),
            at: Some(match token.ty() {
                Eof => "end".to_string(),
                _ => format!("'{}'", token.lexeme()),
            }),
            message: self.to_string(),
        }
    }
}

/// Scans and parses `source` as a single expression. Scan errors come first in the error list,
/// followed by everything the parser found in the tokens that did scan.
pub fn parse_source(source: &str) -> std::result::Result<Expr<'_>, SyntaxErrors> {
    let mut scan_errors = SyntaxErrors::default();
    let mut tokens = Vec::new();
    for result in TokenStream::new(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => scan_errors.push(SyntaxError {
                line: e.line,
                at: None,
                message: e.error.to_string(),
            }),
        }
    }

    match Parser::new(tokens).parse() {
        Ok(expr) if scan_errors.is_empty() => Ok(expr),
        Ok(_) => Err(scan_errors),
        Err(parse_errors) => {
            scan_errors.extend(parse_errors.0);
            Err(scan_errors)
        }
    }
}

#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
    errors: SyntaxErrors,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        if tokens.last().map(Token::ty) != Some(Eof) {
            let line = tokens.last().map_or(Line(1), Token::line);
            tokens.push(Token::new(TokenData::Eof, "", line));
        }
        Self { tokens, current: 0, errors: SyntaxErrors::default() }
    }

    /// Parses exactly one expression. After the first error the parser keeps going, resyncing
    /// at the next token that can start an expression. Only error productions are recorded from
    /// there on, since anything that unwinds after a resync is usually fallout of the first error.
    pub fn parse(mut self) -> std::result::Result<Expr<'a>, SyntaxErrors> {
        let expr = match self.expression() {
            Ok(expr) if self.is_at_end() => Some(expr),
            Ok(_) => {
                let error = SyntaxErrorType::ExpectedEnd.at(self.peek());
                self.recover(error);
                None
            }
            Err(error) => {
                self.recover(error);
                None
            }
        };

        while !self.is_at_end() {
            match self.expression() {
                Ok(_) if self.is_at_end() => {}
                Ok(_) => self.synchronize(),
                Err(error) => {
                    log::trace!("Discarding {}", error);
                    self.synchronize();
                }
            }
        }

        match expr {
            Some(expr) if self.errors.is_empty() => Ok(expr),
            _ => Err(self.errors),
        }
    }

    fn recover(&mut self, error: SyntaxError) {
        log::debug!("Hit error: {}, syncing...", error);
        self.errors.push(error);
        self.synchronize();
    }

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.comma()
    }

    fn comma(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.ternary()?;

        while let Some(operator) = self.advance_if(&[Comma]) {
            let right = Box::new(self.ternary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right };
        }
        Ok(expr)
    }

    fn ternary(&mut self) -> Result<Expr<'a>> {
        let condition = self.equality()?;

        if self.advance_if(&[Question]).is_none() {
            return Ok(condition);
        }

        let then_branch = Box::new(self.expression()?);
        self.consume(Colon, SyntaxErrorType::ExpectedColon)?;
        let else_branch = Box::new(self.ternary()?);

        Ok(Expr::Ternary { condition: Box::new(condition), then_branch, else_branch })
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.advance_if(&[BangEqual, EqualEqual]) {
            let right = Box::new(self.comparison()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.term()?;

        while let Some(operator) = self.advance_if(&[Greater, GreaterEqual, Less, LessEqual]) {
            let right = Box::new(self.term()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.advance_if(&[Plus, Minus]) {
            let right = Box::new(self.factor()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.advance_if(&[Star, Slash]) {
            let right = Box::new(self.unary()?);
            expr = Expr::Binary { left: Box::new(expr), operator, right }
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr<'a>> {
        if let Some(operator) = self.advance_if(&[Minus, Bang]) {
            let right = Box::new(self.unary()?);
            return Ok(Expr::Unary { operator, right });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        let literal = match self.peek().data {
            TokenData::False => LiteralValue::Boolean(false),
            TokenData::True => LiteralValue::Boolean(true),
            TokenData::Nil => LiteralValue::Nil,
            TokenData::Number(n) => LiteralValue::Number(n),
            TokenData::Str(s) => LiteralValue::Str(s),
            TokenData::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(RightParen, SyntaxErrorType::ExpectedRightParen)?;
                return Ok(Expr::Grouping(Box::new(expr)));
            }

            // Binary operators with the left operand missing
            TokenData::BangEqual | TokenData::EqualEqual => {
                return self.missing_left_operand(Self::comparison)
            }
            TokenData::Greater
            | TokenData::GreaterEqual
            | TokenData::Less
            | TokenData::LessEqual => return self.missing_left_operand(Self::term),
            TokenData::Plus => return self.missing_left_operand(Self::factor),
            TokenData::Star | TokenData::Slash => return self.missing_left_operand(Self::unary),

            _ => return Err(SyntaxErrorType::ExpectedExpression.at(self.peek())),
        };

        self.advance();
        Ok(Expr::Literal(literal))
    }

    /// Error production: records the error, then parses and returns the right-hand operand so
    /// that parsing continues normally. The tree is never handed out since an error was recorded.
    fn missing_left_operand(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr<'a>>,
    ) -> Result<Expr<'a>> {
        let operator = self.advance();
        let error = SyntaxErrorType::MissingLeftOperand.at(&operator);
        log::debug!("Hit error: {}, parsing right-hand operand", error);
        self.errors.push(error);
        operand(self)
    }

    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() && !starts_expression(self.peek().ty()) {
            log::trace!("Syncing... {:?}", self.peek());
            self.advance();
        }
    }
}

fn starts_expression(ty: TokenType) -> bool {
    matches!(ty, Number | Str | True | False | Nil | LeftParen | Bang | Minus)
}

// Helpers
impl<'a> Parser<'a> {
    fn peek(&self) -> &Token<'a> {
        &self.tokens[self.current]
    }

    fn is_at_end(&self) -> bool {
        self.peek().ty() == Eof
    }

    /// Returns the current token and moves past it, unless it is `Eof`.
    fn advance(&mut self) -> Token<'a> {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn advance_if(&mut self, types: &[TokenType]) -> Option<Token<'a>> {
        types.contains(&self.peek().ty()).then(|| self.advance())
    }

    fn consume(&mut self, ty: TokenType, error_type: SyntaxErrorType) -> Result<Token<'a>> {
        self.advance_if(&[ty]).ok_or_else(|| error_type.at(self.peek()))
    }
}
