use std::cmp::Ordering;

use cursor::Line;
use errors::{Report, SyntaxErrors};
use parser::{Expr, LiteralValue};
use scanner::{Token, TokenType};

mod value;
pub use value::Value;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum RuntimeErrorType {
    #[error("Operand must be a number.")]
    OperandMustBeNumber,
    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers,
    #[error("Operands must be two numbers or at least one string.")]
    InvalidAdditionOperands,
    #[error("Division by zero.")]
    DivisionByZero,
}

impl RuntimeErrorType {
    fn at(self, operator: &Token) -> RuntimeError {
        RuntimeError { error: self, line: operator.line() }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{error}\n[line {line}]")]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    /// Line of the offending operator.
    pub line: Line,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum InterpretError {
    #[error("{0}")]
    Syntax(#[from] SyntaxErrors),
    #[error("{0}")]
    Runtime(#[from] RuntimeError),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Self
    }

    /// Scans, parses and evaluates `source` as one expression.
    pub fn interpret(&self, source: &str) -> std::result::Result<Value, InterpretError> {
        let expr = parser::parse_source(source)?;
        Ok(self.evaluate(&expr)?)
    }

    /// Like [`Interpreter::interpret`], but hands every error to `reporter` instead of returning
    /// it.
    pub fn run(&self, source: &str, reporter: &mut impl Report) -> Option<Value> {
        match self.interpret(source) {
            Ok(value) => Some(value),
            Err(InterpretError::Syntax(errors)) => {
                for error in errors.iter() {
                    reporter.syntax_error(error);
                }
                None
            }
            Err(InterpretError::Runtime(error)) => {
                reporter.runtime_error(error.line, &error.error.to_string());
                None
            }
        }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value> {
        use Expr::*;
        log::trace!("Evaluating {}", expr);
        match expr {
            Literal(LiteralValue::Number(n)) => Ok((*n).into()),
            Literal(LiteralValue::Str(s)) => Ok((*s).into()),
            Literal(LiteralValue::Boolean(b)) => Ok((*b).into()),
            Literal(LiteralValue::Nil) => Ok(Value::Nil),

            Grouping(expr) => self.evaluate(expr),

            Unary { operator, right } => {
                let right = self.evaluate(right)?;
                match (operator.ty(), right) {
                    (TokenType::Minus, Value::Number(n)) => Ok((-n).into()),
                    (TokenType::Minus, _) => {
                        Err(RuntimeErrorType::OperandMustBeNumber.at(operator))
                    }
                    (TokenType::Bang, v) => Ok((!v.is_truthy()).into()),
                    (ty, _) => unreachable!("Parser produced unary operator {:?}", ty),
                }
            }

            Ternary { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }

            Binary { left, operator, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(left, operator, right)
            }
        }
    }
}

fn binary(left: Value, operator: &Token, right: Value) -> Result<Value> {
    use RuntimeErrorType::*;
    use TokenType::*;
    use Value::Number;

    match (operator.ty(), left, right) {
        (Comma, _, right) => Ok(right),

        (EqualEqual, l, r) => Ok((l == r).into()),
        (BangEqual, l, r) => Ok((l != r).into()),

        (Plus, Number(l), Number(r)) => Ok((l + r).into()),
        (Plus, l @ Value::Str(_), r) | (Plus, l, r @ Value::Str(_)) => Ok(format!("{l}{r}").into()),
        (Plus, _, _) => Err(InvalidAdditionOperands.at(operator)),

        (Minus, Number(l), Number(r)) => Ok((l - r).into()),
        (Star, Number(l), Number(r)) => Ok((l * r).into()),
        (Slash, Number(_), Number(r)) if r == 0.0 => Err(DivisionByZero.at(operator)),
        (Slash, Number(l), Number(r)) => Ok((l / r).into()),
        (Minus | Star | Slash, _, _) => Err(OperandsMustBeNumbers.at(operator)),

        (ty @ (Greater | GreaterEqual | Less | LessEqual), l, r) => {
            let ordering = match (&l, &r) {
                (Number(l), Number(r)) => l.partial_cmp(r),
                (Value::Str(l), Value::Str(r)) => Some(l.cmp(r)),
                _ => return Err(OperandsMustBeNumbers.at(operator)),
            };
            Ok(match ty {
                Greater => matches!(ordering, Some(Ordering::Greater)),
                GreaterEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
                Less => matches!(ordering, Some(Ordering::Less)),
                _ => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            }
            .into())
        }

        (ty, _, _) => unreachable!("Parser produced binary operator {:?}", ty),
    }
}
