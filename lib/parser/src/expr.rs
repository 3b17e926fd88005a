use std::fmt::{self, Display, Formatter};

use scanner::Token;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Ternary { condition: Box<Expr<'a>>, then_branch: Box<Expr<'a>>, else_branch: Box<Expr<'a>> },
    Grouping(Box<Expr<'a>>),
    Unary { operator: Token<'a>, right: Box<Expr<'a>> },
    Literal(LiteralValue<'a>),
}

impl<'a> Expr<'a> {
    /// The same tree with every `Grouping` node replaced by its inner expression.
    pub fn ungrouped(self) -> Expr<'a> {
        match self {
            Expr::Grouping(inner) => inner.ungrouped(),
            Expr::Binary { left, operator, right } => Expr::Binary {
                left: Box::new(left.ungrouped()),
                operator,
                right: Box::new(right.ungrouped()),
            },
            Expr::Ternary { condition, then_branch, else_branch } => Expr::Ternary {
                condition: Box::new(condition.ungrouped()),
                then_branch: Box::new(then_branch.ungrouped()),
                else_branch: Box::new(else_branch.ungrouped()),
            },
            Expr::Unary { operator, right } => {
                Expr::Unary { operator, right: Box::new(right.ungrouped()) }
            }
            literal @ Expr::Literal(_) => literal,
        }
    }
}

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { left, operator, right } => {
                write!(f, "({} {} {})", operator, left, right)
            }
            Expr::Ternary { condition, then_branch, else_branch } => {
                write!(f, "(?: {} {} {})", condition, then_branch, else_branch)
            }
            Expr::Grouping(expression) => {
                write!(f, "(group {})", expression)
            }
            Expr::Unary { operator, right } => {
                write!(f, "({} {})", operator, right)
            }
            Expr::Literal(value) => {
                write!(f, "{}", value)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue<'a> {
    Number(f64),
    Str(&'a str),
    Boolean(bool),
    Nil,
}

impl<'a> Display for LiteralValue<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::Str(s) => write!(f, "{}", s),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Nil => write!(f, "nil"),
        }
    }
}
