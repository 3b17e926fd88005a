//! Alternative renderings of an [`Expr`]. The canonical prefix form is the `Display` impl of
//! `Expr` itself.

use std::fmt::{self, Display, Formatter};

use crate::{Expr, LiteralValue};

/// Reverse Polish notation: operands first, then the operator. Groupings are implicit in the
/// order, so `(1 + 2) * (4 - 3)` becomes `1 2 + 4 3 - *`.
#[derive(Debug, Clone, Copy)]
pub struct Rpn<'e, 'a>(pub &'e Expr<'a>);

impl Display for Rpn<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Binary { left, operator, right } => {
                write!(f, "{} {} {}", Rpn(left), Rpn(right), operator)
            }
            Expr::Ternary { condition, then_branch, else_branch } => {
                write!(f, "{} {} {} ?:", Rpn(condition), Rpn(then_branch), Rpn(else_branch))
            }
            Expr::Grouping(inner) => write!(f, "{}", Rpn(inner)),
            Expr::Unary { operator, right } => write!(f, "{} {}", Rpn(right), operator),
            Expr::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// Fully parenthesized source text. Parsing the output again yields the same tree, apart from
/// the extra `Grouping` nodes introduced by the parentheses.
#[derive(Debug, Clone, Copy)]
pub struct Infix<'e, 'a>(pub &'e Expr<'a>);

impl Display for Infix<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Binary { left, operator, right } => {
                write!(f, "({} {} {})", Infix(left), operator, Infix(right))
            }
            Expr::Ternary { condition, then_branch, else_branch } => {
                write!(
                    f,
                    "({} ? {} : {})",
                    Infix(condition),
                    Infix(then_branch),
                    Infix(else_branch)
                )
            }
            Expr::Grouping(inner) => write!(f, "({})", Infix(inner)),
            Expr::Unary { operator, right } => write!(f, "({}{})", operator, Infix(right)),
            Expr::Literal(LiteralValue::Str(s)) => write!(f, "\"{}\"", s),
            Expr::Literal(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parse_source;

    #[test]
    fn rpn() {
        let rpn = |source| Rpn(&parse_source(source).unwrap()).to_string();

        assert_eq!(rpn("(1 + 2) * (4 - 3)"), "1 2 + 4 3 - *");
        assert_eq!(rpn("-123 * (45.67)"), "123 - 45.67 *");
        assert_eq!(rpn("1 + 2 + 3"), "1 2 + 3 +");
        assert_eq!(rpn("1, 2 ? 3 : 4"), "1 2 3 4 ?: ,");
        assert_eq!(rpn("!true == false"), "true ! false ==");
    }

    #[test]
    fn infix() {
        let infix = |source| Infix(&parse_source(source).unwrap()).to_string();

        assert_eq!(infix("1 + 2 * 3"), "(1 + (2 * 3))");
        assert_eq!(infix("(1 + 2) * 3"), "(((1 + 2)) * 3)");
        assert_eq!(infix("-!nil"), "(-(!nil))");
        assert_eq!(infix("\"a\" + \"b\" , 1 ? 2 : 3"), "((\"a\" + \"b\") , (1 ? 2 : 3))");
    }

    #[test]
    fn reparsing_infix_is_idempotent() {
        let sources = [
            "1 + 2 + 3",
            "1 - (2 * 3) < 4 == false",
            "1, 2 ? 3 : 4",
            "1 ? 2 : 3 ? 4 : 5",
            "true ? 1, 2 : 3",
            "(1 ? 2 : 3) ? 4 : 5",
            "- - 1 / -(2) >= \"str\" != nil",
            "!(1, 2), (3, 4), 5",
            "1.5 * 0.25 <= 10 / 3",
        ];

        for source in sources {
            let expr = parse_source(source).unwrap();
            let printed = Infix(&expr).to_string();
            let reparsed = parse_source(&printed).unwrap();
            assert_eq!(reparsed.ungrouped(), expr.ungrouped(), "{source} printed as {printed}");
        }
    }
}
