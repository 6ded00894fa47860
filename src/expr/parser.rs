//! Recursive-descent parser for the expression language.

use super::ast::{constant, BinaryOp, Expr, Function, UnaryOp};
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{NumkitError, Result};

/// Deepest nesting accepted: parentheses, calls, unary signs, powers and
/// operator chains each count one level.
pub const MAX_DEPTH: usize = 256;

/// Parser for arithmetic expressions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Parse a complete expression; trailing input is an error.
    pub fn parse(&mut self) -> Result<Expr> {
        if self.current.kind == TokenKind::Eof {
            return Err(NumkitError::parse_failure(self.current.column, "empty expression"));
        }
        let expr = self.parse_sum()?;
        if self.current.kind != TokenKind::Eof {
            return Err(NumkitError::parse_failure(
                self.current.column,
                format!("unexpected token '{}'", self.current.text),
            ));
        }
        Ok(expr)
    }

    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            self.advance()
        } else {
            Err(NumkitError::parse_failure(
                self.current.column,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_DEPTH {
            return Err(NumkitError::parse_failure(
                self.current.column,
                format!("expression nested deeper than {} levels", MAX_DEPTH),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    // sum := product (('+' | '-') product)*
    fn parse_sum(&mut self) -> Result<Expr> {
        let depth = self.depth;
        let mut lhs = self.parse_product()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            // Each link of a chain deepens the left-leaning tree
            self.enter()?;
            self.advance()?;
            let rhs = self.parse_product()?;
            lhs = binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    // product := unary (('*' | '/') unary)*
    fn parse_product(&mut self) -> Result<Expr> {
        let depth = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.enter()?;
            self.advance()?;
            let rhs = self.parse_unary()?;
            lhs = binary(op, lhs, rhs);
        }
        self.depth = depth;
        Ok(lhs)
    }

    // unary := ('+' | '-') unary | power
    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.current.kind {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            _ => return self.parse_power(),
        };
        self.enter()?;
        self.advance()?;
        let operand = self.parse_unary()?;
        self.depth -= 1;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    // power := primary ('^' unary)?   (right-associative through unary)
    fn parse_power(&mut self) -> Result<Expr> {
        let base = self.parse_primary()?;
        if self.current.kind == TokenKind::Power {
            self.enter()?;
            self.advance()?;
            let exponent = self.parse_unary()?;
            self.depth -= 1;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    // primary := number | identifier ['(' sum ')'] | '(' sum ')'
    fn parse_primary(&mut self) -> Result<Expr> {
        let token = self.current.clone();
        match token.kind {
            TokenKind::Number => {
                self.advance()?;
                token
                    .text
                    .parse::<f64>()
                    .map(Expr::Number)
                    .map_err(|_| {
                        NumkitError::parse_failure(token.column, format!("invalid number '{}'", token.text))
                    })
            }
            TokenKind::Identifier => {
                self.advance()?;
                if self.current.kind == TokenKind::OpenParen {
                    let function = Function::from_name(&token.text).ok_or_else(|| {
                        NumkitError::parse_failure(
                            token.column,
                            format!("unknown function '{}'", token.text),
                        )
                    })?;
                    self.enter()?;
                    self.advance()?;
                    let arg = self.parse_sum()?;
                    self.expect(TokenKind::CloseParen)?;
                    self.depth -= 1;
                    return Ok(Expr::Call {
                        function,
                        arg: Box::new(arg),
                    });
                }
                Ok(match constant(&token.text) {
                    Some(v) => Expr::Number(v),
                    None => Expr::Variable(token.text),
                })
            }
            TokenKind::OpenParen => {
                self.enter()?;
                self.advance()?;
                let inner = self.parse_sum()?;
                self.expect(TokenKind::CloseParen)?;
                self.depth -= 1;
                Ok(inner)
            }
            TokenKind::Eof => Err(NumkitError::parse_failure(
                token.column,
                "unexpected end of expression",
            )),
            _ => Err(NumkitError::parse_failure(
                token.column,
                format!("unexpected token '{}'", token.text),
            )),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;
    use approx::assert_relative_eq;

    fn eval(text: &str, x: f64) -> f64 {
        parse(text).unwrap().eval(x).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1 + 2 * 3", 0.0), 7.0);
        assert_eq!(eval("(1 + 2) * 3", 0.0), 9.0);
        assert_eq!(eval("8 / 4 / 2", 0.0), 1.0);
        assert_eq!(eval("10 - 4 - 3", 0.0), 3.0);
    }

    #[test]
    fn test_power_binding() {
        assert_eq!(eval("2 ** 3 ** 2", 0.0), 512.0);
        assert_eq!(eval("-x**2", 3.0), -9.0);
        assert_eq!(eval("2^-1", 0.0), 0.5);
        assert_eq!(eval("x^2 * 2", 3.0), 18.0);
    }

    #[test]
    fn test_functions_and_constants() {
        assert_relative_eq!(eval("sin(pi / 2)", 0.0), 1.0);
        assert_relative_eq!(eval("exp(x)", 1.0), std::f64::consts::E);
        assert_relative_eq!(eval("log(e)", 0.0), 1.0);
        assert_relative_eq!(eval("sqrt(abs(x))", -16.0), 4.0);
        assert_relative_eq!(eval("1/x", 4.0), 0.25);
    }

    #[test]
    fn test_ieee_semantics() {
        assert!(eval("1/x", 0.0).is_infinite());
        assert!(eval("log(x)", -1.0).is_nan());
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "x +", "(x", "x)", "foo(x)", "2 3", "*x"] {
            let err = parse(bad).unwrap_err();
            assert!(
                matches!(err, NumkitError::ParseFailure { .. }),
                "expected parse failure for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_nesting_limit() {
        let shallow = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval(&shallow, 2.0), 2.0);
        assert_eq!(eval(&format!("{}x", "-".repeat(100)), 2.0), 2.0);

        let deep_parens = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        let deep_signs = format!("{}x", "-".repeat(10_000));
        let deep_powers = vec!["x"; 10_000].join("^");
        let long_chain = vec!["x"; 10_000].join("+");
        for text in [deep_parens, deep_signs, deep_powers, long_chain] {
            assert!(matches!(
                parse(&text),
                Err(NumkitError::ParseFailure { .. })
            ));
        }
    }

    #[test]
    fn test_unbound_variable() {
        let expr = parse("y + 1").unwrap();
        assert!(matches!(
            expr.eval(1.0),
            Err(NumkitError::EvaluationFailure { .. })
        ));
    }

    #[test]
    fn test_display_round_trips_structure() {
        let expr = parse("-x^2 + 3*sin(x)").unwrap();
        assert_eq!(expr.to_string(), "((-(x ^ 2)) + (3 * sin(x)))");
    }
}
