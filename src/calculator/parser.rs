//! Precedence-climbing parser and evaluator.
//!
//! Tokens are parsed into a small tree first and evaluated afterwards, so a
//! syntax error anywhere in the input wins over a numeric error such as a
//! division by zero earlier in the same expression.
//!
//! Runs of operators at one level are kept as a flat chain rather than a
//! left-leaning tree, so the tree is only as deep as the nesting the depth
//! limit already bounds, however many terms a long sum has.
//!
//! Unary minus applies to its operand before exponentiation: `-2^2` is
//! `(-2)^2 = 4`, while `2^-2` is `2^(-2) = 0.25`.

use tracing::trace;

use super::error::{EvalError, Result};
use super::numeric::{ensure_finite, floored_mod, round_result};
use super::token::{OperatorKind, Token};

/// Default limit on nesting of parentheses, unary minus and `^` operands.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Hard ceiling on the depth limit, whatever the caller asks for.
pub const MAX_DEPTH_CEILING: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binding strength of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub precedence: u8,
    pub associativity: Associativity,
}

/// The precedence table. One entry per operator kind.
pub const fn binding(op: OperatorKind) -> Binding {
    match op {
        OperatorKind::Add | OperatorKind::Sub => Binding {
            precedence: 1,
            associativity: Associativity::Left,
        },
        OperatorKind::Mul | OperatorKind::Div | OperatorKind::Mod => Binding {
            precedence: 2,
            associativity: Associativity::Left,
        },
        OperatorKind::Pow => Binding {
            precedence: 3,
            associativity: Associativity::Right,
        },
    }
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Number(f64),
    Negate(Box<Node>),
    /// `first op1 rest1 op2 rest2 ...`, folded left to right.
    Chain {
        first: Box<Node>,
        rest: Vec<(OperatorKind, Node)>,
    },
}

/// Evaluate a token sequence with the default depth limit.
pub fn evaluate(tokens: &[Token]) -> Result<f64> {
    evaluate_with_depth(tokens, DEFAULT_MAX_DEPTH)
}

/// Evaluate a token sequence, failing with `TooComplex` past `max_depth` nesting levels.
///
/// `max_depth` is capped at [`MAX_DEPTH_CEILING`]. The result is finite and
/// rounded to ten fractional digits.
pub fn evaluate_with_depth(tokens: &[Token], max_depth: usize) -> Result<f64> {
    let tree = Parser::new(tokens, max_depth.min(MAX_DEPTH_CEILING)).parse()?;
    let value = eval_node(&tree)?;
    trace!(raw = value, "evaluated expression tree");
    round_result(value)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn parse(mut self) -> Result<Node> {
        if self.tokens.is_empty() {
            return Err(EvalError::syntax("empty expression"));
        }

        let node = self.nested(|p| p.expression(0))?;

        match self.peek() {
            None => Ok(node),
            Some(Token::RightParen) => Err(EvalError::syntax("unmatched ')'")),
            Some(token) => Err(EvalError::syntax(format!("unexpected '{token}'"))),
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(EvalError::TooComplex(format!(
                "nesting exceeds {} levels",
                self.max_depth
            )));
        }
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Parse operands joined by operators binding at least `min_precedence`.
    fn expression(&mut self, min_precedence: u8) -> Result<Node> {
        let first = self.unary()?;
        let mut rest = Vec::new();

        while let Some(Token::Operator(op)) = self.peek() {
            let Binding {
                precedence,
                associativity,
            } = binding(op);
            if precedence < min_precedence {
                break;
            }
            self.advance();

            let next_min = match associativity {
                Associativity::Left => precedence + 1,
                Associativity::Right => precedence,
            };
            let rhs = self.nested(|p| p.expression(next_min))?;
            rest.push((op, rhs));
        }

        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Node::Chain {
                first: Box::new(first),
                rest,
            })
        }
    }

    fn unary(&mut self) -> Result<Node> {
        if let Some(Token::Operator(OperatorKind::Sub)) = self.peek() {
            self.advance();
            let operand = self.nested(Self::unary)?;
            return Ok(Node::Negate(Box::new(operand)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Node> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Node::Number(value)),
            Some(Token::LeftParen) => {
                let inner = self.nested(|p| p.expression(0))?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(inner),
                    Some(token) => Err(EvalError::syntax(format!(
                        "expected ')' but found '{token}'"
                    ))),
                    None => Err(EvalError::syntax("unmatched '('")),
                }
            }
            Some(Token::RightParen) => Err(EvalError::syntax("expected operand before ')'")),
            Some(Token::Operator(op)) => Err(EvalError::syntax(format!(
                "expected operand before '{}'",
                op.symbol()
            ))),
            None => Err(EvalError::syntax("expected operand at end of expression")),
        }
    }
}

fn eval_node(node: &Node) -> Result<f64> {
    match node {
        Node::Number(value) => ensure_finite(*value),
        Node::Negate(operand) => Ok(-eval_node(operand)?),
        Node::Chain { first, rest } => rest.iter().try_fold(eval_node(first)?, |lhs, (op, rhs)| {
            apply_binary(*op, lhs, eval_node(rhs)?)
        }),
    }
}

fn apply_binary(op: OperatorKind, lhs: f64, rhs: f64) -> Result<f64> {
    let value = match op {
        OperatorKind::Add => lhs + rhs,
        OperatorKind::Sub => lhs - rhs,
        OperatorKind::Mul => lhs * rhs,
        OperatorKind::Div => {
            if rhs == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            lhs / rhs
        }
        OperatorKind::Mod => {
            if rhs == 0.0 {
                return Err(EvalError::ModuloByZero);
            }
            floored_mod(lhs, rhs)
        }
        OperatorKind::Pow => lhs.powf(rhs),
    };
    ensure_finite(value)
}
