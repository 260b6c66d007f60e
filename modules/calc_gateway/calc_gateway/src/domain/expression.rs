//! Expression compiler: tokenizer and shunting-yard infix-to-postfix conversion.

use std::fmt;

use calc_gateway_sdk::{Associativity, Operator};

use crate::domain::error::MalformedExpression;

/// Characters that split an expression into tokens and are kept as tokens.
const SYMBOLS: [char; 6] = ['+', '-', '*', '/', '(', ')'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
        }
    }
}

/// Parse a finite decimal literal. NaN and infinity spellings are rejected.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split `expression` into numbers, operators and parentheses.
///
/// Whitespace is removed before splitting, so `"3 4"` is the single literal `34`.
/// A leading `-` is the subtraction operator; there is no unary minus.
///
/// # Errors
/// Returns [`MalformedExpression::InvalidToken`] for any piece that is neither
/// a symbol nor a finite decimal number.
pub fn tokenize(expression: &str) -> Result<Vec<Token>, MalformedExpression> {
    let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();

    split_keep_symbols(&compact)
        .into_iter()
        .enumerate()
        .map(|(index, piece)| {
            classify(piece).ok_or_else(|| MalformedExpression::InvalidToken {
                token: piece.to_owned(),
                index,
            })
        })
        .collect()
}

/// Split at every symbol, keeping the symbol as its own piece and dropping
/// empty pieces between adjacent symbols.
fn split_keep_symbols(s: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if SYMBOLS.contains(&c) {
            if start < i {
                pieces.push(&s[start..i]);
            }
            let end = i + c.len_utf8();
            pieces.push(&s[i..end]);
            start = end;
        }
    }
    if start < s.len() {
        pieces.push(&s[start..]);
    }
    pieces
}

fn classify(piece: &str) -> Option<Token> {
    let mut chars = piece.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        match c {
            '(' => return Some(Token::LeftParen),
            ')' => return Some(Token::RightParen),
            _ => {
                if let Some(op) = Operator::from_symbol(c) {
                    return Some(Token::Operator(op));
                }
            }
        }
    }
    parse_number(piece).map(Token::Number)
}

/// A postfix (reverse Polish) token sequence.
///
/// Sequences produced by [`to_postfix`] are arity-checked; sequences built with
/// [`Postfix::new`] are not, and the evaluator re-checks them as it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    #[must_use]
    pub fn operator_count(&self) -> usize {
        self.0
            .iter()
            .filter(|t| matches!(t, Token::Operator(_)))
            .count()
    }

    /// Check that evaluation would leave exactly one value on the stack.
    ///
    /// # Errors
    /// Returns the same [`MalformedExpression`] the evaluator would hit.
    pub fn check_arity(&self) -> Result<(), MalformedExpression> {
        let mut depth = 0usize;
        for token in &self.0 {
            match token {
                Token::Number(_) => depth += 1,
                Token::Operator(op) => {
                    if depth < 2 {
                        return Err(MalformedExpression::MissingOperand { operator: *op });
                    }
                    depth -= 1;
                }
                Token::LeftParen | Token::RightParen => {
                    return Err(MalformedExpression::UnbalancedParentheses);
                }
            }
        }
        match depth {
            0 => Err(MalformedExpression::Empty),
            1 => Ok(()),
            count => Err(MalformedExpression::DanglingOperands { count }),
        }
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Whether `incoming` must wait until `top` has been emitted.
fn pops_before(incoming: Operator, top: Operator) -> bool {
    match incoming.associativity() {
        Associativity::Left => incoming.precedence() <= top.precedence(),
        Associativity::Right => incoming.precedence() < top.precedence(),
    }
}

/// Convert infix tokens to postfix with the shunting-yard algorithm.
///
/// # Errors
/// - [`MalformedExpression::UnbalancedParentheses`] for a `)` without a
///   matching `(` or a `(` never closed
/// - [`MalformedExpression::MissingOperand`], [`MalformedExpression::DanglingOperands`]
///   or [`MalformedExpression::Empty`] when the result would not reduce to one value
pub fn to_postfix(tokens: &[Token]) -> Result<Postfix, MalformedExpression> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();

    for &token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Operator(incoming) => {
                while let Some(&Token::Operator(top)) = stack.last() {
                    if !pops_before(incoming, top) {
                        break;
                    }
                    output.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(token);
            }
            Token::LeftParen => stack.push(token),
            Token::RightParen => loop {
                match stack.pop() {
                    Some(Token::LeftParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(MalformedExpression::UnbalancedParentheses),
                }
            },
        }
    }

    while let Some(token) = stack.pop() {
        if matches!(token, Token::LeftParen) {
            return Err(MalformedExpression::UnbalancedParentheses);
        }
        output.push(token);
    }

    let postfix = Postfix(output);
    postfix.check_arity()?;
    Ok(postfix)
}

/// Tokenize and convert in one step.
///
/// # Errors
/// See [`tokenize`] and [`to_postfix`].
pub fn compile(expression: &str) -> Result<Postfix, MalformedExpression> {
    let tokens = tokenize(expression)?;
    to_postfix(&tokens)
}
