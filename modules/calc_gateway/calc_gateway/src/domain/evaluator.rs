//! Stack-based postfix evaluation with one remote call per operator.

use calc_gateway_sdk::EvaluationResult;

use crate::domain::dispatcher::OperationDispatcher;
use crate::domain::error::{DomainError, MalformedExpression};
use crate::domain::expression::{Postfix, Token};

/// Evaluate `postfix`, dispatching operators strictly in sequence.
///
/// For each operator the most recently pushed value is the right operand and
/// the one below it the left operand. Operations are recorded in the order
/// they are resolved.
///
/// # Errors
/// - [`DomainError::Malformed`] on stack underflow, leftover values, or an empty sequence
/// - [`DomainError::RemoteOperation`] as soon as any remote call fails; nothing
///   computed so far is returned
pub async fn evaluate(
    postfix: &Postfix,
    dispatcher: &OperationDispatcher,
) -> Result<EvaluationResult, DomainError> {
    let mut stack: Vec<f64> = Vec::new();
    let mut operations = Vec::with_capacity(postfix.operator_count());

    for token in postfix.tokens() {
        match *token {
            Token::Number(value) => stack.push(value),
            Token::Operator(operator) => {
                let (Some(y), Some(x)) = (stack.pop(), stack.pop()) else {
                    return Err(MalformedExpression::MissingOperand { operator }.into());
                };
                let op_result = dispatcher.dispatch(x, y, operator).await?;
                stack.push(op_result.result);
                operations.push(op_result);
            }
            Token::LeftParen | Token::RightParen => {
                return Err(MalformedExpression::UnbalancedParentheses.into());
            }
        }
    }

    match stack.as_slice() {
        [] => Err(MalformedExpression::Empty.into()),
        [result] => Ok(EvaluationResult::new(*result, operations)),
        values => Err(MalformedExpression::DanglingOperands {
            count: values.len(),
        }
        .into()),
    }
}
