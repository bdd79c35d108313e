use chainspan_core::{extract_token, ExpressionError, TypeNode, COMMA};

use crate::{BEGIN_ARRAY, BEGIN_TUPLE, END_TUPLE, TUPLE};

const DELIMITERS: &[char] = &[BEGIN_TUPLE, END_TUPLE, COMMA];

/// Errors produced while parsing an Ethereum-style signature.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EthSignatureError {
    /// A tuple was opened but never closed
    #[error("expected tuple end")]
    ExpectedTupleEnd,
    /// A token-level error in the underlying expression
    #[error("{0}")]
    Expression(#[from] ExpressionError),
}

/// Parses a comma-separated Ethereum-style signature such as
/// `uint64,(address,bytes32)[2],string` into type nodes. Tuples nest
/// arbitrarily; array suffixes attach to the preceding type.
pub fn parse_ethereum_signature(signature: &str) -> Result<Vec<TypeNode>, EthSignatureError> {
    let (arguments, remainder) = parse_expression(signature)?;
    if !remainder.is_empty() {
        return Err(ExpressionError::ExpectedBlankRemainder.into());
    }
    Ok(arguments)
}

fn parse_expression(expression: &str) -> Result<(Vec<TypeNode>, &str), EthSignatureError> {
    let mut arguments = Vec::new();
    let mut expression = expression.trim();

    if expression.is_empty() {
        return Err(ExpressionError::BlankExpression.into());
    }

    while !expression.is_empty() {
        let (argument, rest) = if expression.starts_with(BEGIN_TUPLE) {
            extract_tuple(&expression[1..])?
        } else {
            extract_simple_token(expression)?
        };
        expression = rest;
        arguments.push(argument);

        if expression.starts_with(END_TUPLE) {
            return Ok((arguments, expression));
        }
        if expression.starts_with(COMMA) {
            expression = &expression[1..];
            if expression.is_empty() {
                return Err(ExpressionError::ExpectedExpressionAfterComma.into());
            }
        }
    }

    Ok((arguments, ""))
}

fn extract_tuple(expression: &str) -> Result<(TypeNode, &str), EthSignatureError> {
    let (children, expression) = parse_expression(expression)?;
    if !expression.starts_with(END_TUPLE) {
        return Err(EthSignatureError::ExpectedTupleEnd);
    }

    let mut expression = &expression[1..];
    let mut array_suffix = "";
    if expression.starts_with(BEGIN_ARRAY) {
        let (suffix, rest) = extract_token(expression, DELIMITERS)?;
        array_suffix = suffix;
        expression = rest;
    }
    let node = TypeNode::with_children(format!("{TUPLE}{array_suffix}"), children);
    Ok((node, expression))
}

fn extract_simple_token(expression: &str) -> Result<(TypeNode, &str), EthSignatureError> {
    let (token, expression) = extract_token(expression, DELIMITERS)?;
    Ok((TypeNode::leaf(token), expression))
}
