use chainspan_core::{extract_numeric_suffix, extract_token, ExpressionError, TypeNode, COMMA};

use crate::{ARRAY, BEGIN_TYPE, END_TYPE};

const DELIMITERS: &[char] = &[BEGIN_TYPE, END_TYPE, COMMA];

/// Errors produced while parsing a MultiversX-style signature.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MvxSignatureError {
    /// A type parameter list was opened but never closed
    #[error("expected type end")]
    ExpectedTypeEnd,
    /// A token-level error in the underlying expression
    #[error("{0}")]
    Expression(#[from] ExpressionError),
}

/// Parses a comma-separated MultiversX-style signature such as
/// `u8,List<tuple<u32,Address>>,variadic<BigInt>` into type nodes.
/// Type parameters are bracketed with `<` `>`; array arity rides as a
/// numeric suffix on the `array` keyword.
pub fn parse_multiversx_signature(signature: &str) -> Result<Vec<TypeNode>, MvxSignatureError> {
    let (arguments, remainder) = parse_expression(signature)?;
    if !remainder.is_empty() {
        return Err(ExpressionError::ExpectedBlankRemainder.into());
    }
    Ok(arguments)
}

fn parse_expression(expression: &str) -> Result<(Vec<TypeNode>, &str), MvxSignatureError> {
    let mut arguments = Vec::new();
    let mut expression = expression.trim();

    if expression.is_empty() {
        return Err(ExpressionError::BlankExpression.into());
    }

    while !expression.is_empty() {
        let (token, rest) = extract_token(expression, DELIMITERS)?;
        expression = rest;

        let mut children = Vec::new();
        if expression.starts_with(BEGIN_TYPE) {
            let (extracted, rest) = extract_types(&expression[1..])?;
            children = extracted;
            expression = rest;
        }
        arguments.push(TypeNode::with_children(token, children));

        if expression.starts_with(END_TYPE) {
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

fn extract_types(expression: &str) -> Result<(Vec<TypeNode>, &str), MvxSignatureError> {
    let (children, expression) = parse_expression(expression)?;
    if !expression.starts_with(END_TYPE) {
        return Err(MvxSignatureError::ExpectedTypeEnd);
    }
    Ok((children, &expression[1..]))
}

/// Extracts the arity of an `arrayN` type name.
pub fn extract_array_size(array_type: &str) -> Result<usize, ExpressionError> {
    extract_numeric_suffix(array_type, ARRAY)
}
