use std::num::ParseIntError;

/// The comma separating sibling types in both signature grammars.
pub const COMMA: char = ',';

/// Errors produced while splitting a signature expression into tokens.
/// Both dialect parsers surface these unchanged, so callers can match on
/// them without knowing which grammar was being read.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExpressionError {
    /// The expression (or a bracketed child list) was empty
    #[error("blank expression")]
    BlankExpression,
    /// A single token was requested from an empty expression
    #[error("blank token expression")]
    BlankTokenExpression,
    /// The expression begins with a delimiter instead of a type
    #[error("expression starts with delimiter")]
    ExpressionStartsWithDelimiter,
    /// A trailing comma with nothing after it
    #[error("expected expression after comma")]
    ExpectedExpressionAfterComma,
    /// Input remained after the outermost type list was closed
    #[error("expected blank remainder")]
    ExpectedBlankRemainder,
    /// A parameterized type carries a number of type parameters other than one
    #[error("expected one nested argument")]
    ExpectedOneNestedArgument,
    /// A numeric suffix (array arity, integer width) failed to parse
    #[error("invalid numeric suffix: {0}")]
    InvalidNumericSuffix(#[from] ParseIntError),
}

/// A parsed type expression: a type name plus its ordered type parameters.
///
/// Children keep the syntactic order of the signature; the empty list marks
/// a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    /// The dialect-specific type name, array suffixes included
    pub name: String,
    /// The ordered type parameters
    pub children: Vec<TypeNode>,
}

impl TypeNode {
    /// A scalar node without type parameters.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// A node with the given type parameters.
    pub fn with_children(name: impl Into<String>, children: Vec<TypeNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// The single type parameter of a `List`/`array<N>`/`Option`-style node.
    pub fn single_child(&self) -> Result<&TypeNode, ExpressionError> {
        match self.children.as_slice() {
            [child] => Ok(child),
            _ => Err(ExpressionError::ExpectedOneNestedArgument),
        }
    }
}

/// Extracts the numeric suffix of words such as `array3` or `uint256`.
pub fn extract_numeric_suffix(word: &str, prefix: &str) -> Result<usize, ExpressionError> {
    Ok(word.replacen(prefix, "", 1).parse()?)
}

/// Splits the leading token off `expression`, stopping at the first
/// delimiter. Returns the token and the remainder (delimiter included).
pub fn extract_token<'a>(
    expression: &'a str,
    delimiters: &[char],
) -> Result<(&'a str, &'a str), ExpressionError> {
    let expression = expression.trim();
    if expression.is_empty() {
        return Err(ExpressionError::BlankTokenExpression);
    }
    if expression.starts_with(delimiters) {
        return Err(ExpressionError::ExpressionStartsWithDelimiter);
    }
    match expression.find(|character| delimiters.contains(&character)) {
        Some(position) => Ok((&expression[..position], &expression[position..])),
        None => Ok((expression, "")),
    }
}
