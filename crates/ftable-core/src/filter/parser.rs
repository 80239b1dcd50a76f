//! Parser for the textual token form `key<op>value`.

use super::ast::{Operation, Operator, Query, Token};
use super::error::{FilterError, FilterResult};

/// Characters that make up operator symbols.
const OPERATOR_CHARS: &[char] = &['=', '!', ':', '^', '>', '<'];

/// Longest operator symbol, in bytes.
const MAX_OPERATOR_LEN: usize = 2;

/// Parses tokens such as `state=Activated`, `requests >= 5000` or `id:bcd`.
///
/// The property key is everything before the first operator character. The
/// operator is the longest known symbol starting there, so `state=!x`
/// compares `state` for equality with `!x`. Whitespace around the key and
/// value is trimmed.
pub struct TokenParser;

impl TokenParser {
    /// Parses a single token.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] if the text is empty, has no operator, has
    /// no key, or uses an unknown operator symbol.
    pub fn parse(input: &str) -> FilterResult<Token> {
        let input = input.trim();
        if input.is_empty() {
            return Err(FilterError::EmptyExpression);
        }

        let Some(op_start) = input.find(OPERATOR_CHARS) else {
            return Err(FilterError::missing_operator(input));
        };

        let key = input[..op_start].trim();
        if key.is_empty() {
            return Err(FilterError::missing_property_key(input));
        }

        let rest = &input[op_start..];
        let run = rest
            .find(|c: char| !OPERATOR_CHARS.contains(&c))
            .unwrap_or(rest.len());

        // Operator characters are ASCII, so byte offsets are char boundaries.
        let operator = (1..=run.min(MAX_OPERATOR_LEN))
            .rev()
            .map(|len| (len, Operator::from_symbol(&rest[..len])))
            .find(|(_, op)| op.is_known());

        let Some((len, operator)) = operator else {
            return Err(FilterError::unknown_operator(&rest[..run]));
        };

        let value = rest[len..].trim();
        Ok(Token::new(key, operator, value))
    }

    /// Parses several tokens into a query with the given operation.
    ///
    /// # Errors
    ///
    /// Returns the first token's parse error.
    pub fn parse_query<S: AsRef<str>>(inputs: &[S], operation: Operation) -> FilterResult<Query> {
        let tokens = inputs
            .iter()
            .map(|input| Self::parse(input.as_ref()))
            .collect::<FilterResult<Vec<_>>>()?;
        Ok(Query { tokens, operation })
    }
}
