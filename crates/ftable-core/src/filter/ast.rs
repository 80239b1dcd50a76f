//! Query model: tokens, operators and the combining operation.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Comparison operator of a [`Token`].
///
/// Serialized as its symbol (`=`, `!=`, `:`, `!:`, `^`, `!^`, `>`, `>=`, `<`,
/// `<=`). Unrecognized symbols deserialize to [`Operator::Unknown`] so that
/// stored queries always load; such tokens never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `:` (substring)
    Contains,
    /// `!:`
    NotContains,
    /// `^` (prefix)
    StartsWith,
    /// `!^`
    NotStartsWith,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// Any other symbol.
    Unknown(String),
}

impl Operator {
    /// Every known operator, longest symbols first where prefixes overlap.
    pub const KNOWN: &'static [Operator] = &[
        Operator::NotEquals,
        Operator::NotContains,
        Operator::NotStartsWith,
        Operator::GreaterOrEqual,
        Operator::LessOrEqual,
        Operator::Equals,
        Operator::Contains,
        Operator::StartsWith,
        Operator::Greater,
        Operator::Less,
    ];

    /// Returns the operator's symbol.
    pub fn symbol(&self) -> &str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::Contains => ":",
            Operator::NotContains => "!:",
            Operator::StartsWith => "^",
            Operator::NotStartsWith => "!^",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Unknown(symbol) => symbol,
        }
    }

    /// Maps a symbol to its operator.
    pub fn from_symbol(symbol: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|op| op.symbol() == symbol)
            .cloned()
            .unwrap_or_else(|| Operator::Unknown(symbol.to_string()))
    }

    /// Returns a short description, e.g. "greater than or equal".
    pub fn description(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "does not equal",
            Operator::Contains => "contains",
            Operator::NotContains => "does not contain",
            Operator::StartsWith => "starts with",
            Operator::NotStartsWith => "does not start with",
            Operator::Greater => "greater than",
            Operator::GreaterOrEqual => "greater than or equal",
            Operator::Less => "less than",
            Operator::LessOrEqual => "less than or equal",
            Operator::Unknown(_) => "unknown",
        }
    }

    /// Returns true unless this is [`Operator::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Unknown(_))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = String::deserialize(deserializer)?;
        Ok(Operator::from_symbol(&symbol))
    }
}

/// How the tokens of a query are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Every token must match.
    #[default]
    And,
    /// At least one token must match.
    Or,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::And => f.write_str("and"),
            Operation::Or => f.write_str("or"),
        }
    }
}

/// One property/operator/value predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Record key to compare.
    pub property_key: String,
    /// Comparison operator.
    pub operator: Operator,
    /// Raw comparison value as entered.
    pub value: String,
}

impl Token {
    /// Creates a token.
    pub fn new(
        property_key: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            property_key: property_key.into(),
            operator,
            value: value.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.property_key, self.operator, self.value)
    }
}

/// An ordered set of tokens plus a combining operation.
///
/// The operation applies uniformly to every token; there is no nested
/// grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Predicates in entry order.
    #[serde(default)]
    pub tokens: Vec<Token>,
    /// Combining operation.
    #[serde(default)]
    pub operation: Operation,
}

impl Query {
    /// Creates an empty `and` query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query requiring every token to match.
    pub fn and(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            operation: Operation::And,
        }
    }

    /// Creates a query requiring at least one token to match.
    pub fn or(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            operation: Operation::Or,
        }
    }

    /// Appends a token.
    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens.push(token);
        self
    }

    /// Returns true if the query has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = match self.operation {
            Operation::And => " AND ",
            Operation::Or => " OR ",
        };
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}
