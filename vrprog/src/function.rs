//! Function tokens and their textual form.
//!
//! A function token is an operation name plus the literal value inputs it is applied to, such
//! as `filter_color[red]` or `relate[left]`. Value inputs are plain strings and are never
//! sub-programs; structural inputs live on the program node (see [`crate::program`]).
//!
//! Text codec
//!  - A token with no value input renders as its bare name: `scene`.
//!  - Otherwise the value inputs are joined by commas inside brackets: `same[color,size]`.
//!  - Parsing splits on the first `[`, strips the trailing `]` and splits the remainder on
//!    commas. Value inputs are assumed to never contain `[`, `]` or `,`; such inputs do not
//!    survive a round-trip and are not reported as errors.
use std::{convert::Infallible, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An operation name together with its ordered literal value inputs.
///
/// Two tokens are equal iff their names and value inputs are equal, in order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionToken {
    /// Operation name. Older CLEVR records store it under `type`.
    #[cfg_attr(feature = "serde", serde(alias = "type"))]
    pub function: String,
    /// Literal arguments of the operation, in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value_inputs: Vec<String>,
}

impl FunctionToken {
    /// A token without value inputs.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            value_inputs: Vec::new(),
        }
    }

    /// A token applied to the given value inputs.
    pub fn with_values<I, S>(function: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.into(),
            value_inputs: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The operation name, without value inputs.
    #[inline]
    pub fn name(&self) -> &str {
        &self.function
    }

    /// Parse the textual form produced by [`Display`](fmt::Display). Never fails.
    pub fn parse(s: &str) -> Self {
        match s.split_once('[') {
            None => Self::new(s),
            Some((name, rest)) => {
                let rest = rest.strip_suffix(']').unwrap_or(rest);
                Self::with_values(name, rest.split(','))
            }
        }
    }
}

impl fmt::Display for FunctionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.function)?;
        if !self.value_inputs.is_empty() {
            write!(f, "[{}]", self.value_inputs.join(","))?;
        }
        Ok(())
    }
}

impl FromStr for FunctionToken {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for FunctionToken {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Render a token as `name` or `name[v1,v2,...]`.
pub fn function_to_str(token: &FunctionToken) -> String {
    token.to_string()
}

/// Inverse of [`function_to_str`].
pub fn str_to_function(s: &str) -> FunctionToken {
    FunctionToken::parse(s)
}
