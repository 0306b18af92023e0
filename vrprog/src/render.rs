//! Space-separated program strings.
//!
//! These are the strings handed to tokenization and vocabulary encoding: every function token
//! is written with the codec of [`crate::function`] and tokens are joined by single spaces.
use strum::{Display, EnumIter, EnumString};

use crate::{
    convert::{is_chain, list_to_postfix, list_to_prefix},
    function::FunctionToken,
    program::ProgramList,
    utils::Result,
};

/// How a list-form program is linearized into a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum LinearizeMode {
    /// List order, only for programs that are a single chain.
    Chain,
    /// Pre-order.
    #[default]
    Prefix,
    /// Post-order.
    Postfix,
}

/// Join the textual form of `tokens` with single spaces.
pub fn list_to_str<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a FunctionToken>,
{
    tokens
        .into_iter()
        .map(FunctionToken::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a program string back into function tokens.
pub fn str_to_program(s: &str) -> Vec<FunctionToken> {
    s.split_whitespace().map(FunctionToken::parse).collect()
}

/// Render `program` in the requested linearization.
///
/// Returns `Ok(None)` in [`LinearizeMode::Chain`] when the program branches or has nodes off
/// the root path; callers skip such programs or pick another mode. Prefix and postfix rendering
/// fail only on malformed lists.
pub fn program_to_str(program: &ProgramList, mode: LinearizeMode) -> Result<Option<String>> {
    let rendered = match mode {
        LinearizeMode::Chain => {
            if !is_chain(program) {
                return Ok(None);
            }
            list_to_str(program.tokens())
        }
        LinearizeMode::Prefix => list_to_str(&list_to_prefix(program)?),
        LinearizeMode::Postfix => list_to_str(&list_to_postfix(program)?),
    };
    Ok(Some(rendered))
}
