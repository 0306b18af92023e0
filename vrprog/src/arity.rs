//! Arity tables and the policy used to build them.
//!
//! The prefix and postfix forms carry no structure, so decoding them needs to know how many
//! structural inputs each function consumes. An [`ArityTable`] maps a function *name* (value
//! inputs are ignored) to that count. Tables are normally derived from the names observed in a
//! corpus of programs through an [`ArityPolicy`].
use std::collections::BTreeMap;
#[cfg(feature = "toml")]
use std::path::Path;

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    function::FunctionToken,
    program::ProgramList,
    utils::{Error, Result},
};

/// Read-only mapping from function name to the number of structural inputs it consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ArityTable {
    entries: BTreeMap<String, usize>,
}

impl ArityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table by applying `policy` to every name in `names`. Duplicates are fine.
    pub fn from_policy<I, S>(policy: &ArityPolicy, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table: Self = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                (name.to_string(), policy.arity(name))
            })
            .collect();
        debug!(
            "Built arity table with {} function name(s) from policy",
            table.len()
        );
        table
    }

    /// Build a table covering every function name used by `programs`.
    pub fn for_programs<'a, I>(policy: &ArityPolicy, programs: I) -> Self
    where
        I: IntoIterator<Item = &'a ProgramList>,
    {
        Self::from_policy(
            policy,
            programs
                .into_iter()
                .flat_map(|program| program.tokens().map(FunctionToken::name)),
        )
    }

    /// Set the arity of `name`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, arity: usize) -> Option<usize> {
        self.entries.insert(name.into(), arity)
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.get(name).copied()
    }

    /// Arity of the function named by `token`, ignoring its value inputs.
    pub fn arity_of(&self, token: &FunctionToken) -> Result<usize> {
        self.get(token.name())
            .ok_or_else(|| Error::UnknownFunction(token.name().to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, &arity)| (name.as_str(), arity))
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for ArityTable {
    fn from_iter<T: IntoIterator<Item = (S, usize)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, arity)| (name.into(), arity))
                .collect(),
        }
    }
}

/// Rules assigning an arity to a function name.
///
/// Rules are tried in order:
/// 1. names listed in `leaf_names` take no structural input;
/// 2. names listed in `binary_names`, or containing one of `binary_substrings`, take two;
/// 3. everything else takes `default_arity`.
///
/// The default policy matches the CLEVR function set: `scene` is the only leaf, every
/// `equal_*` comparison as well as `union`, `intersect`, `less_than` and `greater_than` are
/// binary, and all filters, queries and relations are unary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ArityPolicy {
    pub leaf_names: Vec<String>,
    pub binary_names: Vec<String>,
    pub binary_substrings: Vec<String>,
    pub default_arity: usize,
}

impl Default for ArityPolicy {
    fn default() -> Self {
        Self {
            leaf_names: vec!["scene".to_string()],
            binary_names: ["union", "intersect", "less_than", "greater_than"]
                .into_iter()
                .map(String::from)
                .collect(),
            binary_substrings: vec!["equal".to_string()],
            default_arity: 1,
        }
    }
}

impl ArityPolicy {
    /// Number of structural inputs the policy assigns to `name`.
    pub fn arity(&self, name: &str) -> usize {
        if self.leaf_names.iter().any(|leaf| leaf == name) {
            0
        } else if self.binary_names.iter().any(|binary| binary == name)
            || self
                .binary_substrings
                .iter()
                .any(|pattern| name.contains(pattern.as_str()))
        {
            2
        } else {
            self.default_arity
        }
    }

    /// Parse a policy from TOML text. Missing keys take their default value.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| Error::PolicyParse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a policy from a TOML file.
    #[cfg(feature = "toml")]
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let policy = Self::from_toml_str(&source, &path.display().to_string())?;
        debug!("Loaded arity policy from `{}`", path.display());
        Ok(policy)
    }
}
