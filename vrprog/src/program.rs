//! The list and tree forms of a program.
//!
//! - [`ProgramList`] is the index-addressed, topologically ordered form used on disk. Every
//!   structural input is the position of an earlier node; the last node is the root.
//! - [`ProgramTree`] owns its children. It is the canonical in-memory form through which all
//!   conversions go (see [`crate::convert`]).
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    function::FunctionToken,
    utils::{Error, Result},
};

/// One node of a list-form program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProgramNode {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub token: FunctionToken,
    /// Positions of the nodes whose results feed this one, in argument order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inputs: Vec<usize>,
}

impl ProgramNode {
    pub fn new(token: impl Into<FunctionToken>, inputs: Vec<usize>) -> Self {
        Self {
            token: token.into(),
            inputs,
        }
    }
}

/// A program in topological list form.
///
/// The wrapper does not enforce the ordering invariant on construction, so that records can be
/// loaded as-is; [`ProgramList::validate`] and every conversion out of the list form check it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ProgramList {
    nodes: Vec<ProgramNode>,
}

impl ProgramList {
    pub fn new(nodes: Vec<ProgramNode>) -> Self {
        Self { nodes }
    }

    /// The output node, i.e. the last one.
    pub fn root(&self) -> Option<&ProgramNode> {
        self.nodes.last()
    }

    pub fn nodes(&self) -> &[ProgramNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<ProgramNode> {
        self.nodes
    }

    /// Iterate over the function tokens in list order.
    pub fn tokens(&self) -> impl Iterator<Item = &FunctionToken> {
        self.nodes.iter().map(|node| &node.token)
    }

    /// Check that the list is non-empty and that every structural input refers to a strictly
    /// earlier position.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyProgram);
        }

        for (position, node) in self.nodes.iter().enumerate() {
            if let Some(&input) = node.inputs.iter().find(|&&input| input >= position) {
                return Err(Error::InvalidInputIndex {
                    node: position,
                    input,
                    len: self.nodes.len(),
                });
            }
        }
        Ok(())
    }
}

impl Deref for ProgramList {
    type Target = [ProgramNode];

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}

impl From<Vec<ProgramNode>> for ProgramList {
    fn from(nodes: Vec<ProgramNode>) -> Self {
        Self { nodes }
    }
}

impl FromIterator<ProgramNode> for ProgramList {
    fn from_iter<T: IntoIterator<Item = ProgramNode>>(iter: T) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ProgramList {
    type Item = ProgramNode;
    type IntoIter = std::vec::IntoIter<ProgramNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ProgramList {
    type Item = &'a ProgramNode;
    type IntoIter = std::slice::Iter<'a, ProgramNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// A program as a tree of owned nodes.
///
/// There is no sharing: a sub-result referenced twice in list form appears as two independent
/// subtrees here.
///
/// The conversions in [`crate::convert`], the helpers below and `Drop` walk the tree with an
/// explicit stack. The derived `Clone`, `PartialEq`, `Hash` and `Debug` are recursive, which
/// assumes trees a few thousand levels deep at most; CLEVR programs stay below depth 30.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProgramTree {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub token: FunctionToken,
    /// Child programs, in argument order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inputs: Vec<ProgramTree>,
}

impl ProgramTree {
    pub fn new(token: impl Into<FunctionToken>, inputs: Vec<ProgramTree>) -> Self {
        Self {
            token: token.into(),
            inputs,
        }
    }

    /// A node with no structural input.
    pub fn leaf(token: impl Into<FunctionToken>) -> Self {
        Self::new(token, Vec::new())
    }

    /// Total number of nodes, this one included.
    pub fn node_count(&self) -> usize {
        let mut stack: SmallVec<[&ProgramTree; 16]> = SmallVec::new();
        stack.push(self);
        let mut count = 0usize;
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.inputs.iter());
        }
        count
    }

    /// Number of nodes on the longest root-to-leaf path. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut stack: SmallVec<[(&ProgramTree, usize); 16]> = SmallVec::new();
        stack.push((self, 1));
        let mut depth = 0usize;
        while let Some((node, level)) = stack.pop() {
            depth = depth.max(level);
            stack.extend(node.inputs.iter().map(|child| (child, level + 1)));
        }
        depth
    }

    pub fn is_leaf(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl Drop for ProgramTree {
    fn drop(&mut self) {
        // Detach descendants first so that each node is dropped with no children left.
        let mut stack = std::mem::take(&mut self.inputs);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.inputs);
        }
    }
}
