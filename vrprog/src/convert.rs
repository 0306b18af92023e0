//! Conversions between the four program encodings.
//!
//! Every conversion goes through [`ProgramTree`]:
//!
//! ```text
//!   list  <──>  tree  <──>  prefix
//!                 ^
//!                 └──────>  postfix
//! ```
//!
//! - [`list_to_tree`] / [`tree_to_list`] need no extra information: list inputs are explicit
//!   positions.
//! - [`tree_to_prefix`] / [`tree_to_postfix`] drop the structure and keep only the tokens.
//! - [`prefix_to_tree`] / [`postfix_to_tree`] recover the structure from an [`ArityTable`]. The
//!   flat sequence is read as a tiny grammar whose productions are given by the table: each
//!   token is followed (prefix) or preceded (postfix) by exactly as many complete sub-programs
//!   as its function consumes.
//!
//! All functions are pure and never recurse: traversals use an explicit stack, so the depth of
//! a program is limited by memory rather than by the call stack.
//!
//! Example
//! ```
//! use vrprog::arity::{ArityPolicy, ArityTable};
//! use vrprog::convert::{list_to_prefix, prefix_to_list};
//! use vrprog::program::{ProgramList, ProgramNode};
//! use vrprog::render::list_to_str;
//!
//! let list = ProgramList::new(vec![
//!     ProgramNode::new("scene", vec![]),
//!     ProgramNode::new("filter_color[red]", vec![0]),
//!     ProgramNode::new("count", vec![1]),
//! ]);
//! let prefix = list_to_prefix(&list).unwrap();
//! assert_eq!(list_to_str(&prefix), "count filter_color[red] scene");
//!
//! let arity = ArityTable::from_policy(&ArityPolicy::default(), ["scene", "filter_color", "count"]);
//! assert_eq!(prefix_to_list(&prefix, &arity).unwrap(), list);
//! ```
use log::trace;
use smallvec::SmallVec;

use crate::{
    arity::ArityTable,
    function::FunctionToken,
    program::{ProgramList, ProgramNode, ProgramTree},
    utils::{Error, Result},
};

/// Expand a list-form program into a tree, starting from its root (the last node).
///
/// A node referenced by several others is duplicated in the tree.
///
/// Errors
/// - [`Error::EmptyProgram`] if the list has no node.
/// - [`Error::InvalidInputIndex`] if an input does not refer to a strictly earlier position.
pub fn list_to_tree(list: &ProgramList) -> Result<ProgramTree> {
    enum Frame {
        Enter(usize),
        Exit(usize),
    }

    list.validate()?;
    let nodes = list.nodes();

    let mut stack: SmallVec<[Frame; 16]> = SmallVec::new();
    // Finished subtrees, in the order their parents expect them.
    let mut results: Vec<ProgramTree> = Vec::new();
    stack.push(Frame::Enter(nodes.len() - 1));

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(index) => {
                stack.push(Frame::Exit(index));
                stack.extend(nodes[index].inputs.iter().rev().map(|&i| Frame::Enter(i)));
            }
            Frame::Exit(index) => {
                let node = &nodes[index];
                let inputs = results.split_off(results.len() - node.inputs.len());
                results.push(ProgramTree::new(node.token.clone(), inputs));
            }
        }
    }

    trace!("Expanded list of {} node(s) into a tree", nodes.len());
    results.pop().ok_or(Error::EmptyProgram)
}

/// Flatten a tree into topological list form.
///
/// The root takes the last position. Below it, children are numbered in reverse argument order,
/// each child taking the next free position downward and its whole subtree being numbered
/// before its previous sibling. Every subtree therefore occupies a contiguous block of positions
/// ending at its root, and every input refers to a strictly earlier position.
pub fn tree_to_list(tree: &ProgramTree) -> ProgramList {
    let count = tree.node_count();

    // Nodes in numbering order, i.e. from position `count - 1` downward. Each stack entry
    // carries the (numbering order, argument slot) of the parent expecting it.
    let mut numbered: Vec<ProgramNode> = Vec::with_capacity(count);
    let mut stack: SmallVec<[(&ProgramTree, Option<(usize, usize)>); 16]> = SmallVec::new();
    stack.push((tree, None));

    while let Some((node, parent)) = stack.pop() {
        let position = count - 1 - numbered.len();
        if let Some((parent, slot)) = parent {
            numbered[parent].inputs[slot] = position;
        }

        let order = numbered.len();
        numbered.push(ProgramNode::new(node.token.clone(), vec![0; node.inputs.len()]));
        // The last child is popped first and therefore takes the highest free position.
        stack.extend(
            node.inputs
                .iter()
                .enumerate()
                .map(|(slot, child)| (child, Some((order, slot)))),
        );
    }

    numbered.reverse();
    trace!("Flattened tree of {count} node(s) into a list");
    ProgramList::new(numbered)
}

/// Pre-order token sequence: a node, then each of its children in order.
pub fn tree_to_prefix(tree: &ProgramTree) -> Vec<FunctionToken> {
    let mut output = Vec::new();
    let mut stack: SmallVec<[&ProgramTree; 16]> = SmallVec::new();
    stack.push(tree);

    while let Some(node) = stack.pop() {
        output.push(node.token.clone());
        stack.extend(node.inputs.iter().rev());
    }
    output
}

/// Post-order token sequence: the children of a node in order, then the node.
pub fn tree_to_postfix(tree: &ProgramTree) -> Vec<FunctionToken> {
    enum Frame<'a> {
        Enter(&'a ProgramTree),
        Exit(&'a ProgramTree),
    }

    let mut output = Vec::new();
    let mut stack: SmallVec<[Frame<'_>; 16]> = SmallVec::new();
    stack.push(Frame::Enter(tree));

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(node) => {
                stack.push(Frame::Exit(node));
                stack.extend(node.inputs.iter().rev().map(Frame::Enter));
            }
            Frame::Exit(node) => output.push(node.token.clone()),
        }
    }
    output
}

/// Rebuild a tree from its pre-order sequence.
///
/// Tokens are consumed from the front. Each token's function name is looked up in `arity` and
/// the following complete sub-programs become its children, in order.
///
/// Errors
/// - [`Error::UnknownFunction`] if a name is missing from `arity`.
/// - [`Error::EmptyProgram`] if `sequence` is empty.
/// - [`Error::UnexpectedEnd`] if the sequence ends while a node still expects children.
/// - [`Error::TrailingTokens`] if tokens remain once the root is complete.
pub fn prefix_to_tree(sequence: &[FunctionToken], arity: &ArityTable) -> Result<ProgramTree> {
    let tree = decode(sequence.iter(), arity, Direction::Prefix)?;
    trace!("Decoded prefix sequence of {} token(s)", sequence.len());
    Ok(tree)
}

/// Rebuild a tree from its post-order sequence.
///
/// Mirror of [`prefix_to_tree`]: tokens are consumed from the back, so the children of a node
/// are met last-to-first and are reversed before being attached. Errors are the same, with
/// leftover tokens sitting at the front of the sequence.
pub fn postfix_to_tree(sequence: &[FunctionToken], arity: &ArityTable) -> Result<ProgramTree> {
    let tree = decode(sequence.iter().rev(), arity, Direction::Postfix)?;
    trace!("Decoded postfix sequence of {} token(s)", sequence.len());
    Ok(tree)
}

pub fn list_to_prefix(list: &ProgramList) -> Result<Vec<FunctionToken>> {
    Ok(tree_to_prefix(&list_to_tree(list)?))
}

pub fn list_to_postfix(list: &ProgramList) -> Result<Vec<FunctionToken>> {
    Ok(tree_to_postfix(&list_to_tree(list)?))
}

pub fn prefix_to_list(sequence: &[FunctionToken], arity: &ArityTable) -> Result<ProgramList> {
    Ok(tree_to_list(&prefix_to_tree(sequence, arity)?))
}

pub fn postfix_to_list(sequence: &[FunctionToken], arity: &ArityTable) -> Result<ProgramList> {
    Ok(tree_to_list(&postfix_to_tree(sequence, arity)?))
}

/// Whether `list` is a single path from the root down to one leaf.
///
/// The walk starts at the root and follows the only input of each node. It stops with `false`
/// as soon as a node has two or more inputs, and with `true` at a node without input provided
/// every node of the list was met on the way. An empty list, or an input that does not point to
/// an earlier position, is not a chain.
pub fn is_chain(list: &ProgramList) -> bool {
    let nodes = list.nodes();
    let Some(mut current) = nodes.len().checked_sub(1) else {
        return false;
    };

    // Positions strictly decrease along the walk, so no node is visited twice.
    let mut visited = 1usize;
    loop {
        match nodes[current].inputs.as_slice() {
            [] => break,
            &[next] if next < current => {
                current = next;
                visited += 1;
            }
            _ => return false,
        }
    }
    visited == nodes.len()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Prefix,
    Postfix,
}

/// A node whose children are still being decoded.
struct Pending<'a> {
    token: &'a FunctionToken,
    arity: usize,
    inputs: Vec<ProgramTree>,
}

impl Pending<'_> {
    fn finish(mut self, direction: Direction) -> ProgramTree {
        if direction == Direction::Postfix {
            self.inputs.reverse();
        }
        ProgramTree::new(self.token.clone(), self.inputs)
    }
}

fn decode<'a, I>(mut tokens: I, arity: &ArityTable, direction: Direction) -> Result<ProgramTree>
where
    I: ExactSizeIterator<Item = &'a FunctionToken>,
{
    let total = tokens.len();
    let mut pending: SmallVec<[Pending<'a>; 16]> = SmallVec::new();

    let root = 'decode: loop {
        let Some(token) = tokens.next() else {
            return Err(match pending.last() {
                Some(waiting) => Error::UnexpectedEnd {
                    function: waiting.token.to_string(),
                    expected: waiting.arity,
                    found: waiting.inputs.len(),
                },
                None => Error::EmptyProgram,
            });
        };

        let expected = arity.arity_of(token)?;
        if expected > 0 {
            pending.push(Pending {
                token,
                arity: expected,
                inputs: Vec::with_capacity(expected),
            });
            continue;
        }

        // A leaf completes; hand it up until a parent still needs more children.
        let mut done = ProgramTree::leaf(token.clone());
        while let Some(mut parent) = pending.pop() {
            parent.inputs.push(done);
            if parent.inputs.len() < parent.arity {
                pending.push(parent);
                continue 'decode;
            }
            done = parent.finish(direction);
        }
        break 'decode done;
    };

    let remaining = tokens.len();
    if remaining > 0 {
        return Err(Error::TrailingTokens {
            consumed: total - remaining,
            remaining,
        });
    }
    Ok(root)
}
