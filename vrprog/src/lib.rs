//! vrprog: encodings of visual reasoning programs and conversions between them.
//!
//! A CLEVR-style program is a small functional expression over a scene, for instance
//! `count(filter_color[red](scene))`. The same program has four equivalent encodings:
//! - a topological list whose nodes reference earlier positions ([`program::ProgramList`]),
//!   which is how programs are stored on disk;
//! - a tree of owned nodes ([`program::ProgramTree`]), the in-memory pivot of every conversion;
//! - a pre-order token sequence ("prefix");
//! - a post-order token sequence ("postfix").
//!
//! The flat sequences do not record structure; decoding them needs an [`arity::ArityTable`]
//! giving the number of structural inputs of every function name.
//!
//! Example
//! ```
//! use vrprog::prelude::*;
//!
//! let list = ProgramList::new(vec![
//!     ProgramNode::new("scene", vec![]),
//!     ProgramNode::new("filter_color[red]", vec![0]),
//!     ProgramNode::new("scene", vec![]),
//!     ProgramNode::new("filter_color[blue]", vec![2]),
//!     ProgramNode::new("union", vec![1, 3]),
//!     ProgramNode::new("count", vec![4]),
//! ]);
//! assert!(!is_chain(&list));
//!
//! let postfix = program_to_str(&list, LinearizeMode::Postfix).unwrap().unwrap();
//! assert_eq!(postfix, "scene filter_color[red] scene filter_color[blue] union count");
//!
//! let arity = ArityTable::for_programs(&ArityPolicy::default(), [&list]);
//! let decoded = postfix_to_list(&str_to_program(&postfix), &arity).unwrap();
//! assert_eq!(decoded, list);
//! ```

/// Arity tables and the policy deriving them from function names.
pub mod arity;
/// Conversions between the list, tree, prefix and postfix encodings.
pub mod convert;
/// Function tokens and their `name[v1,v2]` textual form.
pub mod function;
/// List and tree forms of a program.
pub mod program;
/// Space-separated program strings.
pub mod render;
/// Error type shared by the crate.
pub mod utils;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::arity::{ArityPolicy, ArityTable};
    pub use crate::convert::{
        is_chain, list_to_postfix, list_to_prefix, list_to_tree, postfix_to_list,
        postfix_to_tree, prefix_to_list, prefix_to_tree, tree_to_list, tree_to_postfix,
        tree_to_prefix,
    };
    pub use crate::function::{FunctionToken, function_to_str, str_to_function};
    pub use crate::program::{ProgramList, ProgramNode, ProgramTree};
    pub use crate::render::{LinearizeMode, list_to_str, program_to_str, str_to_program};
    pub use crate::utils::{Error, ErrorKind, Result};
}
