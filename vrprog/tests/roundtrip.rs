use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use vrprog::prelude::*;

const LEAVES: &[&str] = &["scene"];
const UNARY: &[&str] = &[
    "unique",
    "count",
    "exist",
    "relate[left]",
    "relate[behind]",
    "filter_color[red]",
    "filter_shape[cube]",
    "query_material",
    "same_size",
];
const BINARY: &[&str] = &[
    "union",
    "intersect",
    "equal_integer",
    "less_than",
    "greater_than",
    "equal_color",
];

fn arity() -> ArityTable {
    let names = LEAVES
        .iter()
        .chain(UNARY)
        .chain(BINARY)
        .map(|s| FunctionToken::parse(s).function);
    ArityTable::from_policy(&ArityPolicy::default(), names)
}

fn random_tree(budget: usize, rng: &mut impl Rng) -> ProgramTree {
    if budget == 0 || rng.random_bool(0.15) {
        return ProgramTree::leaf(LEAVES[rng.random_range(0..LEAVES.len())]);
    }

    if rng.random_bool(0.25) {
        let name = BINARY[rng.random_range(0..BINARY.len())];
        let left = random_tree(budget - 1, rng);
        let right = random_tree(budget - 1, rng);
        ProgramTree::new(name, vec![left, right])
    } else {
        let name = UNARY[rng.random_range(0..UNARY.len())];
        ProgramTree::new(name, vec![random_tree(budget - 1, rng)])
    }
}

fn random_trees(seed: u64, count: usize) -> Vec<ProgramTree> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    (0..count).map(|_| random_tree(8, &mut rng)).collect()
}

#[test]
fn list_roundtrip_preserves_tree() {
    for tree in random_trees(0x42, 200) {
        let list = tree_to_list(&tree);
        assert_eq!(list.len(), tree.node_count());
        assert_eq!(list_to_tree(&list).expect("generated list is valid"), tree);
    }
}

#[test]
fn generated_lists_are_topological() {
    for tree in random_trees(0x1337, 200) {
        let list = tree_to_list(&tree);
        assert_eq!(list.root().map(|n| &n.token), Some(&tree.token));
        for (position, node) in list.iter().enumerate() {
            assert!(node.inputs.iter().all(|&input| input < position));
        }
    }
}

#[test]
fn prefix_roundtrip_preserves_tree() {
    let arity = arity();
    for tree in random_trees(7, 200) {
        let prefix = tree_to_prefix(&tree);
        assert_eq!(prefix.len(), tree.node_count());
        assert_eq!(prefix_to_tree(&prefix, &arity).unwrap(), tree);
    }
}

#[test]
fn postfix_roundtrip_preserves_tree() {
    let arity = arity();
    for tree in random_trees(8, 200) {
        let postfix = tree_to_postfix(&tree);
        assert_eq!(postfix.len(), tree.node_count());
        assert_eq!(postfix_to_tree(&postfix, &arity).unwrap(), tree);
    }
}

#[test]
fn every_pair_of_encodings_roundtrips_through_strings() {
    let arity = arity();
    for tree in random_trees(9, 100) {
        let list = tree_to_list(&tree);

        let prefix = program_to_str(&list, LinearizeMode::Prefix).unwrap().unwrap();
        let from_prefix = prefix_to_list(&str_to_program(&prefix), &arity).unwrap();
        assert_eq!(from_prefix, list);

        let postfix = program_to_str(&list, LinearizeMode::Postfix).unwrap().unwrap();
        let from_postfix = postfix_to_list(&str_to_program(&postfix), &arity).unwrap();
        assert_eq!(from_postfix, list);

        let prefix_again = list_to_prefix(&from_postfix).unwrap();
        assert_eq!(list_to_str(&prefix_again), prefix);
    }
}

#[test]
fn deep_chain_does_not_overflow_the_stack() {
    let depth = 100_000;
    let nodes = std::iter::once(ProgramNode::new("scene", vec![]))
        .chain((1..depth).map(|i| ProgramNode::new("unique", vec![i - 1])))
        .collect::<ProgramList>();
    assert!(is_chain(&nodes));

    let prefix = list_to_prefix(&nodes).unwrap();
    let postfix = list_to_postfix(&nodes).unwrap();
    assert_eq!(prefix.len(), depth);
    assert_eq!(prefix_to_list(&prefix, &arity()).unwrap(), nodes);
    assert_eq!(postfix_to_list(&postfix, &arity()).unwrap(), nodes);
}
