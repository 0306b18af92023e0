use std::str::FromStr;

use strum::IntoEnumIterator;
use vrprog::prelude::*;

fn chain_list() -> ProgramList {
    ProgramList::new(vec![
        ProgramNode::new("scene", vec![]),
        ProgramNode::new("filter_color[red]", vec![0]),
        ProgramNode::new("filter_shape[sphere]", vec![1]),
        ProgramNode::new("count", vec![2]),
    ])
}

fn compare_list() -> ProgramList {
    ProgramList::new(vec![
        ProgramNode::new("scene", vec![]),
        ProgramNode::new("filter_color[red]", vec![0]),
        ProgramNode::new("count", vec![1]),
        ProgramNode::new("scene", vec![]),
        ProgramNode::new("filter_color[blue]", vec![3]),
        ProgramNode::new("count", vec![4]),
        ProgramNode::new("greater_than", vec![2, 5]),
    ])
}

#[test]
fn chain_mode_renders_list_order() {
    let rendered = program_to_str(&chain_list(), LinearizeMode::Chain).unwrap();
    assert_eq!(
        rendered.as_deref(),
        Some("scene filter_color[red] filter_shape[sphere] count")
    );
}

#[test]
fn chain_mode_skips_branching_programs() {
    assert_eq!(
        program_to_str(&compare_list(), LinearizeMode::Chain).unwrap(),
        None
    );
}

#[test]
fn prefix_and_postfix_modes() {
    let list = compare_list();
    assert_eq!(
        program_to_str(&list, LinearizeMode::Prefix).unwrap().unwrap(),
        "greater_than count filter_color[red] scene count filter_color[blue] scene"
    );
    assert_eq!(
        program_to_str(&list, LinearizeMode::Postfix).unwrap().unwrap(),
        "scene filter_color[red] count scene filter_color[blue] count greater_than"
    );
}

#[test]
fn malformed_list_fails_in_flat_modes_only() {
    let broken = ProgramList::new(vec![
        ProgramNode::new("scene", vec![]),
        ProgramNode::new("count", vec![3]),
    ]);
    assert_eq!(program_to_str(&broken, LinearizeMode::Chain).unwrap(), None);
    assert!(program_to_str(&broken, LinearizeMode::Prefix).is_err());
    assert!(program_to_str(&broken, LinearizeMode::Postfix).is_err());
}

#[test]
fn program_string_roundtrip() {
    let tokens = list_to_prefix(&compare_list()).unwrap();
    let text = list_to_str(&tokens);
    assert_eq!(str_to_program(&text), tokens);
    assert!(str_to_program("   ").is_empty());
}

#[test]
fn linearize_mode_names() {
    let names: Vec<String> = LinearizeMode::iter().map(|m| m.to_string()).collect();
    assert_eq!(names, ["chain", "prefix", "postfix"]);
    assert_eq!(LinearizeMode::from_str("postfix").unwrap(), LinearizeMode::Postfix);
    assert!(LinearizeMode::from_str("infix").is_err());
    assert_eq!(LinearizeMode::default(), LinearizeMode::Prefix);
}

#[test]
fn codec_roundtrip_for_clevr_tokens() {
    for text in [
        "scene",
        "filter_material[rubber]",
        "relate[front]",
        "same_shape",
        "equal_integer",
        "custom[a,b,c]",
    ] {
        let token = str_to_function(text);
        assert_eq!(function_to_str(&token), text);
        assert_eq!(str_to_function(&function_to_str(&token)), token);
    }
}

#[test]
fn default_policy_matches_clevr_functions() {
    let policy = ArityPolicy::default();
    assert_eq!(policy.arity("scene"), 0);
    for binary in [
        "union",
        "intersect",
        "less_than",
        "greater_than",
        "equal_integer",
        "equal_color",
        "equal_material",
    ] {
        assert_eq!(policy.arity(binary), 2, "`{binary}` should be binary");
    }
    for unary in ["count", "exist", "unique", "relate", "filter_size", "same_color", "query_shape"] {
        assert_eq!(policy.arity(unary), 1, "`{unary}` should be unary");
    }
}

#[test]
fn leaf_rule_wins_over_binary_rule() {
    let policy = ArityPolicy {
        leaf_names: vec!["equal_scene".to_string()],
        ..ArityPolicy::default()
    };
    assert_eq!(policy.arity("equal_scene"), 0);
    assert_eq!(policy.arity("equal_shape"), 2);
}

#[test]
fn table_from_programs_strips_value_inputs() {
    let table = ArityTable::for_programs(&ArityPolicy::default(), [&chain_list(), &compare_list()]);
    let names: Vec<_> = table.iter().collect();
    assert_eq!(
        names,
        [
            ("count", 1),
            ("filter_color", 1),
            ("filter_shape", 1),
            ("greater_than", 2),
            ("scene", 0),
        ]
    );
    assert_eq!(table.arity_of(&str_to_function("filter_color[green]")).unwrap(), 1);
    assert!(table.arity_of(&str_to_function("relate[left]")).is_err());
}

#[test]
fn table_insert_and_lookup() {
    let mut table = ArityTable::new();
    assert!(table.is_empty());
    assert_eq!(table.insert("scene", 0), None);
    assert_eq!(table.insert("scene", 1), Some(0));
    assert_eq!(table.get("scene"), Some(1));
    assert!(table.contains("scene"));
    assert_eq!(table.get("count"), None);
    assert_eq!(table.len(), 1);
}

#[cfg(feature = "toml")]
#[test]
fn policy_from_toml_keeps_defaults_for_missing_keys() {
    let policy = ArityPolicy::from_toml_str(
        r#"
binary_names = ["union", "intersect", "relate_pair"]
default_arity = 1
"#,
        "inline",
    )
    .expect("valid policy");
    assert_eq!(policy.arity("relate_pair"), 2);
    assert_eq!(policy.arity("less_than"), 1);
    assert_eq!(policy.arity("equal_size"), 2);
    assert_eq!(policy.arity("scene"), 0);
}

#[cfg(feature = "toml")]
#[test]
fn policy_rejects_unknown_keys() {
    let err = ArityPolicy::from_toml_str("leaf = [\"scene\"]", "inline").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.is_policy_parse());
}

#[cfg(feature = "toml")]
#[test]
fn policy_missing_file_is_io_error() {
    let err = ArityPolicy::load_from_toml(std::path::Path::new("/nonexistent/policy.toml"))
        .unwrap_err();
    assert!(err.is_io());
}
