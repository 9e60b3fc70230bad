//! Integration tests for path parsing and resolution against parsed documents.

use yays::document::node::NodeKind;
use yays::document::parser::parse_document;
use yays::yamlpath::{Evaluator, Parser, PathParseError, ResolveError, Step};

const INVENTORY: &str = "servers:
  - name: alpha
    roles: [web, db]
  - name: beta
    roles: [cache]
items:
  - a
  - b
  - c
";

#[test]
fn test_parse_display_round_trip() {
    for path in ["servers[0].roles", "items[*].meta", "matrix[0][*]", "a.b.c"] {
        assert_eq!(Parser::parse(path).unwrap().to_string(), path);
    }
    assert_eq!(Parser::parse("").unwrap().to_string(), ".");
    assert_eq!(Parser::parse("[*]").unwrap().to_string(), ".[*]");
}

#[test]
fn test_parse_error_names_offending_text() {
    let err = Parser::parse("items[x1]").unwrap_err();
    assert_eq!(
        err,
        PathParseError::InvalidSelector {
            selector: "x1".to_string()
        }
    );
    assert!(err.to_string().contains("\"x1\""));
}

#[test]
fn test_wildcard_fan_out_follows_sequence_order() {
    let doc = parse_document(INVENTORY).unwrap();
    let path = Parser::parse("items[*]").unwrap();
    let nodes = Evaluator::new(doc.root()).resolve_nodes(&path).unwrap();
    let texts: Vec<_> = nodes.iter().map(|n| n.scalar_text().unwrap()).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn test_resolve_mid_path_index_and_key() {
    let doc = parse_document(INVENTORY).unwrap();
    let path = Parser::parse("servers[1].roles").unwrap();
    let targets = Evaluator::new(doc.root()).resolve(&path).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].location, "servers[1].roles");
    let node = doc.get_node(&targets[0].path).unwrap();
    assert_eq!(node.kind(), NodeKind::Sequence);
    assert_eq!(node.len(), 1);
}

#[test]
fn test_nested_wildcards_concatenate_in_order() {
    let doc = parse_document(INVENTORY).unwrap();
    let path = Parser::parse("servers[*].roles[*]").unwrap();
    let nodes = Evaluator::new(doc.root()).resolve_nodes(&path).unwrap();
    let texts: Vec<_> = nodes.iter().map(|n| n.scalar_text().unwrap()).collect();
    assert_eq!(texts, vec!["web", "db", "cache"]);
}

#[test]
fn test_index_out_of_range_reports_length() {
    let doc = parse_document(INVENTORY).unwrap();
    let path = Parser::parse("items[3]").unwrap();
    let err = Evaluator::new(doc.root()).resolve(&path).unwrap_err();
    assert_eq!(
        err,
        ResolveError::IndexOutOfRange {
            location: "items".to_string(),
            index: 3,
            len: 3
        }
    );
}

#[test]
fn test_key_on_scalar_is_not_a_mapping() {
    let doc = parse_document(INVENTORY).unwrap();
    let path = Parser::parse("items.0.name").unwrap();
    let err = Evaluator::new(doc.root()).resolve(&path).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::NotAMapping {
            kind: NodeKind::Scalar,
            ..
        }
    ));
}

#[test]
fn test_steps_of_mixed_path() {
    let path = Parser::parse(" .spec.containers[*].env ").unwrap();
    assert_eq!(
        path.steps,
        vec![
            Step::Key("spec".to_string()),
            Step::Key("containers".to_string()),
            Step::Wildcard,
            Step::Key("env".to_string()),
        ]
    );
}
