//! End-to-end sorting scenarios: parse, apply paths, serialize.

use yays::document::parser::parse_document;
use yays::file::saver::serialize_document;
use yays::sort::{apply_all, ApplyError, SortMode};
use yays::yamlpath::ResolveError;

const PERSON: &str = "name: John Doe
age: 30
is_student: false
gpa: 3.85
";

const FRUITS: &str = "- name: Banana
  price: 30
  colour: Yellow
- name: Strawberry
  price: 10
  colour: Red
- name: Apple
  price: 20
  colour: Red
- name: Orange
  price: 30
  colour: Orange
";

/// Sorts `input` at each of `paths` with `mode` and returns the YAML text.
fn sort_yaml(input: &str, paths: &[&str], mode: SortMode) -> String {
    let mut doc = parse_document(input).unwrap();
    let requests: Vec<(&str, SortMode)> = paths.iter().map(|p| (*p, mode)).collect();
    apply_all(&mut doc, &requests).unwrap();
    serialize_document(&doc, 2)
}

#[test]
fn test_default_mapping_sorts_keys_alphanumerically() {
    assert_eq!(
        sort_yaml(PERSON, &["."], SortMode::Alphanumeric),
        "age: 30
gpa: 3.85
is_student: false
name: John Doe
"
    );
}

#[test]
fn test_human_mapping_sorts_keys_nicely() {
    assert_eq!(
        sort_yaml(PERSON, &["."], SortMode::Human),
        "name: John Doe
age: 30
gpa: 3.85
is_student: false
"
    );
}

#[test]
fn test_default_sequence_sorts_elements_alphanumerically() {
    assert_eq!(
        sort_yaml(
            "- Banana\n- Strawberry\n- Apple\n- Orange\n",
            &["."],
            SortMode::Alphanumeric
        ),
        "- Apple\n- Banana\n- Orange\n- Strawberry\n"
    );
}

#[test]
fn test_sequence_of_objects_sorts_by_first_field() {
    assert_eq!(
        sort_yaml(FRUITS, &["."], SortMode::Alphanumeric),
        "- name: Apple
  price: 20
  colour: Red
- name: Banana
  price: 30
  colour: Yellow
- name: Orange
  price: 30
  colour: Orange
- name: Strawberry
  price: 10
  colour: Red
"
    );
}

#[test]
fn test_object_at_index_is_sorted_alone() {
    assert_eq!(
        sort_yaml(FRUITS, &[".[2]"], SortMode::Alphanumeric),
        "- name: Banana
  price: 30
  colour: Yellow
- name: Strawberry
  price: 10
  colour: Red
- colour: Red
  name: Apple
  price: 20
- name: Orange
  price: 30
  colour: Orange
"
    );
}

#[test]
fn test_wildcard_sorts_every_object_but_not_the_sequence() {
    assert_eq!(
        sort_yaml(FRUITS, &[".[*]"], SortMode::Alphanumeric),
        "- colour: Yellow
  name: Banana
  price: 30
- colour: Red
  name: Strawberry
  price: 10
- colour: Red
  name: Apple
  price: 20
- colour: Orange
  name: Orange
  price: 30
"
    );
}

#[test]
fn test_human_wildcard_puts_name_first() {
    assert_eq!(
        sort_yaml(FRUITS, &[".[*]"], SortMode::Human),
        "- name: Banana
  colour: Yellow
  price: 30
- name: Strawberry
  colour: Red
  price: 10
- name: Apple
  colour: Red
  price: 20
- name: Orange
  colour: Orange
  price: 30
"
    );
}

#[test]
fn test_paths_apply_in_order() {
    assert_eq!(
        sort_yaml(FRUITS, &[".", "[*]"], SortMode::Alphanumeric),
        "- colour: Red
  name: Apple
  price: 20
- colour: Yellow
  name: Banana
  price: 30
- colour: Orange
  name: Orange
  price: 30
- colour: Red
  name: Strawberry
  price: 10
"
    );
}

#[test]
fn test_sorting_is_idempotent() {
    let nested = "items:
  - meta:
      z: 1
      name: x
  - meta:
      kind: k
      b: 2
";
    let cases = [(FRUITS, "."), (FRUITS, "[*]"), (PERSON, "."), (nested, "items[*].meta")];
    for mode in [SortMode::Alphanumeric, SortMode::Human] {
        for (input, path) in cases {
            let once = sort_yaml(input, &[path], mode);
            assert_eq!(sort_yaml(input, &[path, path], mode), once, "{} {}", path, mode);
            assert_eq!(sort_yaml(&once, &[path], mode), once, "{} {}", path, mode);
        }
    }
}

#[test]
fn test_empty_path_equals_dot() {
    assert_eq!(
        sort_yaml(PERSON, &[""], SortMode::Alphanumeric),
        sort_yaml(PERSON, &["."], SortMode::Alphanumeric)
    );
}

#[test]
fn test_equal_sequence_keys_keep_input_order() {
    let input = "- id: same\n  n: 1\n- id: same\n  n: 2\n- id: a\n  n: 3\n";
    assert_eq!(
        sort_yaml(input, &["."], SortMode::Alphanumeric),
        "- id: a\n  n: 3\n- id: same\n  n: 1\n- id: same\n  n: 2\n"
    );
}

#[test]
fn test_kubernetes_manifest_human_order() {
    let input = "spec:
  replicas: 2
  selector:
    app: web
metadata:
  namespace: prod
  name: web
  labels:
    tier: frontend
    app: web
kind: Deployment
apiVersion: apps/v1
";
    assert_eq!(
        sort_yaml(input, &[".", "metadata", "metadata.labels"], SortMode::Human),
        "apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: prod
  labels:
    app: web
    tier: frontend
spec:
  replicas: 2
  selector:
    app: web
"
    );
}

#[test]
fn test_mid_path_wildcard() {
    let input = "items:
  - meta:
      z: 1
      a: 2
  - meta:
      y: 1
      b: 2
";
    assert_eq!(
        sort_yaml(input, &["items[*].meta"], SortMode::Alphanumeric),
        "items:
  - meta:
      a: 2
      z: 1
  - meta:
      b: 2
      y: 1
"
    );
}

#[test]
fn test_numeric_key_addresses_sequence_element() {
    let input = "servers:\n  - name: a\n    roles: [web, db, cache]\n";
    assert_eq!(
        sort_yaml(input, &["servers.0.roles"], SortMode::Alphanumeric),
        "servers:\n  - name: a\n    roles: [cache, db, web]\n"
    );
}

#[test]
fn test_wildcard_over_mapping_skips_scalars() {
    let input = "version: 3\nb:\n  y: 1\n  x: 2\nlist: [c, a]\n";
    assert_eq!(
        sort_yaml(input, &["[*]"], SortMode::Alphanumeric),
        "version: 3\nb:\n  x: 2\n  y: 1\nlist: [a, c]\n"
    );
}

#[test]
fn test_missing_key_names_the_key() {
    let mut doc = parse_document("clients: []\n").unwrap();
    let err = apply_all(&mut doc, &[("servers[0].roles", SortMode::Alphanumeric)]).unwrap_err();
    match &err {
        ApplyError::Navigation { path, source } => {
            assert_eq!(path, "servers[0].roles");
            assert!(matches!(source, ResolveError::KeyNotFound { key, .. } if key == "servers"));
        }
        other => panic!("Expected navigation error, got {:?}", other),
    }
    assert!(err.to_string().contains("\"servers\""));
}

#[test]
fn test_scalar_target_is_an_error_without_wildcard() {
    let mut doc = parse_document("name: x\n").unwrap();
    let err = apply_all(&mut doc, &[("name", SortMode::Alphanumeric)]).unwrap_err();
    assert!(matches!(err, ApplyError::UnsortableTarget { .. }));
}

#[test]
fn test_values_round_trip_unchanged() {
    let input = "z: 0x1F\ny: '007'\nx: 1.10\nw: \"quoted\"\nv: yes\nu: ~\n";
    assert_eq!(
        sort_yaml(input, &["."], SortMode::Alphanumeric),
        "u: ~\nv: yes\nw: \"quoted\"\nx: 1.10\ny: '007'\nz: 0x1F\n"
    );
}

#[test]
fn test_indent_width_is_respected() {
    let mut doc = parse_document("b:\n    d: 1\n    c: 2\na: 1\n").unwrap();
    apply_all(&mut doc, &[(".", SortMode::Alphanumeric), ("b", SortMode::Alphanumeric)]).unwrap();
    assert_eq!(serialize_document(&doc, 4), "a: 1\nb:\n    c: 2\n    d: 1\n");
}
