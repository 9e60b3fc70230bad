//! In-place sorting of mapping and sequence nodes.
//!
//! Both sorts are stable. Only the order of a node's direct children changes; the
//! children themselves, including the key order inside sequence elements, are left
//! untouched.

use super::rank::{rank, SortMode};
use crate::document::node::{YamlNode, YamlValue};

/// Sorts a mapping's pairs by `(rank, key text)`. Other node kinds are left as is.
///
/// # Example
///
/// ```
/// use yays::document::node::YamlNode;
/// use yays::sort::rank::SortMode;
/// use yays::sort::sorter::sort_mapping;
///
/// let mut node = YamlNode::mapping(vec![
///     (YamlNode::plain("spec"), YamlNode::plain("x")),
///     (YamlNode::plain("kind"), YamlNode::plain("Pod")),
/// ]);
/// sort_mapping(&mut node, SortMode::Human);
/// assert_eq!(node.keys(), vec!["kind", "spec"]);
/// ```
pub fn sort_mapping(node: &mut YamlNode, mode: SortMode) {
    if let YamlValue::Mapping(entries) = node.value_mut() {
        entries.sort_by_cached_key(|(key, _)| {
            let text = key_text(key);
            (rank(&text, mode), text)
        });
    }
}

/// Sorts a sequence's elements by their first-field comparison key. Other node
/// kinds are left as is.
pub fn sort_sequence_by_first_field(node: &mut YamlNode) {
    if let YamlValue::Sequence(items) = node.value_mut() {
        items.sort_by_cached_key(first_field_key);
    }
}

/// Returns the comparison key of a sequence element.
///
/// For a non-empty mapping this is the rendering of its first pair's value;
/// anything else is rendered whole.
pub fn first_field_key(node: &YamlNode) -> String {
    match node.value() {
        YamlValue::Mapping(entries) if !entries.is_empty() => comparable_string(&entries[0].1),
        _ => comparable_string(node),
    }
}

/// Produces a deterministic text rendering of a node for comparisons.
///
/// Scalars render as their literal text, mappings as `{k:v,k:v}` in their current
/// key order, sequences as `[v,v]` and aliases as `*name`.
pub fn comparable_string(node: &YamlNode) -> String {
    let mut out = String::new();
    render(node, &mut out);
    out
}

fn render(node: &YamlNode, out: &mut String) {
    match node.value() {
        YamlValue::Scalar(scalar) => out.push_str(&scalar.text),
        YamlValue::Alias(name) => {
            out.push('*');
            out.push_str(name);
        }
        YamlValue::Mapping(entries) => {
            out.push('{');
            for (i, (key, value)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                render(key, out);
                out.push(':');
                render(value, out);
            }
            out.push('}');
        }
        YamlValue::Sequence(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                render(item, out);
            }
            out.push(']');
        }
    }
}

fn key_text(key: &YamlNode) -> String {
    match key.scalar_text() {
        Some(text) => text.to_string(),
        None => comparable_string(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> YamlNode {
        YamlNode::mapping(vec![
            (YamlNode::plain("name"), YamlNode::plain("John Doe")),
            (YamlNode::plain("age"), YamlNode::plain("30")),
            (YamlNode::plain("is_student"), YamlNode::plain("false")),
            (YamlNode::plain("gpa"), YamlNode::plain("3.85")),
        ])
    }

    fn fruit(name: &str, price: &str) -> YamlNode {
        YamlNode::mapping(vec![
            (YamlNode::plain("name"), YamlNode::plain(name)),
            (YamlNode::plain("price"), YamlNode::plain(price)),
        ])
    }

    #[test]
    fn test_sort_mapping_alphanumeric() {
        let mut node = person();
        sort_mapping(&mut node, SortMode::Alphanumeric);
        assert_eq!(node.keys(), vec!["age", "gpa", "is_student", "name"]);
    }

    #[test]
    fn test_sort_mapping_human() {
        let mut node = person();
        sort_mapping(&mut node, SortMode::Human);
        assert_eq!(node.keys(), vec!["name", "age", "gpa", "is_student"]);
    }

    #[test]
    fn test_sort_mapping_human_kubernetes_keys() {
        let mut node = YamlNode::mapping(vec![
            (YamlNode::plain("spec"), YamlNode::plain("")),
            (YamlNode::plain("metadata"), YamlNode::plain("")),
            (YamlNode::plain("kind"), YamlNode::plain("Deployment")),
            (YamlNode::plain("apiVersion"), YamlNode::plain("apps/v1")),
            (YamlNode::plain("data"), YamlNode::plain("")),
        ]);
        sort_mapping(&mut node, SortMode::Human);
        assert_eq!(
            node.keys(),
            vec!["apiVersion", "kind", "metadata", "data", "spec"]
        );
    }

    #[test]
    fn test_rank_ties_break_lexicographically_not_by_input() {
        let mut node = YamlNode::mapping(vec![
            (YamlNode::plain("zeta"), YamlNode::plain("1")),
            (YamlNode::plain("alpha"), YamlNode::plain("2")),
        ]);
        sort_mapping(&mut node, SortMode::Human);
        assert_eq!(node.keys(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_sort_mapping_keeps_values_with_keys() {
        let mut node = person();
        sort_mapping(&mut node, SortMode::Alphanumeric);
        assert_eq!(node.get("name").unwrap().scalar_text(), Some("John Doe"));
        assert_eq!(node.child(0).unwrap().scalar_text(), Some("30"));
    }

    #[test]
    fn test_sort_mapping_ignores_other_kinds() {
        let mut node = YamlNode::sequence(vec![YamlNode::plain("b"), YamlNode::plain("a")]);
        sort_mapping(&mut node, SortMode::Alphanumeric);
        assert_eq!(node.child(0).unwrap().scalar_text(), Some("b"));
    }

    #[test]
    fn test_sort_sequence_of_scalars() {
        let mut node = YamlNode::sequence(vec![
            YamlNode::plain("Banana"),
            YamlNode::plain("Strawberry"),
            YamlNode::plain("Apple"),
        ]);
        sort_sequence_by_first_field(&mut node);
        assert_eq!(comparable_string(&node), "[Apple,Banana,Strawberry]");
    }

    #[test]
    fn test_sort_sequence_by_first_field_keeps_inner_order() {
        let mut node = YamlNode::sequence(vec![
            fruit("Banana", "30"),
            fruit("Apple", "20"),
            fruit("Orange", "30"),
        ]);
        sort_sequence_by_first_field(&mut node);
        let names: Vec<_> = (0..3)
            .map(|i| first_field_key(node.child(i).unwrap()))
            .collect();
        assert_eq!(names, vec!["Apple", "Banana", "Orange"]);
        assert_eq!(node.child(0).unwrap().keys(), vec!["name", "price"]);
    }

    #[test]
    fn test_sort_sequence_is_stable() {
        let mut node = YamlNode::sequence(vec![
            fruit("same", "first"),
            fruit("same", "second"),
            fruit("a", "third"),
        ]);
        sort_sequence_by_first_field(&mut node);
        let prices: Vec<_> = (0..3)
            .map(|i| {
                node.child(i)
                    .unwrap()
                    .get("price")
                    .unwrap()
                    .scalar_text()
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(prices, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_comparable_string_nested() {
        let node = YamlNode::mapping(vec![
            (YamlNode::plain("a"), YamlNode::plain("1")),
            (
                YamlNode::plain("b"),
                YamlNode::sequence(vec![YamlNode::plain("x"), YamlNode::plain("y")]),
            ),
        ]);
        assert_eq!(comparable_string(&node), "{a:1,b:[x,y]}");
    }

    #[test]
    fn test_first_field_key_of_empty_mapping() {
        assert_eq!(first_field_key(&YamlNode::mapping(vec![])), "{}");
    }

    #[test]
    fn test_first_field_key_of_nested_value() {
        let node = YamlNode::mapping(vec![(
            YamlNode::plain("meta"),
            YamlNode::mapping(vec![(YamlNode::plain("id"), YamlNode::plain("7"))]),
        )]);
        assert_eq!(first_field_key(&node), "{id:7}");
    }
}
