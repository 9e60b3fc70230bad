//! YAML path string parser.
//!
//! A path is split on `.` into tokens. A token is either a key (`servers`), a key
//! followed by bracket selectors (`servers[0]`, `matrix[0][*]`) or bare selectors
//! applied to the current node (`[*]`). Empty tokens from leading, trailing or doubled
//! dots are skipped, so `""`, `"."` and `".[0]"` are all valid.

use super::ast::{Step, YamlPath};
use super::error::PathParseError;

/// Parser for YAML path strings.
pub struct Parser;

impl Parser {
    /// Parses a path string into a `YamlPath`.
    ///
    /// Numeric keys such as `servers.0` are kept as `Step::Key`; whether they index a
    /// sequence is decided when the path is resolved against a document.
    pub fn parse(path: &str) -> Result<YamlPath, PathParseError> {
        let path = path.trim();
        let mut steps = Vec::new();
        if path.is_empty() || path == "." {
            return Ok(YamlPath::new(steps));
        }

        for token in path.split('.') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            parse_token(token, &mut steps)?;
        }

        Ok(YamlPath::new(steps))
    }
}

/// Parses one dot-separated token, appending its steps.
fn parse_token(token: &str, steps: &mut Vec<Step>) -> Result<(), PathParseError> {
    let unmatched = || PathParseError::UnmatchedBracket {
        token: token.to_string(),
    };

    let (name, mut rest) = match token.find('[') {
        Some(open) => (token[..open].trim(), &token[open..]),
        None => (token, ""),
    };
    if name.contains(']') {
        return Err(unmatched());
    }
    if !name.is_empty() {
        steps.push(Step::Key(name.to_string()));
    }

    while !rest.is_empty() {
        let close = rest.find(']').ok_or_else(unmatched)?;
        let inner = &rest[1..close];
        if inner.contains('[') {
            return Err(unmatched());
        }
        steps.push(parse_selector(inner)?);

        rest = rest[close + 1..].trim_start();
        if !rest.is_empty() && !rest.starts_with('[') {
            return Err(if rest.contains(']') && !rest.contains('[') {
                unmatched()
            } else {
                PathParseError::TrailingCharacters {
                    token: token.to_string(),
                }
            });
        }
    }

    Ok(())
}

/// Parses the content of a bracket selector: `*` or a non-negative integer.
fn parse_selector(inner: &str) -> Result<Step, PathParseError> {
    let selector = inner.trim();
    if selector == "*" {
        return Ok(Step::Wildcard);
    }
    if let Some(index) = parse_index(selector) {
        return Ok(Step::Index(index));
    }
    Err(PathParseError::InvalidSelector {
        selector: selector.to_string(),
    })
}

/// Reads a sequence index: ASCII digits only, so signs and whitespace are rejected.
pub(crate) fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> Step {
        Step::Key(name.to_string())
    }

    #[test]
    fn test_parse_root_forms() {
        assert!(Parser::parse("").unwrap().is_root());
        assert!(Parser::parse(".").unwrap().is_root());
        assert!(Parser::parse("  .  ").unwrap().is_root());
    }

    #[test]
    fn test_parse_keys() {
        let path = Parser::parse("spec.template.metadata").unwrap();
        assert_eq!(
            path.steps,
            vec![key("spec"), key("template"), key("metadata")]
        );
    }

    #[test]
    fn test_parse_skips_empty_tokens() {
        let path = Parser::parse(".spec..containers.").unwrap();
        assert_eq!(path.steps, vec![key("spec"), key("containers")]);
    }

    #[test]
    fn test_parse_key_with_index() {
        let path = Parser::parse("servers[0].roles").unwrap();
        assert_eq!(
            path.steps,
            vec![key("servers"), Step::Index(0), key("roles")]
        );
    }

    #[test]
    fn test_parse_mid_path_wildcard() {
        let path = Parser::parse("items[*].meta").unwrap();
        assert_eq!(path.steps, vec![key("items"), Step::Wildcard, key("meta")]);
    }

    #[test]
    fn test_parse_bare_selectors() {
        assert_eq!(Parser::parse(".[2]").unwrap().steps, vec![Step::Index(2)]);
        assert_eq!(Parser::parse("[*]").unwrap().steps, vec![Step::Wildcard]);
    }

    #[test]
    fn test_parse_chained_selectors() {
        let path = Parser::parse("matrix[0][*]").unwrap();
        assert_eq!(path.steps, vec![key("matrix"), Step::Index(0), Step::Wildcard]);
    }

    #[test]
    fn test_parse_whitespace_in_brackets() {
        let path = Parser::parse("items[ * ]").unwrap();
        assert_eq!(path.steps, vec![key("items"), Step::Wildcard]);
    }

    #[test]
    fn test_parse_numeric_token_stays_key() {
        let path = Parser::parse("servers.0.roles").unwrap();
        assert_eq!(path.steps, vec![key("servers"), key("0"), key("roles")]);
    }

    #[test]
    fn test_parse_invalid_selector() {
        let err = Parser::parse("items[abc]").unwrap_err();
        assert_eq!(
            err,
            PathParseError::InvalidSelector {
                selector: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_parse_negative_index_fails() {
        assert!(matches!(
            Parser::parse("items[-1]"),
            Err(PathParseError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_parse_index_digits_only() {
        assert_eq!(parse_index("12"), Some(12));
        assert_eq!(parse_index("+1"), None);
        assert_eq!(parse_index("-0"), None);
        assert_eq!(parse_index(""), None);
        assert!(Parser::parse("items[+1]").is_err());
    }

    #[test]
    fn test_parse_empty_selector_fails() {
        assert!(matches!(
            Parser::parse("items[]"),
            Err(PathParseError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_parse_unmatched_brackets() {
        assert!(matches!(
            Parser::parse("items[0"),
            Err(PathParseError::UnmatchedBracket { .. })
        ));
        assert!(matches!(
            Parser::parse("items]"),
            Err(PathParseError::UnmatchedBracket { .. })
        ));
        assert!(matches!(
            Parser::parse("items[[0]]"),
            Err(PathParseError::UnmatchedBracket { .. })
        ));
    }

    #[test]
    fn test_parse_trailing_characters() {
        assert!(matches!(
            Parser::parse("items[0]x"),
            Err(PathParseError::TrailingCharacters { .. })
        ));
    }
}
