//! Indentation detection.

/// Infers the indentation width of a YAML text.
///
/// Collects the leading-space count of every indented line and returns their
/// greatest common divisor. Lines indented with tabs, or with a tab right after
/// the spaces, are ignored. Returns 2 when no line is indented.
///
/// # Example
///
/// ```
/// use yays::file::indent::detect_indentation;
///
/// assert_eq!(detect_indentation("a:\n    b:\n        c: 1\n"), 4);
/// assert_eq!(detect_indentation("a: 1\n"), 2);
/// ```
pub fn detect_indentation(source: &str) -> usize {
    let mut indent = 0;

    for line in source.split('\n') {
        if line.is_empty() || line.starts_with('\t') {
            continue;
        }
        let spaces = line.len() - line.trim_start_matches(' ').len();
        if spaces == 0 || line[spaces..].starts_with('\t') {
            continue;
        }
        indent = if indent == 0 {
            spaces
        } else {
            gcd(indent, spaces)
        };
    }

    if indent == 0 {
        2
    } else {
        indent
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
