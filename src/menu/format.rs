//! Text formatting seam used for titles, bodies and labels.

use super::UserId;

/// Turns a message pattern into display text for one user.
///
/// Implementations decide what a pattern is: a literal string, a message
/// key in a localization bundle, or anything else. The menu engine passes
/// patterns through verbatim.
pub trait TextFormatter: Send + Sync {
    fn format(&self, user: &UserId, pattern: &str, values: &[String]) -> String;
}

/// Formatter that treats every pattern as literal text.
///
/// Only positional placeholders are substituted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl TextFormatter for PlainFormatter {
    fn format(&self, _user: &UserId, pattern: &str, values: &[String]) -> String {
        substitute(pattern, values)
    }
}

/// Replace `{0}`, `{1}`, ... in `pattern` with the matching value.
///
/// Placeholders without a matching value are left untouched.
pub fn substitute(pattern: &str, values: &[String]) -> String {
    if values.is_empty() || !pattern.contains('{') {
        return pattern.to_string();
    }

    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];

        let value = tail.find('}').and_then(|end| {
            let index: usize = tail[..end].parse().ok()?;
            values.get(index).map(|value| (value, end))
        });

        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_substitute_positional() {
        let out = substitute("{0} has {1} coins", &strings(&["alice", "12"]));
        assert_eq!(out, "alice has 12 coins");
    }

    #[test]
    fn test_substitute_repeated_and_reordered() {
        let out = substitute("{1}-{0}-{1}", &strings(&["a", "b"]));
        assert_eq!(out, "b-a-b");
    }

    #[test]
    fn test_substitute_leaves_unknown() {
        let out = substitute("{0} {5} {name} {", &strings(&["x"]));
        assert_eq!(out, "x {5} {name} {");
    }

    #[test]
    fn test_substitute_without_values() {
        assert_eq!(substitute("{0}", &[]), "{0}");
    }

    #[test]
    fn test_plain_formatter() {
        let formatter = PlainFormatter;
        let out = formatter.format(&UserId::new("u"), "Page {0}", &strings(&["2"]));
        assert_eq!(out, "Page 2");
    }
}
