//! Label matching and serialization
//!
//! Labels travel through the inventory in their canonical `key=value` form.
//! Filter tokens come in two shapes: a whole pair ("env=prod") matching by
//! exact key and value, or a bare fragment ("prod") matching by substring
//! containment against the serialized pair. Matching is case-sensitive.

use cumulus_api::Label;

/// Serialize labels to their canonical `key=value` strings, preserving order.
#[must_use]
pub fn format_labels(labels: &[Label]) -> Vec<String> {
    labels
        .iter()
        .map(|label| format!("{}={}", label.key, label.value))
        .collect()
}

/// Does one filter token match one label?
#[must_use]
pub fn token_matches(token: &str, label: &Label) -> bool {
    match token.split_once('=') {
        Some((key, value)) => label.key == key && label.value == value,
        None => format!("{}={}", label.key, label.value).contains(token),
    }
}

/// Does any token match any label?
///
/// OR semantics on both axes: a server qualifies as soon as one token
/// matches one of its labels. Deliberately looser than tag filtering, which
/// requires every tag.
#[must_use]
pub fn matches_any(tokens: &[String], labels: &[Label]) -> bool {
    tokens
        .iter()
        .any(|token| labels.iter().any(|label| token_matches(token, label)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(key: &str, value: &str) -> Label {
        Label {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn pair_token_requires_exact_key_and_value() {
        assert!(token_matches("foo=bar", &label("foo", "bar")));
        assert!(!token_matches("foo=ba", &label("foo", "bar")));
        assert!(!token_matches("fo=bar", &label("foo", "bar")));
    }

    #[test]
    fn bare_token_matches_key_or_value_fragment() {
        assert!(token_matches("foo", &label("foo", "bar")));
        assert!(token_matches("bar", &label("foo", "bar")));
        assert!(token_matches("o=b", &label("foo", "bar")));
        assert!(!token_matches("baz", &label("foo", "bar")));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!token_matches("Foo", &label("foo", "bar")));
        assert!(!token_matches("foo=BAR", &label("foo", "bar")));
    }

    #[test]
    fn any_token_qualifies() {
        let labels = [label("role", "db"), label("env", "prod")];
        let tokens = vec!["missing".to_string(), "env=prod".to_string()];
        assert!(matches_any(&tokens, &labels));

        let tokens = vec!["missing".to_string(), "also-missing".to_string()];
        assert!(!matches_any(&tokens, &labels));
    }

    #[test]
    fn empty_label_set_never_matches() {
        assert!(!matches_any(&["foo".to_string()], &[]));
    }

    #[test]
    fn formats_in_order() {
        let labels = [label("foo", "bar"), label("private", "yes")];
        assert_eq!(format_labels(&labels), vec!["foo=bar", "private=yes"]);
    }
}
