// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Scalar accepted for a `:name` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum PathValue {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
}

impl Display for PathValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for PathValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PathValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for PathValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for PathValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u64> for PathValue {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<f64> for PathValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathParams(BTreeMap<String, PathValue>);

impl PathParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PathValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PathValue>) {
        self.0.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PathValue> {
        self.0.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<PathValue>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

fn is_param_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Splits `template` at the next `:name` token: (literal prefix, name, remainder).
fn next_placeholder(template: &str) -> Option<(&str, &str, &str)> {
    let idx = template.find(':')?;
    let after = &template[idx + 1..];
    let len = after.find(|c: char| !is_param_char(c)).unwrap_or(after.len());
    Some((&template[..idx], &after[..len], &after[len..]))
}

/// Placeholder names in template order, duplicates kept.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = template;
    while let Some((_, name, tail)) = next_placeholder(rest) {
        if !name.is_empty() {
            out.push(name);
        }
        rest = tail;
    }
    out
}

/// Substitutes every `:name` with a matching entry in `params`.
///
/// Single left-to-right pass: substituted values are never rescanned, and
/// placeholders without a matching key are copied through untouched. Values
/// are not percent-encoded.
#[must_use]
pub fn build_path(template: &str, params: &PathParams) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((literal, name, tail)) = next_placeholder(rest) {
        out.push_str(literal);
        match params.get(name) {
            Some(value) if !name.is_empty() => out.push_str(&value.to_string()),
            _ => {
                out.push(':');
                out.push_str(name);
            }
        }
        rest = tail;
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_slug() {
        let params = PathParams::new().with("slug", "abc");
        assert_eq!(build_path("/api/posts/:slug", &params), "/api/posts/abc");
    }

    #[test]
    fn missing_param_leaves_placeholder() {
        assert_eq!(
            build_path("/api/posts/:slug", &PathParams::new()),
            "/api/posts/:slug"
        );
        let params = PathParams::new().with("id", 4_i64);
        assert_eq!(build_path("/api/posts/:slug", &params), "/api/posts/:slug");
    }

    #[test]
    fn numbers_render_like_their_display_form() {
        let params = PathParams::new()
            .with("id", 42_i64)
            .with("page", 2.0_f64)
            .with("ratio", 0.5_f64);
        assert_eq!(build_path("/x/:id/:page/:ratio", &params), "/x/42/2/0.5");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let params = PathParams::new().with("a", ":b").with("b", "nope");
        assert_eq!(build_path("/:a", &params), "/:b");
    }

    #[test]
    fn placeholder_names_stop_at_non_identifier_chars() {
        let params = PathParams::new().with("slug", "abc");
        assert_eq!(build_path("/p/:slug.json", &params), "/p/abc.json");
        assert_eq!(build_path("/p/:slugx", &params), "/p/:slugx");
        assert_eq!(placeholders("/a/:x/b/:y_2/:"), vec!["x", "y_2"]);
    }

    #[test]
    fn no_escaping_is_applied() {
        let params = PathParams::new().with("slug", "a b/c");
        assert_eq!(build_path("/api/posts/:slug", &params), "/api/posts/a b/c");
    }
}
