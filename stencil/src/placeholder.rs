//! Placeholder derivation and substitution
//!
//! A [`PlaceholderMap`] is a pure function of one input name: the same name
//! always yields the same token table. Substitution is a plain string
//! replacement pass; markers that are not in the table are left verbatim.

use convert_case::{Case, Casing};

use crate::error::{Result, ScaffoldError};

/// Token replaced by the verbatim name
pub const TOKEN_NAME: &str = "{{module_name}}";

/// Token replaced by the Pascal-case transform of the name
pub const TOKEN_CAMEL: &str = "{{ModuleNameToCamelCase}}";

/// Substitution table derived from a single scaffold name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(&'static str, String)>,
}

impl PlaceholderMap {
    /// Derive the token table for `name`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] when `name` is empty or
    /// contains characters outside letters, digits, hyphen, and underscore.
    pub fn derive(name: &str) -> Result<Self> {
        if !is_valid_name(name) {
            return Err(ScaffoldError::InvalidName(name.to_string()));
        }

        let camel = name.to_case(Case::Pascal);
        Ok(Self {
            entries: vec![(TOKEN_NAME, name.to_string()), (TOKEN_CAMEL, camel)],
        })
    }

    /// Replace every known token in `input`
    ///
    /// Unknown `{{...}}` markers are not an error and pass through untouched.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        let mut out = input.to_string();
        for (token, value) in &self.entries {
            out = out.replace(token, value);
        }
        out
    }

    /// Iterate over `(token, replacement)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries
            .iter()
            .map(|(token, value)| (*token, value.as_str()))
    }
}

/// Check a name against the identifier-safe pattern
///
/// Accepted characters are ASCII letters, digits, hyphen, and underscore;
/// the name must be non-empty.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Normalize an arbitrary name to `snake_case`
///
/// Module names are expected in snake case; hyphenated or camel-cased input
/// is converted rather than rejected, and the caller decides whether to warn.
#[must_use]
pub fn normalize_module_name(name: &str) -> String {
    name.to_case(Case::Snake)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let a = PlaceholderMap::derive("my-cool-module").unwrap();
        let b = PlaceholderMap::derive("my-cool-module").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_segment_is_capitalized() {
        let map = PlaceholderMap::derive("hello").unwrap();
        assert_eq!(map.apply(TOKEN_CAMEL), "Hello");
    }

    #[test]
    fn separators_become_pascal_case() {
        let map = PlaceholderMap::derive("my-cool-module").unwrap();
        assert_eq!(map.apply(TOKEN_CAMEL), "MyCoolModule");

        let map = PlaceholderMap::derive("hello_world").unwrap();
        assert_eq!(map.apply(TOKEN_CAMEL), "HelloWorld");
    }

    #[test]
    fn verbatim_token_keeps_the_raw_name() {
        let map = PlaceholderMap::derive("hello-world").unwrap();
        assert_eq!(map.apply(TOKEN_NAME), "hello-world");
    }

    #[test]
    fn apply_substitutes_content() {
        let map = PlaceholderMap::derive("hello-world").unwrap();
        let rendered = map.apply("class {{ModuleNameToCamelCase}}: pass");
        assert_eq!(rendered, "class HelloWorld: pass");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let map = PlaceholderMap::derive("demo").unwrap();
        assert_eq!(map.apply("{{not_a_token}}"), "{{not_a_token}}");
    }

    #[test]
    fn invalid_names_are_rejected() {
        for name in ["", "my module", "my.module", "my/module", "héllo"] {
            assert!(
                PlaceholderMap::derive(name).is_err(),
                "name should be invalid: {name:?}"
            );
        }
    }

    #[test]
    fn valid_names_are_accepted() {
        for name in ["a", "my-module", "my_module", "Module2", "_private"] {
            assert!(is_valid_name(name), "name should be valid: {name:?}");
        }
    }

    #[test]
    fn normalize_handles_common_shapes() {
        assert_eq!(normalize_module_name("my-module"), "my_module");
        assert_eq!(normalize_module_name("MyModule"), "my_module");
        assert_eq!(normalize_module_name("already_snake"), "already_snake");
    }
}
