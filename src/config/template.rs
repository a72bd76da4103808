//! `{{path|fallback}}` placeholders in block text.
//!
//! ```
//! use deckwright::config::{ConfigTree, Interpolator};
//! use serde_json::json;
//!
//! let tree = ConfigTree::new(json!({"association": {"method": "GNN"}}));
//! let interpolator = Interpolator::new("n/a");
//! let text = interpolator.render("method={{association.method|?}}", &tree);
//! assert_eq!(text.text, "method=GNN");
//! ```

use super::{ConfigBinding, ConfigTree};
use regex::{Captures, Regex};
use serde_json::Value;

/// Text with its placeholders substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Substituted text
    pub text: String,
    /// Placeholders whose path resolved
    pub resolved: u32,
    /// Placeholders that fell back
    pub fallbacks: u32,
}

/// Substitutes configuration values into text.
///
/// A placeholder is `{{dotted.path}}` or `{{dotted.path|fallback}}`. Without
/// an explicit fallback the interpolator's default is used.
#[derive(Debug, Clone)]
pub struct Interpolator {
    pattern: Regex,
    default_fallback: String,
}

impl Interpolator {
    /// Create an interpolator with a default fallback.
    pub fn new(default_fallback: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(r"\{\{\s*([A-Za-z0-9_\-.]+)\s*(?:\|([^}]*))?\}\}")
                .expect("placeholder pattern is valid"),
            default_fallback: default_fallback.into(),
        }
    }

    /// The fallback used by placeholders that do not name one.
    pub fn default_fallback(&self) -> &str {
        &self.default_fallback
    }

    /// Check if text contains any placeholder.
    pub fn has_placeholders(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Substitute every placeholder in `text`.
    pub fn render(&self, text: &str, tree: &ConfigTree) -> Rendered {
        let mut resolved = 0;
        let mut fallbacks = 0;
        let output = self.pattern.replace_all(text, |caps: &Captures| {
            let binding = self.binding(caps);
            let value = stringify(binding.resolve(tree));
            if binding.is_bound(tree) {
                resolved += 1;
            } else {
                fallbacks += 1;
                log::warn!(
                    "Config path '{}' not found, using fallback '{}'",
                    binding.path,
                    value
                );
            }
            value
        });
        Rendered {
            text: output.into_owned(),
            resolved,
            fallbacks,
        }
    }

    /// Binding for one matched placeholder.
    fn binding(&self, caps: &Captures) -> ConfigBinding {
        let fallback = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .unwrap_or(self.default_fallback.as_str());
        ConfigBinding::new(&caps[1], fallback)
    }
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new("n/a")
    }
}

/// String form of a configuration value for inline text.
///
/// Strings are inserted verbatim; everything else uses compact JSON.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
