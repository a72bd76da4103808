//! Dotted-path lookups into a loaded configuration tree.

use crate::error::Result;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Read-only runtime configuration, consumed only through dotted paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    root: Value,
}

impl ConfigTree {
    /// Wrap an already parsed value.
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// An empty tree; every lookup misses.
    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    /// Load a JSON configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let tree = Self::from_json_str(&text)?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(tree)
    }

    /// Parse a JSON configuration string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    /// The underlying value.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Look up a dotted path.
    ///
    /// Returns `None` as soon as a segment is missing or an intermediate
    /// value is not a mapping. Arrays are not indexed.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.root, |node, segment| node.as_object()?.get(segment))
    }

    /// Look up a dotted path, returning `fallback` on any miss.
    pub fn resolve<'a>(&'a self, path: &str, fallback: &'a Value) -> &'a Value {
        self.lookup(path).unwrap_or(fallback)
    }

    /// Check if a dotted path resolves.
    pub fn contains(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for ConfigTree {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

/// A dotted path paired with the value to use when it is absent.
///
/// The fallback is chosen per call site: descriptive text usually uses
/// `"n/a"`, terse numeric labels use `"?"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigBinding {
    /// Dotted path, e.g. `association.jpda.clutterDensity`
    pub path: String,
    /// Value returned when the path does not resolve
    pub fallback: Value,
}

impl ConfigBinding {
    /// Create a binding.
    pub fn new(path: impl Into<String>, fallback: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            fallback: fallback.into(),
        }
    }

    /// Resolve against a tree. Never fails.
    pub fn resolve<'a>(&'a self, tree: &'a ConfigTree) -> &'a Value {
        tree.resolve(&self.path, &self.fallback)
    }

    /// Check if the path is present in the tree.
    pub fn is_bound(&self, tree: &ConfigTree) -> bool {
        tree.contains(&self.path)
    }
}
