//! Compilation options.

use indexmap::IndexSet;
use serde::Deserialize;

/// Configuration for one compilation.
///
/// The discard options control which matched values are consumed during
/// parsing but excluded from the emitted types and constructed values. The
/// preamble/postamble overrides replace the built-in F# boilerplate.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Omit literal-only matches from emitted shapes.
    pub(crate) discard_literals: bool,
    /// Rule names always treated as silent.
    pub(crate) discard_named: IndexSet<String>,
    /// Any rule name or alias target starting with this prefix is silent.
    pub(crate) discard_prefix: String,
    /// Replacement for the built-in preamble text.
    pub(crate) preamble: Option<String>,
    /// Replacement for the built-in postamble text.
    pub(crate) postamble: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discard_literals: true,
            discard_named: IndexSet::new(),
            discard_prefix: "_".to_string(),
            preamble: None,
            postamble: None,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether literal-only matches are omitted from emitted shapes.
    pub fn discard_literals(mut self, value: bool) -> Self {
        self.discard_literals = value;
        self
    }

    /// Add a rule name that is always treated as silent.
    pub fn discard_named(mut self, name: impl Into<String>) -> Self {
        self.discard_named.insert(name.into());
        self
    }

    /// Set the silent-rule name prefix.
    pub fn discard_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.discard_prefix = prefix.into();
        self
    }

    /// Replace the built-in preamble text.
    pub fn preamble(mut self, text: impl Into<String>) -> Self {
        self.preamble = Some(text.into());
        self
    }

    /// Replace the built-in postamble text.
    pub fn postamble(mut self, text: impl Into<String>) -> Self {
        self.postamble = Some(text.into());
        self
    }
}
