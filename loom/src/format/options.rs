//! Formatter settings, loadable from TOML.

use serde::{Deserialize, Serialize};
use typeloom_catalog::JAVA_LANG;

use super::{Indent, LineEnding};
use crate::{Error, Result};

/// Settings of a [`Formatter`](super::Formatter).
///
/// # Example
///
/// ```
/// use typeloom::{FormatOptions, Indent};
///
/// let options = FormatOptions::from_toml_str(r#"
///     indent = "tab"
///     never_import = ["java.util.Date"]
/// "#).unwrap();
///
/// assert_eq!(options.indent, Indent::Tab);
/// assert_eq!(options.implicit_packages, vec!["java.lang"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    pub indent: Indent,
    pub line_ending: LineEnding,
    /// Packages whose classes are visible without an import.
    pub implicit_packages: Vec<String>,
    /// Fully-qualified names that are always written out in full.
    pub never_import: Vec<String>,
}

impl FormatOptions {
    /// Parse options from TOML; missing keys keep their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).map_err(|source| Error::InvalidOptions { source }.into())
    }

    /// Indentation of one nesting level.
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Line ending of the printed text.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Never import `full_name`, even when its simple name is unambiguous.
    pub fn never_import(mut self, full_name: impl Into<String>) -> Self {
        self.never_import.push(full_name.into());
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            line_ending: LineEnding::default(),
            implicit_packages: vec![JAVA_LANG.to_string()],
            never_import: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            FormatOptions::from_toml_str("").unwrap(),
            FormatOptions::default()
        );
    }

    #[test]
    fn test_full_toml() {
        let options = FormatOptions::from_toml_str(
            r#"
            indent = { spaces = 2 }
            line_ending = "crlf"
            implicit_packages = ["java.lang", "com.acme.prelude"]
            never_import = ["java.util.Date"]
            "#,
        )
        .unwrap();

        assert_eq!(options.indent, Indent::Spaces(2));
        assert_eq!(options.line_ending, LineEnding::CrLf);
        assert_eq!(options.implicit_packages.len(), 2);
        assert_eq!(options.never_import, vec!["java.util.Date"]);
    }

    #[test]
    fn test_unknown_key() {
        let err = FormatOptions::from_toml_str("tabs = true").unwrap_err();
        assert!(matches!(*err, Error::InvalidOptions { .. }));
    }
}
