//! Indentation and line-ending configuration.

use serde::{Deserialize, Serialize};

/// Indentation style for generated code.
///
/// In TOML this is written `indent = "tab"` or `indent = { spaces = 2 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, the usual Java style.
    pub const JAVA: Self = Self::Spaces(4);

    /// Append one indentation level to `buf`.
    pub fn push_to(&self, buf: &mut String) {
        match self {
            Self::Spaces(width) => buf.extend(std::iter::repeat_n(' ', usize::from(*width))),
            Self::Tab => buf.push('\t'),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JAVA
    }
}

/// Line terminator written into rendered sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}
