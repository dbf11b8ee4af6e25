//! Access and storage modifiers.

use crate::{Declaration, Formatter};

/// Access level of a class or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// No modifier: visible within the package.
    #[default]
    Package,
}

impl Visibility {
    /// The keyword, or `None` for package access.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::Private => Some("private"),
            Self::Package => None,
        }
    }

    /// Check if this is a public visibility.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    /// Check if this is a private visibility.
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

/// Modifiers of a class, method or field.
///
/// Printed in the conventional order: visibility, `abstract`, `static`,
/// `final`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self::with_visibility(Visibility::Public)
    }

    pub fn protected() -> Self {
        Self::with_visibility(Visibility::Protected)
    }

    pub fn private() -> Self {
        Self::with_visibility(Visibility::Private)
    }

    pub fn package() -> Self {
        Self::default()
    }

    fn with_visibility(visibility: Visibility) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    /// Make this member static.
    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Make this member final.
    pub fn final_(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Make this member abstract.
    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }
}

impl Declaration for Modifiers {
    fn declare(&self, f: &mut Formatter) {
        if let Some(keyword) = self.visibility.keyword() {
            f.print(keyword);
        }
        if self.is_abstract {
            f.print("abstract");
        }
        if self.is_static {
            f.print("static");
        }
        if self.is_final {
            f.print("final");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodeModel;

    fn print(mods: Modifiers) -> String {
        let model = CodeModel::new();
        let mut f = Formatter::new(&model);
        f.declaration(&mods);
        f.finish().unwrap()
    }

    #[test]
    fn test_modifier_order() {
        assert_eq!(print(Modifiers::public().final_().static_()), "public static final");
        assert_eq!(print(Modifiers::protected().abstract_()), "protected abstract");
        assert_eq!(print(Modifiers::package().static_()), "static");
        assert_eq!(print(Modifiers::package()), "");
    }

    #[test]
    fn test_visibility() {
        assert!(Modifiers::public().visibility.is_public());
        assert!(Modifiers::private().visibility.is_private());
        assert_eq!(Visibility::default().keyword(), None);
    }
}
