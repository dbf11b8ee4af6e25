//! Descriptors of externally compiled classes.

use serde::{Deserialize, Serialize};

/// What kind of type a class declaration introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl ClassKind {
    /// The keyword that introduces a declaration of this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "@interface",
        }
    }

    /// Interfaces and annotations are both interface types.
    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }
}

/// One externally compiled class, as the host runtime reports it.
///
/// Supertypes are stored by binary name and resolved lazily by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    /// Binary name, e.g. `java.util.Map$Entry`.
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Binary name of the superclass; `None` for the root type and interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    /// Binary name of the enclosing class when it cannot be read off the `$`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_class: Option<String>,
}

impl ClassInfo {
    /// A concrete class extending `java.lang.Object`.
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            is_abstract: false,
            superclass: Some(crate::OBJECT.to_string()),
            interfaces: Vec::new(),
            declaring_class: None,
        }
    }

    /// An interface (always abstract, no superclass).
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Interface,
            is_abstract: true,
            superclass: None,
            interfaces: Vec::new(),
            declaring_class: None,
        }
    }

    /// Set the superclass by binary name.
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Remove the superclass (only the root type has none).
    pub fn root(mut self) -> Self {
        self.superclass = None;
        self
    }

    /// Add an implemented interface by binary name.
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    /// Name the enclosing class explicitly.
    pub fn declared_in(mut self, outer: impl Into<String>) -> Self {
        self.declaring_class = Some(outer.into());
        self
    }

    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }
}
