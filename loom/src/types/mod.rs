//! Type handles and the data stored behind them.
//!
//! Every type lives in its model's arena and is addressed by a [`TypeId`].
//! Two handles denote the same type exactly when they are equal: the model
//! interns referenced classes, narrowed types, arrays and wildcards, so
//! structurally equal types always share one id.

mod hierarchy;
mod narrow;
mod substitute;
mod type_var;

use std::fmt;

use typeloom_catalog::{ClassInfo, ClassKind, Primitive};

pub use self::hierarchy::Interfaces;
use crate::{ModelId, generics::Generics};

/// Handle to a type owned by one [`CodeModel`](crate::CodeModel).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId {
    owner: ModelId,
    index: u32,
}

impl TypeId {
    pub(crate) fn new(owner: ModelId, index: u32) -> Self {
        Self { owner, index }
    }

    /// The model this type belongs to.
    pub fn owner(&self) -> ModelId {
        self.owner
    }

    pub(crate) fn index(&self) -> usize {
        self.index as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({}:{})", self.owner, self.index)
    }
}

/// Direction of a wildcard bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardMode {
    /// `? extends X`
    Extends,
    /// `? super X`
    Super,
}

impl WildcardMode {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Extends => "extends",
            Self::Super => "super",
        }
    }
}

/// The variant of a type, as seen from outside the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A primitive such as `int` or `void`.
    Primitive,
    /// The type of the `null` literal.
    Null,
    /// A class served by the model's class resolver.
    Referenced,
    /// A class known only by its fully-qualified name.
    Direct,
    /// A class declared in this model.
    Defined,
    /// A type variable such as `T`.
    TypeVar,
    /// A type variable standing for an existing class.
    TypeVarClass,
    /// A parameterized type such as `List<String>`.
    Narrowed,
    /// An array type.
    Array,
    /// A wildcard type argument.
    Wildcard,
    /// An inert placeholder that must never be printed.
    Error,
}

impl TypeKind {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array)
    }

    /// Reference types are everything a variable of class type can hold.
    pub fn is_reference(&self) -> bool {
        !matches!(self, Self::Primitive | Self::Error)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Kinds the printer registers by simple name when deciding imports.
    pub(crate) fn is_importable(&self) -> bool {
        matches!(self, Self::Referenced | Self::Direct | Self::Defined)
    }
}

/// A class authored in the model.
#[derive(Debug, Clone)]
pub(crate) struct DefinedClass {
    pub package: String,
    pub name: String,
    pub outer: Option<TypeId>,
    pub kind: ClassKind,
    pub is_abstract: bool,
    pub generics: Generics,
    pub superclass: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
}

#[derive(Debug, Clone)]
pub(crate) enum TypeData {
    Primitive(Primitive),
    Null,
    Referenced(ClassInfo),
    Direct {
        full_name: String,
    },
    Defined(DefinedClass),
    TypeVar {
        name: String,
        bound: Option<TypeId>,
    },
    TypeVarClass {
        wrapped: TypeId,
    },
    Narrowed {
        basis: TypeId,
        args: Vec<TypeId>,
    },
    Array {
        component: TypeId,
    },
    Wildcard {
        bound: TypeId,
        mode: WildcardMode,
    },
    Error {
        message: String,
    },
}

impl TypeData {
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Primitive(_) => TypeKind::Primitive,
            Self::Null => TypeKind::Null,
            Self::Referenced(_) => TypeKind::Referenced,
            Self::Direct { .. } => TypeKind::Direct,
            Self::Defined(_) => TypeKind::Defined,
            Self::TypeVar { .. } => TypeKind::TypeVar,
            Self::TypeVarClass { .. } => TypeKind::TypeVarClass,
            Self::Narrowed { .. } => TypeKind::Narrowed,
            Self::Array { .. } => TypeKind::Array,
            Self::Wildcard { .. } => TypeKind::Wildcard,
            Self::Error { .. } => TypeKind::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_predicates() {
        assert!(TypeKind::Primitive.is_primitive());
        assert!(!TypeKind::Primitive.is_reference());
        assert!(TypeKind::Null.is_reference());
        assert!(TypeKind::Narrowed.is_reference());
        assert!(TypeKind::Array.is_array());
        assert!(!TypeKind::Error.is_reference());
        assert!(TypeKind::Error.is_error());
    }

    #[test]
    fn test_importable_kinds() {
        assert!(TypeKind::Referenced.is_importable());
        assert!(TypeKind::Defined.is_importable());
        assert!(!TypeKind::Narrowed.is_importable());
        assert!(!TypeKind::TypeVar.is_importable());
    }
}
