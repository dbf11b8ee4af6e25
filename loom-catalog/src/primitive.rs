//! Primitive types and their boxed counterparts.

/// A primitive type of the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    /// Every primitive, in declaration order.
    pub const ALL: [Primitive; 9] = [
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Void,
    ];

    /// The source keyword (`int`, `boolean`, ...).
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    /// The JVM descriptor letter used inside array binary names (`[I`, `[[Z`).
    pub fn descriptor(&self) -> char {
        match self {
            Self::Boolean => 'Z',
            Self::Byte => 'B',
            Self::Char => 'C',
            Self::Short => 'S',
            Self::Int => 'I',
            Self::Long => 'J',
            Self::Float => 'F',
            Self::Double => 'D',
            Self::Void => 'V',
        }
    }

    /// Binary name of the boxed class.
    pub fn boxed(&self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Char => "java.lang.Character",
            Self::Short => "java.lang.Short",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
            Self::Void => "java.lang.Void",
        }
    }

    /// Position in [`Primitive::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    pub fn from_descriptor(descriptor: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.descriptor() == descriptor)
    }

    /// The primitive a boxed class unboxes to.
    pub fn from_boxed(binary_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.boxed() == binary_name)
    }
}
