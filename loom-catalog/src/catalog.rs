//! Class resolvers and the stock catalog.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{CatalogError, ClassInfo, ClassKind, OBJECT, Result, names};

/// Lookup of externally compiled classes by binary name.
///
/// This is the only view the code model has of the host runtime. A resolver
/// must answer the same way for the same name for as long as a model uses it.
pub trait ClassResolver {
    /// Describe the class with the given binary name, if it is known.
    fn lookup(&self, binary_name: &str) -> Option<&ClassInfo>;
}

impl<T: ClassResolver + ?Sized> ClassResolver for Box<T> {
    fn lookup(&self, binary_name: &str) -> Option<&ClassInfo> {
        self.as_ref().lookup(binary_name)
    }
}

/// An insertion-ordered table of class descriptors.
///
/// # Example
///
/// ```
/// use typeloom_catalog::{ClassCatalog, ClassInfo, ClassResolver};
///
/// let mut catalog = ClassCatalog::jdk();
/// catalog
///     .insert(ClassInfo::class("com.acme.Builder"))
///     .unwrap();
///
/// assert!(catalog.lookup("com.acme.Builder").is_some());
/// assert!(catalog.lookup("java.util.List").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    classes: IndexMap<String, ClassInfo>,
}

/// On-disk shape of a catalog: a list of `[[class]]` tables.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "class")]
    classes: Vec<ClassInfo>,
}

impl ClassCatalog {
    /// Create an empty catalog.
    ///
    /// A model needs at least `java.lang.Object` and the boxed primitive
    /// classes; most callers want [`ClassCatalog::jdk`] instead.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog preloaded with the core `java.lang`, `java.io` and
    /// `java.util` types.
    pub fn jdk() -> Self {
        let mut catalog = Self::new();
        for info in jdk_classes() {
            catalog.classes.insert(info.name.clone(), info);
        }
        catalog
    }

    /// Parse a TOML catalog.
    ///
    /// Classes without a `superclass` extend `java.lang.Object`; interfaces
    /// are always abstract.
    ///
    /// ```toml
    /// [[class]]
    /// name = "com.acme.Builder"
    /// kind = "class"
    /// superclass = "java.lang.Object"
    /// interfaces = ["java.io.Serializable"]
    /// ```
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(src).map_err(|source| CatalogError::Toml { source })?;
        Self::from_infos(file.classes)
    }

    /// Parse a JSON catalog (an array of class objects).
    pub fn from_json_str(src: &str) -> Result<Self> {
        let classes: Vec<ClassInfo> =
            serde_json::from_str(src).map_err(|source| CatalogError::Json { source })?;
        Self::from_infos(classes)
    }

    fn from_infos(classes: Vec<ClassInfo>) -> Result<Self> {
        let mut catalog = Self::new();
        for mut info in classes {
            if info.is_interface() {
                info.is_abstract = true;
            } else if info.superclass.is_none() && info.name != OBJECT {
                info.superclass = Some(OBJECT.to_string());
            }
            catalog.insert(info)?;
        }
        tracing::debug!(classes = catalog.len(), "loaded class catalog");
        Ok(catalog)
    }

    /// Add a class. Names must be valid binary names and unique.
    pub fn insert(&mut self, info: ClassInfo) -> Result<()> {
        if !names::is_binary_name(&info.name) {
            return Err(CatalogError::InvalidName { name: info.name });
        }
        if self.classes.contains_key(&info.name) {
            return Err(CatalogError::Duplicate { name: info.name });
        }
        self.classes.insert(info.name.clone(), info);
        Ok(())
    }

    /// Add every class of `other` that this catalog does not know yet.
    pub fn merge(&mut self, other: &ClassCatalog) {
        for (name, info) in &other.classes {
            self.classes
                .entry(name.clone())
                .or_insert_with(|| info.clone());
        }
    }

    /// Whether a class of this binary name is known.
    pub fn contains(&self, binary_name: &str) -> bool {
        self.classes.contains_key(binary_name)
    }

    /// Iterate over all classes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassInfo> {
        self.classes.values()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }
}

impl ClassResolver for ClassCatalog {
    fn lookup(&self, binary_name: &str) -> Option<&ClassInfo> {
        self.classes.get(binary_name)
    }
}

fn jdk_classes() -> Vec<ClassInfo> {
    const SERIALIZABLE: &str = "java.io.Serializable";
    const COMPARABLE: &str = "java.lang.Comparable";
    const NUMBER: &str = "java.lang.Number";

    let number = |name: &str| {
        ClassInfo::class(name)
            .extends(NUMBER)
            .implements(COMPARABLE)
    };

    vec![
        ClassInfo::class(OBJECT).root(),
        ClassInfo::interface(SERIALIZABLE),
        ClassInfo::interface(COMPARABLE),
        ClassInfo::interface("java.lang.CharSequence"),
        ClassInfo::interface("java.lang.Iterable"),
        ClassInfo::interface("java.lang.Runnable"),
        ClassInfo::interface("java.lang.Cloneable"),
        ClassInfo::interface("java.lang.AutoCloseable"),
        ClassInfo::interface("java.lang.Override").kind(ClassKind::Annotation),
        ClassInfo::interface("java.lang.Deprecated").kind(ClassKind::Annotation),
        ClassInfo::class("java.lang.String")
            .implements(SERIALIZABLE)
            .implements(COMPARABLE)
            .implements("java.lang.CharSequence"),
        ClassInfo::class("java.lang.Class").implements(SERIALIZABLE),
        ClassInfo::class("java.lang.Enum")
            .abstract_()
            .implements(COMPARABLE)
            .implements(SERIALIZABLE),
        ClassInfo::class(NUMBER).abstract_().implements(SERIALIZABLE),
        ClassInfo::class("java.lang.Boolean")
            .implements(SERIALIZABLE)
            .implements(COMPARABLE),
        ClassInfo::class("java.lang.Character")
            .implements(SERIALIZABLE)
            .implements(COMPARABLE),
        number("java.lang.Byte"),
        number("java.lang.Short"),
        number("java.lang.Integer"),
        number("java.lang.Long"),
        number("java.lang.Float"),
        number("java.lang.Double"),
        ClassInfo::class("java.lang.Void"),
        ClassInfo::class("java.lang.Throwable").implements(SERIALIZABLE),
        ClassInfo::class("java.lang.Exception").extends("java.lang.Throwable"),
        ClassInfo::class("java.lang.RuntimeException").extends("java.lang.Exception"),
        ClassInfo::class("java.lang.IllegalArgumentException")
            .extends("java.lang.RuntimeException"),
        ClassInfo::class("java.lang.IllegalStateException")
            .extends("java.lang.RuntimeException"),
        ClassInfo::class("java.io.IOException").extends("java.lang.Exception"),
        ClassInfo::interface("java.util.Collection").implements("java.lang.Iterable"),
        ClassInfo::interface("java.util.List").implements("java.util.Collection"),
        ClassInfo::interface("java.util.Set").implements("java.util.Collection"),
        ClassInfo::interface("java.util.Map"),
        ClassInfo::interface("java.util.Map$Entry"),
        ClassInfo::interface("java.util.RandomAccess"),
        ClassInfo::class("java.util.AbstractCollection")
            .abstract_()
            .implements("java.util.Collection"),
        ClassInfo::class("java.util.AbstractList")
            .abstract_()
            .extends("java.util.AbstractCollection")
            .implements("java.util.List"),
        ClassInfo::class("java.util.ArrayList")
            .extends("java.util.AbstractList")
            .implements("java.util.List")
            .implements("java.util.RandomAccess")
            .implements("java.lang.Cloneable")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.util.HashMap")
            .implements("java.util.Map")
            .implements("java.lang.Cloneable")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.util.HashSet")
            .implements("java.util.Set")
            .implements("java.lang.Cloneable")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.util.Optional"),
        ClassInfo::class("java.util.Date")
            .implements(SERIALIZABLE)
            .implements("java.lang.Cloneable")
            .implements(COMPARABLE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jdk_has_boxed_primitives() {
        let catalog = ClassCatalog::jdk();
        for p in crate::Primitive::ALL {
            assert!(catalog.contains(p.boxed()), "missing {}", p.boxed());
        }
        assert!(catalog.contains(OBJECT));
    }

    #[test]
    fn test_jdk_supertypes_are_known() {
        let catalog = ClassCatalog::jdk();
        for info in catalog.iter() {
            if let Some(sup) = &info.superclass {
                assert!(catalog.contains(sup), "{} extends unknown {}", info.name, sup);
            }
            for itf in &info.interfaces {
                assert!(catalog.contains(itf), "{} implements unknown {}", info.name, itf);
            }
        }
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut catalog = ClassCatalog::new();
        catalog.insert(ClassInfo::class("a.B")).unwrap();
        let err = catalog.insert(ClassInfo::class("a.B")).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { name } if name == "a.B"));
    }

    #[test]
    fn test_insert_rejects_invalid_names() {
        let mut catalog = ClassCatalog::new();
        let err = catalog.insert(ClassInfo::class("a..B")).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidName { .. }));
    }

    #[test]
    fn test_merge_keeps_existing() {
        let mut a = ClassCatalog::new();
        a.insert(ClassInfo::class("a.B")).unwrap();
        let mut b = ClassCatalog::new();
        b.insert(ClassInfo::interface("a.B")).unwrap();
        b.insert(ClassInfo::class("a.C")).unwrap();

        a.merge(&b);

        assert_eq!(a.len(), 2);
        assert!(!a.lookup("a.B").unwrap().is_interface());
    }
}
