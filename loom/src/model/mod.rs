//! The owning code model.

mod arena;
mod pool;

use std::{
    cell::RefCell,
    fmt,
    rc::Rc,
    sync::atomic::{AtomicU32, Ordering},
};

use typeloom_catalog::{ClassCatalog, ClassKind, ClassResolver, OBJECT, Primitive, names};

use self::{
    arena::Arena,
    pool::{NULL_INDEX, Pool},
};
use crate::{
    Error, Result,
    generics::Generics,
    types::{DefinedClass, TypeData, TypeId, TypeKind, WildcardMode},
};

pub(crate) use pool::primitive_id;

/// Process-unique identity of a [`CodeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u32);

impl ModelId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Types every model resolves once, at construction.
#[derive(Debug)]
struct Builtins {
    object: TypeId,
    boxes: [TypeId; Primitive::ALL.len()],
}

struct ModelInner {
    id: ModelId,
    arena: RefCell<Arena>,
    resolver: Box<dyn ClassResolver>,
    builtins: Builtins,
}

/// An in-memory program: referenced classes, defined classes and every type
/// built from them.
///
/// `CodeModel` is a cheap handle; clones share the same model. Types are
/// addressed by [`TypeId`] and only make sense together with the model that
/// created them.
///
/// # Example
///
/// ```
/// use typeloom::CodeModel;
///
/// let model = CodeModel::new();
/// let list = model.resolve("java.util.List").unwrap();
/// let string = model.resolve("java.lang.String").unwrap();
/// let strings = model.narrow(list, &[string]).unwrap();
///
/// assert_eq!(model.name(strings).unwrap(), "List<String>");
/// assert_eq!(model.erasure(strings).unwrap(), list);
/// ```
#[derive(Clone)]
pub struct CodeModel {
    inner: Rc<ModelInner>,
}

impl CodeModel {
    /// Create a model backed by [`ClassCatalog::jdk`].
    pub fn new() -> Self {
        Self::with_resolver(ClassCatalog::jdk())
            .expect("the stock catalog defines the root and boxed classes")
    }

    /// Create a model backed by the given resolver.
    ///
    /// Fails with [`Error::UnresolvedType`] when the resolver does not know
    /// `java.lang.Object` or one of the boxed primitive classes.
    pub fn with_resolver(resolver: impl ClassResolver + 'static) -> Result<Self> {
        let id = ModelId::next();
        let mut arena = Arena::default();
        pool::seed(&mut arena, id);

        let builtins = {
            let mut pool = Pool::new(&mut arena, &resolver, id);
            let object = pool.resolve(OBJECT)?;
            let mut boxes = [object; Primitive::ALL.len()];
            for primitive in Primitive::ALL {
                boxes[primitive.index()] = pool.resolve(primitive.boxed())?;
            }
            Builtins { object, boxes }
        };

        tracing::debug!(model = %id, "created code model");
        Ok(Self {
            inner: Rc::new(ModelInner {
                id,
                arena: RefCell::new(arena),
                resolver: Box::new(resolver),
                builtins,
            }),
        })
    }

    /// Create a model backed by the stock catalog extended with the classes
    /// of a TOML catalog.
    pub fn with_toml_catalog(src: &str) -> Result<Self> {
        let mut catalog = ClassCatalog::jdk();
        catalog.merge(&ClassCatalog::from_toml_str(src)?);
        Self::with_resolver(catalog)
    }

    /// Identity of this model, carried by every [`TypeId`] it hands out.
    pub fn id(&self) -> ModelId {
        self.inner.id
    }

    // =========================================================================
    // Referenced types
    // =========================================================================

    /// Resolve a class or array by binary name.
    ///
    /// Accepts nested names (`java.util.Map$Entry`), source-form arrays
    /// (`int[][]`) and descriptor-form arrays (`[Ljava.lang.String;`).
    /// Resolving the same name twice returns the same type. Bare primitive
    /// keywords are rejected; see [`CodeModel::resolve_type`].
    pub fn resolve(&self, binary_name: &str) -> Result<TypeId> {
        if Primitive::from_keyword(binary_name).is_some() {
            return Err(Error::PrimitiveNotAllowed {
                name: binary_name.to_string(),
                context: "a class name".to_string(),
            }
            .into());
        }
        self.resolve_type(binary_name)
    }

    /// Like [`CodeModel::resolve`], but also accepts primitive keywords.
    pub fn resolve_type(&self, name: &str) -> Result<TypeId> {
        let mut arena = self.inner.arena.borrow_mut();
        Pool::new(&mut arena, self.inner.resolver.as_ref(), self.id()).resolve(name)
    }

    /// Resolve a class, falling back to a [`TypeKind::Direct`] class when the
    /// resolver does not know it.
    pub fn resolve_or_direct(&self, binary_name: &str) -> Result<TypeId> {
        match self.resolve(binary_name) {
            Err(err) if matches!(*err, Error::UnresolvedType { .. }) => {
                self.direct_class(&names::qualified_name(binary_name))
            }
            result => result,
        }
    }

    /// A class known only by its fully-qualified name.
    ///
    /// Direct classes are never looked up; they extend `java.lang.Object` and
    /// implement nothing.
    pub fn direct_class(&self, full_name: &str) -> Result<TypeId> {
        if !full_name.split('.').all(names::is_identifier) {
            return Err(Error::InvalidIdentifier {
                name: full_name.to_string(),
                context: "class".to_string(),
            }
            .into());
        }
        let id = self.id();
        Ok(self.inner.arena.borrow_mut().intern_direct(id, full_name))
    }

    /// The type of a primitive keyword.
    pub fn primitive(&self, primitive: Primitive) -> TypeId {
        primitive_id(self.id(), primitive)
    }

    /// The `void` pseudo-type, usable only as a return type.
    pub fn void(&self) -> TypeId {
        self.primitive(Primitive::Void)
    }

    /// The type of the `null` literal.
    pub fn null_type(&self) -> TypeId {
        TypeId::new(self.id(), NULL_INDEX)
    }

    /// The universal root type, `java.lang.Object`.
    pub fn object(&self) -> TypeId {
        self.inner.builtins.object
    }

    pub(crate) fn boxed(&self, primitive: Primitive) -> TypeId {
        self.inner.builtins.boxes[primitive.index()]
    }

    pub(crate) fn unboxed(&self, ty: TypeId) -> Option<Primitive> {
        let index = self.inner.builtins.boxes.iter().position(|&b| b == ty)?;
        Some(Primitive::ALL[index])
    }

    /// An inert placeholder type. Any attempt to print it fails with
    /// [`Error::ErrorTypeUsed`].
    pub fn error_type(&self, message: impl Into<String>) -> TypeId {
        let id = self.id();
        self.inner.arena.borrow_mut().push(
            id,
            TypeData::Error {
                message: message.into(),
            },
        )
    }

    // =========================================================================
    // Defined classes
    // =========================================================================

    /// Define a top-level class in `package` (`""` is the root package).
    pub fn define_class(&self, package: &str, name: &str, kind: ClassKind) -> Result<TypeId> {
        if !package.is_empty() && !package.split('.').all(names::is_identifier) {
            return Err(Error::InvalidIdentifier {
                name: package.to_string(),
                context: "package".to_string(),
            }
            .into());
        }
        let binary_name = if package.is_empty() {
            name.to_string()
        } else {
            format!("{package}.{name}")
        };
        let id = self.define(binary_name, package, name, None, kind)?;
        self.inner
            .arena
            .borrow_mut()
            .packages
            .entry(package.to_string())
            .or_default()
            .push(id);
        Ok(id)
    }

    /// Define a class nested in a defined class.
    pub fn define_nested(&self, outer: TypeId, name: &str, kind: ClassKind) -> Result<TypeId> {
        let package = self.defined(outer, |c| c.package.clone())?;
        let binary_name = format!("{}${name}", self.binary_name(outer)?);
        self.define(binary_name, &package, name, Some(outer), kind)
    }

    fn define(
        &self,
        binary_name: String,
        package: &str,
        name: &str,
        outer: Option<TypeId>,
        kind: ClassKind,
    ) -> Result<TypeId> {
        if !names::is_identifier(name) {
            return Err(Error::InvalidIdentifier {
                name: name.to_string(),
                context: "class".to_string(),
            }
            .into());
        }
        let owner = self.id();
        let mut arena = self.inner.arena.borrow_mut();
        if arena.has_class(&binary_name) {
            return Err(Error::DuplicateClass {
                name: names::qualified_name(&binary_name),
            }
            .into());
        }
        let id = arena.push(
            owner,
            TypeData::Defined(DefinedClass {
                package: package.to_string(),
                name: name.to_string(),
                outer,
                kind,
                is_abstract: kind.is_interface(),
                generics: Generics::new(),
                superclass: None,
                interfaces: Vec::new(),
            }),
        );
        tracing::debug!(class = %binary_name, kind = kind.keyword(), "defined class");
        arena.defined.insert(binary_name, id);
        Ok(id)
    }

    /// Set the superclass of a defined class.
    pub fn set_superclass(&self, class: TypeId, superclass: TypeId) -> Result<()> {
        self.require_reference(superclass, "a superclass")?;
        self.defined_mut(class, |c| c.superclass = Some(superclass))
    }

    /// Add an implemented (or, for interfaces, extended) interface.
    pub fn add_interface(&self, class: TypeId, interface: TypeId) -> Result<()> {
        self.require_reference(interface, "an interface")?;
        self.defined_mut(class, |c| c.interfaces.push(interface))
    }

    /// Mark a defined class `abstract`.
    pub fn set_abstract(&self, class: TypeId, is_abstract: bool) -> Result<()> {
        self.defined_mut(class, |c| c.is_abstract = is_abstract)
    }

    /// Introduce a type parameter on a defined class.
    pub fn generify(&self, class: TypeId, name: &str) -> Result<TypeId> {
        let mut generics = self.generics(class)?;
        let var = generics.introduce(self, name)?;
        self.defined_mut(class, |c| c.generics = generics)?;
        Ok(var)
    }

    /// Introduce a bounded type parameter on a defined class.
    pub fn generify_bounded(&self, class: TypeId, name: &str, bound: TypeId) -> Result<TypeId> {
        let mut generics = self.generics(class)?;
        let var = generics.bounded_introduce(self, name, bound)?;
        self.defined_mut(class, |c| c.generics = generics)?;
        Ok(var)
    }

    /// The type parameters of a defined class.
    pub fn generics(&self, class: TypeId) -> Result<Generics> {
        self.defined(class, |c| c.generics.clone())
    }

    /// Declared type parameters of a type; empty for anything but a
    /// defined generic class.
    pub fn type_params(&self, ty: TypeId) -> Result<Vec<TypeId>> {
        self.with_data(ty, |data| match data {
            TypeData::Defined(c) => c.generics.parameters(),
            _ => Vec::new(),
        })
    }

    /// Top-level classes defined in `package`, in definition order.
    pub fn package_classes(&self, package: &str) -> Vec<TypeId> {
        self.inner
            .arena
            .borrow()
            .packages
            .get(package)
            .cloned()
            .unwrap_or_default()
    }

    /// Packages that contain at least one defined class.
    pub fn packages(&self) -> Vec<String> {
        self.inner.arena.borrow().packages.keys().cloned().collect()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// What shape of type `ty` is.
    pub fn kind(&self, ty: TypeId) -> Result<TypeKind> {
        self.with_data(ty, TypeData::kind)
    }

    /// `true` for primitives, including `void`.
    pub fn is_primitive(&self, ty: TypeId) -> Result<bool> {
        Ok(self.kind(ty)?.is_primitive())
    }

    /// `true` for array types.
    pub fn is_array(&self, ty: TypeId) -> Result<bool> {
        Ok(self.kind(ty)?.is_array())
    }

    /// `true` for every type that can be a type argument.
    pub fn is_reference(&self, ty: TypeId) -> Result<bool> {
        Ok(self.kind(ty)?.is_reference())
    }

    /// Whether the type is, or is built from, an error type.
    pub fn is_error(&self, ty: TypeId) -> Result<bool> {
        match self.data(ty)? {
            TypeData::Error { .. } => Ok(true),
            TypeData::Narrowed { basis, args } => {
                for t in std::iter::once(basis).chain(args) {
                    if self.is_error(t)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            TypeData::Array { component: t }
            | TypeData::Wildcard { bound: t, .. }
            | TypeData::TypeVarClass { wrapped: t } => self.is_error(t),
            _ => Ok(false),
        }
    }

    /// `true` for interfaces and annotation types.
    pub fn is_interface(&self, ty: TypeId) -> Result<bool> {
        match self.data(ty)? {
            TypeData::Referenced(info) => Ok(info.is_interface()),
            TypeData::Defined(c) => Ok(c.kind.is_interface()),
            TypeData::Narrowed { basis, .. } => self.is_interface(basis),
            _ => Ok(false),
        }
    }

    /// `true` for abstract classes and all interfaces.
    pub fn is_abstract(&self, ty: TypeId) -> Result<bool> {
        match self.data(ty)? {
            TypeData::Referenced(info) => Ok(info.is_abstract),
            TypeData::Defined(c) => Ok(c.is_abstract),
            TypeData::Narrowed { basis, .. } => self.is_abstract(basis),
            _ => Ok(false),
        }
    }

    /// Declaration kind of a class type.
    pub fn class_kind(&self, ty: TypeId) -> Result<Option<ClassKind>> {
        match self.data(ty)? {
            TypeData::Referenced(info) => Ok(Some(info.kind)),
            TypeData::Defined(c) => Ok(Some(c.kind)),
            TypeData::Direct { .. } => Ok(Some(ClassKind::Class)),
            TypeData::Narrowed { basis, .. } => self.class_kind(basis),
            _ => Ok(None),
        }
    }

    /// Simple name, e.g. `Inner` for `a.b.Outer$Inner` and `List<String>`
    /// for a narrowed list.
    pub fn name(&self, ty: TypeId) -> Result<String> {
        match self.data(ty)? {
            TypeData::Primitive(p) => Ok(p.keyword().to_string()),
            TypeData::Null => Ok("null".to_string()),
            TypeData::Referenced(info) => Ok(names::simple_name(&info.name).to_string()),
            TypeData::Direct { full_name } => Ok(names::simple_name(&full_name).to_string()),
            TypeData::Defined(c) => Ok(c.name),
            TypeData::TypeVar { name, .. } => Ok(name),
            TypeData::TypeVarClass { wrapped } => self.generic_name(wrapped),
            TypeData::Narrowed { basis, args } => self.compose(basis, &args, Self::name),
            TypeData::Array { component } => Ok(format!("{}[]", self.name(component)?)),
            TypeData::Wildcard { bound, mode } => self.wildcard_name(bound, mode, Self::name),
            TypeData::Error { message } => Err(Error::ErrorTypeUsed { message }.into()),
        }
    }

    /// Fully-qualified source name, e.g. `a.b.Outer.Inner`.
    pub fn full_name(&self, ty: TypeId) -> Result<String> {
        match self.data(ty)? {
            TypeData::Referenced(info) => Ok(names::qualified_name(&info.name)),
            TypeData::Direct { full_name } => Ok(full_name),
            TypeData::Defined(c) => Ok(match c.outer {
                Some(outer) => format!("{}.{}", self.full_name(outer)?, c.name),
                None => qualify(&c.package, &c.name),
            }),
            TypeData::TypeVarClass { wrapped } => {
                let erasure = self.erasure(wrapped)?;
                self.full_name(erasure)
            }
            TypeData::Narrowed { basis, args } => self.compose(basis, &args, Self::full_name),
            TypeData::Array { component } => Ok(format!("{}[]", self.full_name(component)?)),
            TypeData::Wildcard { bound, mode } => {
                self.wildcard_name(bound, mode, Self::full_name)
            }
            _ => self.name(ty),
        }
    }

    /// Binary name, e.g. `a.b.Outer$Inner`.
    pub fn binary_name(&self, ty: TypeId) -> Result<String> {
        match self.data(ty)? {
            TypeData::Referenced(info) => Ok(info.name),
            TypeData::Defined(c) => Ok(match c.outer {
                Some(outer) => format!("{}${}", self.binary_name(outer)?, c.name),
                None => qualify(&c.package, &c.name),
            }),
            TypeData::Narrowed { basis, args } => {
                self.compose(basis, &args, Self::binary_name)
            }
            TypeData::Array { component } => Ok(format!("{}[]", self.binary_name(component)?)),
            _ => self.full_name(ty),
        }
    }

    /// Package of a type: `None` for primitives, type variables and
    /// wildcards, `Some("")` for the root package (which also holds arrays and
    /// the null type).
    pub fn package(&self, ty: TypeId) -> Result<Option<String>> {
        match self.data(ty)? {
            TypeData::Primitive(_) | TypeData::TypeVar { .. } | TypeData::Wildcard { .. } => {
                Ok(None)
            }
            TypeData::Null | TypeData::Array { .. } => Ok(Some(String::new())),
            TypeData::Referenced(info) => Ok(Some(names::package_name(&info.name).to_string())),
            TypeData::Direct { full_name } => {
                Ok(Some(names::package_name(&full_name).to_string()))
            }
            TypeData::Defined(c) => Ok(Some(c.package)),
            TypeData::TypeVarClass { wrapped: t } | TypeData::Narrowed { basis: t, .. } => {
                self.package(t)
            }
            TypeData::Error { message } => Err(Error::ErrorTypeUsed { message }.into()),
        }
    }

    /// The enclosing class of a nested class.
    pub fn outer(&self, ty: TypeId) -> Result<Option<TypeId>> {
        match self.data(ty)? {
            TypeData::Defined(c) => Ok(c.outer),
            TypeData::Referenced(info) => {
                let outer = info
                    .declaring_class
                    .as_deref()
                    .or_else(|| names::enclosing_name(&info.name));
                outer.map(|name| self.resolve_or_direct(name)).transpose()
            }
            _ => Ok(None),
        }
    }

    /// `Foo<T,U>` for a defined generic class, the plain name otherwise.
    fn generic_name(&self, ty: TypeId) -> Result<String> {
        let params = self.type_params(ty)?;
        if params.is_empty() {
            self.name(ty)
        } else {
            self.compose(ty, &params, Self::name)
        }
    }

    fn compose(
        &self,
        basis: TypeId,
        args: &[TypeId],
        name_of: fn(&Self, TypeId) -> Result<String>,
    ) -> Result<String> {
        let mut buf = name_of(self, basis)?;
        buf.push('<');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                buf.push(',');
            }
            buf.push_str(&name_of(self, *arg)?);
        }
        buf.push('>');
        Ok(buf)
    }

    fn wildcard_name(
        &self,
        bound: TypeId,
        mode: WildcardMode,
        name_of: fn(&Self, TypeId) -> Result<String>,
    ) -> Result<String> {
        if mode == WildcardMode::Extends && bound == self.object() {
            return Ok("?".to_string());
        }
        Ok(format!("? {} {}", mode.keyword(), name_of(self, bound)?))
    }

    /// Best-effort name for error messages.
    pub(crate) fn describe(&self, ty: TypeId) -> String {
        self.full_name(ty)
            .unwrap_or_else(|_| format!("<unnamed type {ty:?}>"))
    }

    // =========================================================================
    // Arena access
    // =========================================================================

    pub(crate) fn check(&self, ty: TypeId) -> Result<()> {
        if ty.owner() == self.id() {
            Ok(())
        } else {
            Err(Error::ForeignOwner {
                owner: ty.owner(),
                model: self.id(),
            }
            .into())
        }
    }

    pub(crate) fn with_data<R>(&self, ty: TypeId, f: impl FnOnce(&TypeData) -> R) -> Result<R> {
        self.check(ty)?;
        Ok(f(self.inner.arena.borrow().get(ty)))
    }

    pub(crate) fn data(&self, ty: TypeId) -> Result<TypeData> {
        self.with_data(ty, TypeData::clone)
    }

    pub(crate) fn with_data_mut<R>(
        &self,
        ty: TypeId,
        f: impl FnOnce(&mut TypeData) -> R,
    ) -> Result<R> {
        self.check(ty)?;
        Ok(f(self.inner.arena.borrow_mut().get_mut(ty)))
    }

    fn defined<R>(&self, class: TypeId, f: impl FnOnce(&DefinedClass) -> R) -> Result<R> {
        self.with_data(class, |data| match data {
            TypeData::Defined(c) => Some(f(c)),
            _ => None,
        })?
        .ok_or_else(|| self.not_defined(class))
    }

    fn defined_mut(&self, class: TypeId, f: impl FnOnce(&mut DefinedClass)) -> Result<()> {
        let found = self.with_data_mut(class, |data| match data {
            TypeData::Defined(c) => {
                f(c);
                true
            }
            _ => false,
        })?;
        if found {
            Ok(())
        } else {
            Err(self.not_defined(class))
        }
    }

    fn not_defined(&self, ty: TypeId) -> Box<Error> {
        Error::NotADefinedClass {
            name: self.describe(ty),
        }
        .into()
    }

    /// Reject primitives (and foreign types) where a class type is needed.
    pub(crate) fn require_reference(&self, ty: TypeId, context: &str) -> Result<()> {
        if let TypeData::Primitive(p) = self.data(ty)? {
            return Err(Error::PrimitiveNotAllowed {
                name: p.keyword().to_string(),
                context: context.to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub(crate) fn push(&self, data: TypeData) -> TypeId {
        let id = self.id();
        self.inner.arena.borrow_mut().push(id, data)
    }

    pub(crate) fn arena_mut(&self) -> std::cell::RefMut<'_, Arena> {
        self.inner.arena.borrow_mut()
    }
}

impl Default for CodeModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CodeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeModel")
            .field("id", &self.inner.id)
            .field("types", &self.inner.arena.borrow().len())
            .finish_non_exhaustive()
    }
}

fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}
