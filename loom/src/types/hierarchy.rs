//! Supertype queries, erasure, boxing and assignability.
//!
//! Supertypes of referenced classes are stored by name and resolved through
//! the model's pool only when asked for. Supertypes of a narrowed type are the
//! supertypes of its basis with the basis' type parameters replaced by the
//! narrowed arguments.

use super::{TypeData, TypeId, TypeKind, WildcardMode};
use crate::{CodeModel, Error, Result};

const ARRAY_SUPERTYPES: [&str; 2] = ["java.lang.Cloneable", "java.io.Serializable"];

/// Lazily resolved interfaces of a type; see [`CodeModel::interfaces`].
pub struct Interfaces<'m> {
    model: &'m CodeModel,
    pending: Pending,
    position: usize,
    params: Vec<TypeId>,
    args: Vec<TypeId>,
}

enum Pending {
    Names(Vec<String>),
    Types(Vec<TypeId>),
}

impl<'m> Interfaces<'m> {
    fn new(model: &'m CodeModel, pending: Pending) -> Self {
        Self {
            model,
            pending,
            position: 0,
            params: Vec::new(),
            args: Vec::new(),
        }
    }

    fn empty(model: &'m CodeModel) -> Self {
        Self::new(model, Pending::Types(Vec::new()))
    }
}

impl Iterator for Interfaces<'_> {
    type Item = Result<TypeId>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match &self.pending {
            Pending::Names(names) => self.model.resolve(names.get(self.position)?),
            Pending::Types(types) => Ok(*types.get(self.position)?),
        };
        self.position += 1;
        Some(item.and_then(|ty| {
            if self.params.is_empty() {
                Ok(ty)
            } else {
                self.model.substitute(ty, &self.params, &self.args)
            }
        }))
    }
}

impl CodeModel {
    /// The direct superclass.
    ///
    /// Interfaces, type variables without a bound, arrays and direct classes
    /// report `java.lang.Object`; the root type, primitives and the null type
    /// have none.
    pub fn superclass(&self, ty: TypeId) -> Result<Option<TypeId>> {
        let object = self.object();
        match self.data(ty)? {
            TypeData::Referenced(info) => {
                if info.is_interface() {
                    return Ok(Some(object));
                }
                info.superclass
                    .as_deref()
                    .map(|name| self.resolve(name))
                    .transpose()
            }
            TypeData::Direct { .. } | TypeData::TypeVarClass { .. } | TypeData::Array { .. } => {
                Ok(Some(object))
            }
            TypeData::Defined(c) => Ok(Some(c.superclass.unwrap_or(object))),
            TypeData::TypeVar { bound, .. } => Ok(Some(bound.unwrap_or(object))),
            TypeData::Narrowed { basis, args } => {
                let Some(superclass) = self.superclass(basis)? else {
                    return Ok(None);
                };
                let params = self.type_params(basis)?;
                if params.is_empty() || params.len() != args.len() {
                    return Ok(Some(superclass));
                }
                self.substitute(superclass, &params, &args).map(Some)
            }
            TypeData::Wildcard { bound, mode } => Ok(Some(match mode {
                WildcardMode::Extends => bound,
                WildcardMode::Super => object,
            })),
            TypeData::Primitive(_) | TypeData::Null => Ok(None),
            TypeData::Error { message } => Err(Error::ErrorTypeUsed { message }.into()),
        }
    }

    /// The directly implemented interfaces (for an interface: the extended
    /// ones), resolved one at a time while iterating.
    pub fn interfaces(&self, ty: TypeId) -> Result<Interfaces<'_>> {
        match self.data(ty)? {
            TypeData::Referenced(info) => {
                Ok(Interfaces::new(self, Pending::Names(info.interfaces)))
            }
            TypeData::Defined(c) => Ok(Interfaces::new(self, Pending::Types(c.interfaces))),
            TypeData::Narrowed { basis, args } => {
                let mut interfaces = self.interfaces(basis)?;
                let params = self.type_params(basis)?;
                if !params.is_empty() && params.len() == args.len() {
                    interfaces.params = params;
                    interfaces.args = args;
                }
                Ok(interfaces)
            }
            TypeData::TypeVar {
                bound: Some(bound), ..
            }
            | TypeData::Wildcard {
                bound,
                mode: WildcardMode::Extends,
            } => self.interfaces(bound),
            _ => Ok(Interfaces::empty(self)),
        }
    }

    /// The raw form of a type: the basis of a narrowed type, the erased bound
    /// of a type variable (or `java.lang.Object`), the type itself otherwise.
    pub fn erasure(&self, ty: TypeId) -> Result<TypeId> {
        match self.data(ty)? {
            TypeData::Narrowed { basis, .. } => Ok(basis),
            TypeData::TypeVar { bound, .. } => match bound {
                Some(bound) => self.erasure(bound),
                None => Ok(self.object()),
            },
            TypeData::TypeVarClass { wrapped } => self.erasure(wrapped),
            TypeData::Wildcard { bound, mode } => match mode {
                WildcardMode::Extends => self.erasure(bound),
                WildcardMode::Super => Ok(self.object()),
            },
            TypeData::Array { component } => {
                let erased = self.erasure(component)?;
                if erased == component {
                    Ok(ty)
                } else {
                    self.array(erased)
                }
            }
            _ => Ok(ty),
        }
    }

    /// The boxed class of a primitive; any other type is returned as is.
    pub fn boxify(&self, ty: TypeId) -> Result<TypeId> {
        match self.data(ty)? {
            TypeData::Primitive(p) => Ok(self.boxed(p)),
            _ => Ok(ty),
        }
    }

    /// The primitive of a boxed class; any other type is returned as is.
    pub fn unboxify(&self, ty: TypeId) -> Result<TypeId> {
        self.check(ty)?;
        Ok(self.unboxed(ty).map_or(ty, |p| self.primitive(p)))
    }

    /// Component type of an array.
    pub fn element_type(&self, ty: TypeId) -> Result<TypeId> {
        match self.data(ty)? {
            TypeData::Array { component } => Ok(component),
            _ => Err(Error::NotAnArray {
                name: self.describe(ty),
            }
            .into()),
        }
    }

    /// Whether a value of type `from` can be assigned to a variable of type
    /// `to`.
    ///
    /// `null` is assignable to every reference type and every reference type
    /// to `java.lang.Object`. Arrays are covariant. A raw type accepts any
    /// parameterization of itself; otherwise type arguments must match, with
    /// wildcard arguments accepting anything within their bound.
    pub fn is_assignable_from(&self, to: TypeId, from: TypeId) -> Result<bool> {
        self.check(to)?;
        self.check(from)?;
        if to == from {
            return Ok(true);
        }

        let to_kind = self.kind(to)?;
        let from_kind = self.kind(from)?;
        if !to_kind.is_reference() || !from_kind.is_reference() {
            return Ok(false);
        }
        if from_kind == TypeKind::Null || to == self.object() {
            return Ok(true);
        }

        match to_kind {
            TypeKind::Array => {
                return match self.data(from)? {
                    TypeData::Array { component } => {
                        self.is_assignable_from(self.element_type(to)?, component)
                    }
                    _ => Ok(false),
                };
            }
            TypeKind::Wildcard => {
                let upper = self.superclass(to)?.unwrap_or(self.object());
                return self.is_assignable_from(upper, from);
            }
            _ => {}
        }

        if from_kind == TypeKind::Array {
            let name = self.full_name(to)?;
            return Ok(ARRAY_SUPERTYPES.contains(&name.as_str()));
        }

        let to_erasure = self.erasure(to)?;
        if to_erasure == self.erasure(from)? && from_kind != TypeKind::TypeVar {
            if to == to_erasure || from_kind != TypeKind::Narrowed {
                return Ok(true);
            }
            let to_args = self.type_args(to)?;
            let from_args = self.type_args(from)?;
            if to_args.len() != from_args.len() {
                return Ok(false);
            }
            for (&to_arg, &from_arg) in to_args.iter().zip(&from_args) {
                if !self.contains(to_arg, from_arg)? {
                    return Ok(false);
                }
            }
            return Ok(true);
        }

        if let Some(superclass) = self.superclass(from)? {
            if superclass != from && self.is_assignable_from(to, superclass)? {
                return Ok(true);
            }
        }
        if self.is_interface(to_erasure)? {
            for interface in self.interfaces(from)? {
                if self.is_assignable_from(to, interface?)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Whether type argument `to` admits type argument `from`.
    fn contains(&self, to: TypeId, from: TypeId) -> Result<bool> {
        if to == from {
            return Ok(true);
        }
        let from_bound = self.wildcard_bound(from)?;
        match self.wildcard_bound(to)? {
            Some((bound, WildcardMode::Extends)) => {
                let upper = match from_bound {
                    Some((b, WildcardMode::Extends)) => b,
                    Some((_, WildcardMode::Super)) => self.object(),
                    None => from,
                };
                self.is_assignable_from(bound, upper)
            }
            Some((bound, WildcardMode::Super)) => match from_bound {
                Some((b, WildcardMode::Super)) => self.is_assignable_from(b, bound),
                Some((_, WildcardMode::Extends)) => Ok(false),
                None => self.is_assignable_from(from, bound),
            },
            None => Ok(false),
        }
    }

    /// The parameterization of `base` among the supertypes of `ty`.
    ///
    /// For `interface Foo<T> extends List<List<T>>` and
    /// `interface Bar extends Foo<String>`, the base class of `Bar` for
    /// `List` is `List<List<String>>`.
    pub fn base_class(&self, ty: TypeId, base: TypeId) -> Result<Option<TypeId>> {
        if self.erasure(ty)? == base {
            return Ok(Some(ty));
        }
        if let Some(superclass) = self.superclass(ty)? {
            if superclass != ty {
                if let Some(found) = self.base_class(superclass, base)? {
                    return Ok(Some(found));
                }
            }
        }
        for interface in self.interfaces(ty)? {
            if let Some(found) = self.base_class(interface?, base)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use typeloom_catalog::{ClassKind, Primitive};

    use crate::{CodeModel, Error, Result, TypeId};

    fn collect(model: &CodeModel, ty: TypeId) -> Vec<String> {
        model
            .interfaces(ty)
            .unwrap()
            .map(|itf| model.name(itf?))
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_referenced_superclass() {
        let model = CodeModel::new();
        let integer = model.resolve("java.lang.Integer").unwrap();
        let number = model.resolve("java.lang.Number").unwrap();
        let list = model.resolve("java.util.List").unwrap();

        assert_eq!(model.superclass(integer).unwrap(), Some(number));
        assert_eq!(model.superclass(list).unwrap(), Some(model.object()));
        assert_eq!(model.superclass(model.object()).unwrap(), None);
        assert_eq!(model.superclass(model.void()).unwrap(), None);
    }

    #[test]
    fn test_referenced_interfaces_are_lazy() {
        let model = CodeModel::new();
        let list = model.resolve("java.util.ArrayList").unwrap();
        assert_eq!(
            collect(&model, list),
            vec!["List", "RandomAccess", "Cloneable", "Serializable"]
        );
    }

    #[test]
    fn test_narrowed_supertypes_are_specialized() {
        let model = CodeModel::new();
        let base = model.define_class("p", "Base", ClassKind::Class).unwrap();
        let t = model.generify(base, "T").unwrap();
        let list = model.resolve("java.util.List").unwrap();
        let comparable = model.resolve("java.lang.Comparable").unwrap();
        model.set_superclass(base, model.narrow(list, &[t]).unwrap()).unwrap();
        model.add_interface(base, model.narrow(comparable, &[t]).unwrap()).unwrap();

        let string = model.resolve("java.lang.String").unwrap();
        let base_string = model.narrow(base, &[string]).unwrap();

        let superclass = model.superclass(base_string).unwrap().unwrap();
        assert_eq!(model.name(superclass).unwrap(), "List<String>");
        assert_eq!(collect(&model, base_string), vec!["Comparable<String>"]);
    }

    #[test]
    fn test_type_var_supertypes() {
        let model = CodeModel::new();
        let t = model.type_var("T").unwrap();
        assert_eq!(model.superclass(t).unwrap(), Some(model.object()));
        assert_eq!(model.erasure(t).unwrap(), model.object());

        let u = model.type_var("U").unwrap();
        let number = model.resolve("java.lang.Number").unwrap();
        model.set_bound(u, number).unwrap();
        assert_eq!(model.superclass(u).unwrap(), Some(number));
        assert_eq!(model.erasure(u).unwrap(), number);
        assert_eq!(collect(&model, u), vec!["Serializable"]);
    }

    #[test]
    fn test_erasure() {
        let model = CodeModel::new();
        let map = model.resolve("java.util.Map").unwrap();
        let string = model.resolve("java.lang.String").unwrap();
        let narrowed = model.narrow(map, &[string, string]).unwrap();

        assert_eq!(model.erasure(narrowed).unwrap(), map);
        assert_eq!(model.erasure(map).unwrap(), map);

        let array = model.array(narrowed).unwrap();
        assert_eq!(model.erasure(array).unwrap(), model.array(map).unwrap());
    }

    #[test]
    fn test_boxing() {
        let model = CodeModel::new();
        let int = model.primitive(Primitive::Int);
        let integer = model.resolve("java.lang.Integer").unwrap();
        let string = model.resolve("java.lang.String").unwrap();

        assert_eq!(model.boxify(int).unwrap(), integer);
        assert_eq!(model.unboxify(integer).unwrap(), int);
        assert_eq!(model.boxify(string).unwrap(), string);
        assert_eq!(model.unboxify(string).unwrap(), string);
    }

    #[test]
    fn test_element_type() {
        let model = CodeModel::new();
        let ints = model.resolve("int[]").unwrap();
        assert_eq!(
            model.element_type(ints).unwrap(),
            model.primitive(Primitive::Int)
        );

        let err = model.element_type(model.object()).unwrap_err();
        assert!(matches!(*err, Error::NotAnArray { ref name } if name == "java.lang.Object"));
    }

    #[test]
    fn test_assignability() {
        let model = CodeModel::new();
        let object = model.object();
        let number = model.resolve("java.lang.Number").unwrap();
        let integer = model.resolve("java.lang.Integer").unwrap();
        let string = model.resolve("java.lang.String").unwrap();
        let comparable = model.resolve("java.lang.Comparable").unwrap();
        let collection = model.resolve("java.util.Collection").unwrap();
        let array_list = model.resolve("java.util.ArrayList").unwrap();
        let int = model.primitive(Primitive::Int);

        assert!(model.is_assignable_from(number, integer).unwrap());
        assert!(!model.is_assignable_from(integer, number).unwrap());
        assert!(model.is_assignable_from(object, string).unwrap());
        assert!(model.is_assignable_from(comparable, integer).unwrap());
        assert!(model.is_assignable_from(collection, array_list).unwrap());
        assert!(model.is_assignable_from(string, model.null_type()).unwrap());
        assert!(!model.is_assignable_from(int, model.null_type()).unwrap());
        assert!(!model.is_assignable_from(integer, int).unwrap());
    }

    #[test]
    fn test_array_assignability() {
        let model = CodeModel::new();
        let numbers = model.resolve("java.lang.Number[]").unwrap();
        let integers = model.resolve("java.lang.Integer[]").unwrap();
        let ints = model.resolve("int[]").unwrap();
        let longs = model.resolve("long[]").unwrap();
        let serializable = model.resolve("java.io.Serializable").unwrap();

        assert!(model.is_assignable_from(numbers, integers).unwrap());
        assert!(!model.is_assignable_from(integers, numbers).unwrap());
        assert!(!model.is_assignable_from(longs, ints).unwrap());
        assert!(model.is_assignable_from(serializable, ints).unwrap());
        assert!(model.is_assignable_from(model.object(), ints).unwrap());
    }

    #[test]
    fn test_parameterized_assignability() {
        let model = CodeModel::new();
        let list = model.resolve("java.util.List").unwrap();
        let number = model.resolve("java.lang.Number").unwrap();
        let integer = model.resolve("java.lang.Integer").unwrap();

        let list_number = model.narrow(list, &[number]).unwrap();
        let list_integer = model.narrow(list, &[integer]).unwrap();
        let list_extends_number = model
            .narrow(list, &[model.wildcard(number).unwrap()])
            .unwrap();
        let list_super_integer = model
            .narrow(list, &[model.wildcard_super(integer).unwrap()])
            .unwrap();

        assert!(model.is_assignable_from(list, list_integer).unwrap());
        assert!(!model.is_assignable_from(list_number, list_integer).unwrap());
        assert!(model.is_assignable_from(list_extends_number, list_integer).unwrap());
        assert!(model.is_assignable_from(list_super_integer, list_number).unwrap());
        assert!(!model.is_assignable_from(list_extends_number, list_super_integer).unwrap());
    }

    #[test]
    fn test_base_class() {
        let model = CodeModel::new();
        let list = model.resolve("java.util.List").unwrap();
        let string = model.resolve("java.lang.String").unwrap();

        let foo = model.define_class("p", "Foo", ClassKind::Interface).unwrap();
        let t = model.generify(foo, "T").unwrap();
        let list_t = model.narrow(list, &[t]).unwrap();
        model.add_interface(foo, model.narrow(list, &[list_t]).unwrap()).unwrap();

        let bar = model.define_class("p", "Bar", ClassKind::Interface).unwrap();
        model.add_interface(bar, model.narrow(foo, &[string]).unwrap()).unwrap();

        let found = model.base_class(bar, list).unwrap().unwrap();
        assert_eq!(model.name(found).unwrap(), "List<List<String>>");
        let found = model.base_class(bar, foo).unwrap().unwrap();
        assert_eq!(model.name(found).unwrap(), "Foo<String>");

        let date = model.resolve("java.util.Date").unwrap();
        assert_eq!(model.base_class(bar, date).unwrap(), None);
    }
}
