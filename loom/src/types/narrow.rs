//! Parameterized types, arrays and wildcards.

use super::{TypeData, TypeId, WildcardMode};
use crate::{CodeModel, Error, Result};

impl CodeModel {
    /// Parameterize `basis` with `args`, e.g. `List` with `[String]`.
    ///
    /// Primitive arguments are replaced by their boxed classes. Narrowing a
    /// type that is already narrowed appends `args` to its argument list; the
    /// basis of a narrowed type is never itself narrowed. The result is
    /// interned, so narrowing the same basis with the same arguments twice
    /// yields the same type.
    pub fn narrow(&self, basis: TypeId, args: &[TypeId]) -> Result<TypeId> {
        self.check(basis)?;
        for &arg in args {
            self.check(arg)?;
        }
        if args.is_empty() {
            return Err(Error::EmptyNarrowing {
                name: self.describe(basis),
            }
            .into());
        }
        self.require_reference(basis, "a narrowing basis")?;

        let mut boxed = Vec::with_capacity(args.len());
        for &arg in args {
            boxed.push(self.boxify(arg)?);
        }
        self.narrow_unchecked(basis, boxed)
    }

    /// Resolve every name in `args` and narrow `basis` with them.
    pub fn narrow_names(&self, basis: TypeId, args: &[&str]) -> Result<TypeId> {
        let args = args
            .iter()
            .map(|name| self.resolve_type(name))
            .collect::<Result<Vec<_>>>()?;
        self.narrow(basis, &args)
    }

    pub(crate) fn narrow_unchecked(&self, basis: TypeId, args: Vec<TypeId>) -> Result<TypeId> {
        let (basis, args) = match self.data(basis)? {
            TypeData::Narrowed {
                basis: inner,
                args: mut existing,
            } => {
                existing.extend(args);
                (inner, existing)
            }
            _ => (basis, args),
        };
        let owner = self.id();
        Ok(self.arena_mut().intern_narrowed(owner, basis, args))
    }

    /// Type arguments of a narrowed type; empty for any other type.
    pub fn type_args(&self, ty: TypeId) -> Result<Vec<TypeId>> {
        self.with_data(ty, |data| match data {
            TypeData::Narrowed { args, .. } => args.clone(),
            _ => Vec::new(),
        })
    }

    /// The array type with the given component type.
    pub fn array(&self, component: TypeId) -> Result<TypeId> {
        if component == self.void() {
            return Err(Error::PrimitiveNotAllowed {
                name: "void".to_string(),
                context: "an array component".to_string(),
            }
            .into());
        }
        self.check(component)?;
        let owner = self.id();
        Ok(self.arena_mut().intern_array(owner, component))
    }

    /// `? extends bound`, printed as `?` when the bound is the root type.
    pub fn wildcard(&self, bound: TypeId) -> Result<TypeId> {
        self.wildcard_with(bound, WildcardMode::Extends)
    }

    /// `? super bound`.
    pub fn wildcard_super(&self, bound: TypeId) -> Result<TypeId> {
        self.wildcard_with(bound, WildcardMode::Super)
    }

    pub(crate) fn wildcard_with(&self, bound: TypeId, mode: WildcardMode) -> Result<TypeId> {
        self.require_reference(bound, "a wildcard bound")?;
        let owner = self.id();
        Ok(self.arena_mut().intern_wildcard(owner, bound, mode))
    }

    /// Bound and direction of a wildcard.
    pub fn wildcard_bound(&self, ty: TypeId) -> Result<Option<(TypeId, WildcardMode)>> {
        self.with_data(ty, |data| match data {
            TypeData::Wildcard { bound, mode } => Some((*bound, *mode)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use typeloom_catalog::{ClassKind, Primitive};

    use crate::{CodeModel, Error, TypeKind};

    #[test]
    fn test_narrow_is_interned() {
        let model = CodeModel::new();
        let map = model.resolve("java.util.Map").unwrap();
        let a = model.narrow_names(map, &["java.lang.String", "java.lang.Integer"]).unwrap();
        let b = model.narrow_names(map, &["java.lang.String", "java.lang.Integer"]).unwrap();
        let c = model.narrow_names(map, &["java.lang.Integer", "java.lang.String"]).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(model.kind(a).unwrap(), TypeKind::Narrowed);
        assert_eq!(model.name(a).unwrap(), "Map<String,Integer>");
        assert_eq!(
            model.full_name(a).unwrap(),
            "java.util.Map<java.lang.String,java.lang.Integer>"
        );
    }

    #[test]
    fn test_narrow_boxes_primitives() {
        let model = CodeModel::new();
        let list = model.resolve("java.util.List").unwrap();
        let ints = model.narrow(list, &[model.primitive(Primitive::Int)]).unwrap();

        let integer = model.resolve("java.lang.Integer").unwrap();
        assert_eq!(model.type_args(ints).unwrap(), vec![integer]);
        assert_eq!(ints, model.narrow(list, &[integer]).unwrap());
    }

    #[test]
    fn test_narrow_appends_to_narrowed() {
        let model = CodeModel::new();
        let map = model.resolve("java.util.Map").unwrap();
        let string = model.resolve("java.lang.String").unwrap();
        let date = model.resolve("java.util.Date").unwrap();

        let partial = model.narrow(map, &[string]).unwrap();
        let full = model.narrow(partial, &[date]).unwrap();

        assert_eq!(model.erasure(full).unwrap(), map);
        assert_eq!(model.type_args(full).unwrap(), vec![string, date]);
        assert_eq!(full, model.narrow(map, &[string, date]).unwrap());
    }

    #[test]
    fn test_empty_narrowing() {
        let model = CodeModel::new();
        let list = model.resolve("java.util.List").unwrap();
        let err = model.narrow(list, &[]).unwrap_err();
        assert!(matches!(*err, Error::EmptyNarrowing { ref name } if name == "java.util.List"));
    }

    #[test]
    fn test_primitive_basis() {
        let model = CodeModel::new();
        let string = model.resolve("java.lang.String").unwrap();
        let err = model
            .narrow(model.primitive(Primitive::Int), &[string])
            .unwrap_err();
        assert!(matches!(*err, Error::PrimitiveNotAllowed { .. }));
    }

    #[test]
    fn test_narrow_defined_generic_class() {
        let model = CodeModel::new();
        let class = model.define_class("com.acme", "Pair", ClassKind::Class).unwrap();
        model.generify(class, "A").unwrap();
        model.generify(class, "B").unwrap();
        let string = model.resolve("java.lang.String").unwrap();

        let pair = model.narrow(class, &[string, string]).unwrap();
        assert_eq!(model.name(pair).unwrap(), "Pair<String,String>");
        assert_eq!(model.package(pair).unwrap().as_deref(), Some("com.acme"));
    }

    #[test]
    fn test_arrays() {
        let model = CodeModel::new();
        let string = model.resolve("java.lang.String").unwrap();
        let strings = model.array(string).unwrap();

        assert_eq!(strings, model.resolve("java.lang.String[]").unwrap());
        assert_eq!(model.name(strings).unwrap(), "String[]");
        assert_eq!(model.full_name(strings).unwrap(), "java.lang.String[]");
        assert_eq!(model.package(strings).unwrap().as_deref(), Some(""));
        assert!(model.array(model.void()).is_err());

        let matrix = model.array(model.primitive(Primitive::Int)).unwrap();
        let matrix = model.array(matrix).unwrap();
        assert_eq!(model.name(matrix).unwrap(), "int[][]");
    }

    #[test]
    fn test_wildcards() {
        let model = CodeModel::new();
        let number = model.resolve("java.lang.Number").unwrap();

        let any = model.wildcard(model.object()).unwrap();
        let upper = model.wildcard(number).unwrap();
        let lower = model.wildcard_super(number).unwrap();

        assert_eq!(model.name(any).unwrap(), "?");
        assert_eq!(model.name(upper).unwrap(), "? extends Number");
        assert_eq!(model.full_name(lower).unwrap(), "? super java.lang.Number");
        assert_eq!(upper, model.wildcard(number).unwrap());
        assert_eq!(model.package(upper).unwrap(), None);
    }
}
