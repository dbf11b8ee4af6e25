//! Type variables and type-variable classes.

use typeloom_catalog::names;

use super::{TypeData, TypeId};
use crate::{CodeModel, Error, Result};

impl CodeModel {
    /// A fresh, unbound type variable.
    ///
    /// Every call creates a distinct variable, even for the same name; the
    /// `T` of one declaration is not the `T` of another.
    pub fn type_var(&self, name: &str) -> Result<TypeId> {
        if !names::is_identifier(name) {
            return Err(Error::InvalidIdentifier {
                name: name.to_string(),
                context: "type parameter".to_string(),
            }
            .into());
        }
        Ok(self.push(TypeData::TypeVar {
            name: name.to_string(),
            bound: None,
        }))
    }

    /// Give a type variable its upper bound. A variable is bound at most once.
    pub fn set_bound(&self, var: TypeId, bound: TypeId) -> Result<()> {
        self.require_reference(bound, "a type variable bound")?;
        let (name, existing) = match self.data(var)? {
            TypeData::TypeVar { name, bound } => (name, bound),
            _ => {
                return Err(Error::NotATypeVariable {
                    name: self.describe(var),
                }
                .into());
            }
        };
        if existing.is_some() {
            return Err(Error::BoundAlreadySet { name }.into());
        }
        self.with_data_mut(var, |data| {
            if let TypeData::TypeVar { bound: slot, .. } = data {
                *slot = Some(bound);
            }
        })
    }

    /// Upper bound of a type variable, if one was set.
    pub fn bound(&self, var: TypeId) -> Result<Option<TypeId>> {
        match self.data(var)? {
            TypeData::TypeVar { bound, .. } => Ok(bound),
            _ => Err(Error::NotATypeVariable {
                name: self.describe(var),
            }
            .into()),
        }
    }

    /// A variable-shaped stand-in for an existing class.
    ///
    /// It prints as the class' generic form (`Foo<T,U>` for a defined class
    /// `Foo` with parameters `T` and `U`) and names the class' erasure as its
    /// fully-qualified name.
    pub fn type_var_class(&self, wrapped: TypeId) -> Result<TypeId> {
        self.require_reference(wrapped, "a type variable class")?;
        Ok(self.push(TypeData::TypeVarClass { wrapped }))
    }

    /// The class a type-variable class stands in for.
    pub fn wrapped_class(&self, ty: TypeId) -> Result<TypeId> {
        match self.data(ty)? {
            TypeData::TypeVarClass { wrapped } => Ok(wrapped),
            _ => Err(Error::NotATypeVariable {
                name: self.describe(ty),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use typeloom_catalog::{ClassKind, Primitive};

    use crate::{CodeModel, Error, TypeKind};

    #[test]
    fn test_type_vars_are_distinct() {
        let model = CodeModel::new();
        let a = model.type_var("T").unwrap();
        let b = model.type_var("T").unwrap();
        assert_ne!(a, b);
        assert_eq!(model.name(a).unwrap(), "T");
        assert_eq!(model.full_name(a).unwrap(), "T");
        assert_eq!(model.package(a).unwrap(), None);
        assert_eq!(model.kind(a).unwrap(), TypeKind::TypeVar);
    }

    #[test]
    fn test_bound_once() {
        let model = CodeModel::new();
        let var = model.type_var("T").unwrap();
        let number = model.resolve("java.lang.Number").unwrap();

        assert_eq!(model.bound(var).unwrap(), None);
        model.set_bound(var, number).unwrap();
        assert_eq!(model.bound(var).unwrap(), Some(number));

        let err = model.set_bound(var, model.object()).unwrap_err();
        assert!(matches!(*err, Error::BoundAlreadySet { ref name } if name == "T"));
    }

    #[test]
    fn test_primitive_bound() {
        let model = CodeModel::new();
        let var = model.type_var("T").unwrap();
        let err = model
            .set_bound(var, model.primitive(Primitive::Int))
            .unwrap_err();
        assert!(matches!(*err, Error::PrimitiveNotAllowed { .. }));
    }

    #[test]
    fn test_invalid_name() {
        let model = CodeModel::new();
        assert!(model.type_var("1T").is_err());
        assert!(model.type_var("int").is_err());
    }

    #[test]
    fn test_type_var_class_names() {
        let model = CodeModel::new();
        let class = model.define_class("com.acme", "Foo", ClassKind::Class).unwrap();
        model.generify(class, "T").unwrap();
        model.generify(class, "U").unwrap();

        let var = model.type_var_class(class).unwrap();
        assert_eq!(model.name(var).unwrap(), "Foo<T,U>");
        assert_eq!(model.full_name(var).unwrap(), "com.acme.Foo");
        assert_eq!(model.package(var).unwrap().as_deref(), Some("com.acme"));
        assert_eq!(model.wrapped_class(var).unwrap(), class);
        assert!(model.wrapped_class(class).is_err());
    }
}
