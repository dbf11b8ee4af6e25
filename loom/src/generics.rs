//! Type parameter lists of generic declarations.

use indexmap::IndexMap;

use crate::{CodeModel, Error, Formatter, Result, TypeId};

/// The type parameters a class or method declares, in declaration order.
///
/// # Example
///
/// ```
/// use typeloom::{CodeModel, Generics};
///
/// let model = CodeModel::new();
/// let mut generics = Generics::new();
/// let t = generics.introduce(&model, "T").unwrap();
///
/// assert_eq!(generics.parameters(), vec![t]);
/// assert!(generics.introduce(&model, "T").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generics {
    vars: IndexMap<String, TypeId>,
}

impl Generics {
    /// An empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an unbound type parameter.
    pub fn introduce(&mut self, model: &CodeModel, name: &str) -> Result<TypeId> {
        self.insert(model, name, None)
    }

    /// Declare a type parameter with an upper bound (`T extends Bound`).
    pub fn bounded_introduce(
        &mut self,
        model: &CodeModel,
        name: &str,
        bound: TypeId,
    ) -> Result<TypeId> {
        self.insert(model, name, Some(bound))
    }

    fn insert(&mut self, model: &CodeModel, name: &str, bound: Option<TypeId>) -> Result<TypeId> {
        if self.vars.contains_key(name) {
            return Err(Error::DuplicateTypeParameter {
                name: name.to_string(),
            }
            .into());
        }
        let var = model.type_var(name)?;
        if let Some(bound) = bound {
            model.set_bound(var, bound)?;
        }
        self.vars.insert(name.to_string(), var);
        Ok(var)
    }

    /// A snapshot of the declared variables.
    pub fn parameters(&self) -> Vec<TypeId> {
        self.vars.values().copied().collect()
    }

    /// The type variable declared under `name`.
    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.vars.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Print `<T, U extends Bound>`, or nothing when no variable is declared.
    pub fn declare(&self, f: &mut Formatter) {
        if self.vars.is_empty() {
            return;
        }
        f.print_char('<');
        for (i, var) in self.vars.values().enumerate() {
            if i > 0 {
                f.print_char(',');
            }
            f.type_param(*var);
        }
        f.close_type_args();
    }
}

/// A declaration that can introduce type parameters.
pub trait Generifiable {
    /// Declare an unbound type parameter.
    fn generify(&mut self, name: &str) -> Result<TypeId>;

    /// Declare a type parameter with an upper bound.
    fn generify_bounded(&mut self, name: &str, bound: TypeId) -> Result<TypeId>;

    /// The declared type parameters, in declaration order.
    fn type_params(&self) -> Vec<TypeId>;
}
