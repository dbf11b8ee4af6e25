//! Fields and method parameters.

use typeloom_catalog::names;

use super::{Modifiers, expr::VarRef};
use crate::{Declaration, Error, Formatter, Generable, Result, TypeId};

/// A field: `mods Type name = init;`.
pub struct FieldDecl {
    mods: Modifiers,
    ty: TypeId,
    name: String,
    init: Option<Box<dyn Generable>>,
}

impl FieldDecl {
    /// A field without initializer; `name` must be a valid identifier.
    pub fn new(mods: Modifiers, ty: TypeId, name: &str) -> Result<Self> {
        if !names::is_identifier(name) {
            return Err(Error::InvalidIdentifier {
                name: name.to_string(),
                context: "field".to_string(),
            }
            .into());
        }
        Ok(Self {
            mods,
            ty,
            name: name.to_string(),
            init: None,
        })
    }

    /// Set the initializer.
    pub fn init(&mut self, init: impl Generable + 'static) -> &mut Self {
        self.init = Some(Box::new(init));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// An unqualified reference to this field.
    pub fn var(&self) -> VarRef {
        VarRef::trusted(&self.name)
    }
}

impl std::fmt::Debug for FieldDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDecl")
            .field("mods", &self.mods)
            .field("ty", &self.ty)
            .field("name", &self.name)
            .field("init", &self.init.is_some())
            .finish()
    }
}

impl Declaration for FieldDecl {
    fn declare(&self, f: &mut Formatter) {
        f.declaration(&self.mods).type_(self.ty).id(&self.name);
        if let Some(init) = &self.init {
            f.print_char('=').generable(init);
        }
        f.print_char(';').newline();
    }
}

/// A method or constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    ty: TypeId,
    name: String,
}

impl Param {
    /// A parameter; `name` must be a valid identifier.
    pub fn new(ty: TypeId, name: &str) -> Result<Self> {
        if !names::is_identifier(name) {
            return Err(Error::InvalidIdentifier {
                name: name.to_string(),
                context: "parameter".to_string(),
            }
            .into());
        }
        Ok(Self {
            ty,
            name: name.to_string(),
        })
    }

    pub fn ty(&self) -> TypeId {
        self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Declaration for Param {
    fn declare(&self, f: &mut Formatter) {
        f.type_(self.ty).id(&self.name);
    }
}
