//! Method and constructor declarations.

use typeloom_catalog::names;

use super::{Modifiers, Param, expr::VarRef, stmt::Block};
use crate::{
    CodeModel, Declaration, Error, Formatter, Generics, Generifiable, Result, Statement, TypeId,
};

/// A method, or a constructor when it has no return type.
pub struct MethodDecl {
    model: CodeModel,
    mods: Modifiers,
    generics: Generics,
    return_type: Option<TypeId>,
    name: String,
    params: Vec<Param>,
    throws: Vec<TypeId>,
    body: Option<Block>,
}

impl MethodDecl {
    /// A method returning `return_type` (which may be `void`).
    pub fn new(
        model: &CodeModel,
        mods: Modifiers,
        return_type: TypeId,
        name: &str,
    ) -> Result<Self> {
        model.check(return_type)?;
        Self::create(model, mods, Some(return_type), name)
    }

    /// A constructor of the class named `class_name`.
    pub fn constructor(model: &CodeModel, mods: Modifiers, class_name: &str) -> Result<Self> {
        Self::create(model, mods, None, class_name)
    }

    fn create(
        model: &CodeModel,
        mods: Modifiers,
        return_type: Option<TypeId>,
        name: &str,
    ) -> Result<Self> {
        if !names::is_identifier(name) {
            return Err(Error::InvalidIdentifier {
                name: name.to_string(),
                context: "method".to_string(),
            }
            .into());
        }
        Ok(Self {
            model: model.clone(),
            mods,
            generics: Generics::new(),
            return_type,
            name: name.to_string(),
            params: Vec::new(),
            throws: Vec::new(),
            body: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constructors have no return type.
    pub fn is_constructor(&self) -> bool {
        self.return_type.is_none()
    }

    pub fn return_type(&self) -> Option<TypeId> {
        self.return_type
    }

    /// Replace the return type, typically with a type variable of the method.
    pub fn returns(&mut self, ty: TypeId) -> Result<&mut Self> {
        self.model.check(ty)?;
        self.return_type = Some(ty);
        Ok(self)
    }

    /// Add a parameter and return a reference to it.
    pub fn param(&mut self, ty: TypeId, name: &str) -> Result<VarRef> {
        self.model.check(ty)?;
        self.params.push(Param::new(ty, name)?);
        Ok(VarRef::trusted(name))
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Declare a thrown exception type.
    pub fn throws(&mut self, ty: TypeId) -> Result<&mut Self> {
        self.model.require_reference(ty, "a thrown type")?;
        self.throws.push(ty);
        Ok(self)
    }

    /// The body, created empty on first access.
    pub fn body(&mut self) -> &mut Block {
        self.body.get_or_insert_with(Block::new)
    }

    /// Whether [`MethodDecl::body`] was called; bodiless methods end in `;`.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

impl Generifiable for MethodDecl {
    fn generify(&mut self, name: &str) -> Result<TypeId> {
        self.generics.introduce(&self.model, name)
    }

    fn generify_bounded(&mut self, name: &str, bound: TypeId) -> Result<TypeId> {
        self.generics.bounded_introduce(&self.model, name, bound)
    }

    fn type_params(&self) -> Vec<TypeId> {
        self.generics.parameters()
    }
}

impl Declaration for MethodDecl {
    fn declare(&self, f: &mut Formatter) {
        f.declaration(&self.mods);
        if !self.generics.is_empty() {
            f.space();
            self.generics.declare(f);
        }
        if let Some(return_type) = self.return_type {
            f.type_(return_type);
        }
        f.id(&self.name).print_char('(');
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.print_char(',');
            }
            f.declaration(param);
        }
        f.print_char(')');
        if !self.throws.is_empty() {
            f.print("throws").generables(&self.throws);
        }
        match &self.body {
            Some(body) => {
                f.statement(body);
            }
            None => {
                f.print_char(';').newline();
            }
        }
    }
}
