//! Class declarations and their members.

use typeloom_catalog::ClassKind;

use super::{FieldDecl, MethodDecl, Modifiers};
use crate::{CodeModel, Declaration, Formatter, Generifiable, Result, TypeId};

/// A class defined in a model, with its members.
///
/// The class itself (name, kind, supertypes, type parameters) lives in the
/// model, so other declarations can refer to it by [`ClassDecl::ty`] before
/// it is complete. The members only exist here.
pub struct ClassDecl {
    model: CodeModel,
    ty: TypeId,
    mods: Modifiers,
    fields: Vec<FieldDecl>,
    methods: Vec<MethodDecl>,
    nested: Vec<ClassDecl>,
}

impl ClassDecl {
    /// Define a public top-level class.
    pub fn new(model: &CodeModel, package: &str, name: &str, kind: ClassKind) -> Result<Self> {
        let ty = model.define_class(package, name, kind)?;
        Ok(Self::wrap(model, ty, Modifiers::public()))
    }

    fn wrap(model: &CodeModel, ty: TypeId, mods: Modifiers) -> Self {
        Self {
            model: model.clone(),
            ty,
            mods,
            fields: Vec::new(),
            methods: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Define a public static class nested in this one.
    pub fn nested(&mut self, name: &str, kind: ClassKind) -> Result<&mut ClassDecl> {
        let ty = self.model.define_nested(self.ty, name, kind)?;
        let index = self.nested.len();
        self.nested
            .push(Self::wrap(&self.model, ty, Modifiers::public().static_()));
        Ok(&mut self.nested[index])
    }

    /// The type of this class.
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// The model the declared class lives in.
    pub fn model(&self) -> &CodeModel {
        &self.model
    }

    /// Replace the class modifiers.
    ///
    /// An `abstract` modifier is also recorded on the class in the model.
    pub fn modifiers(&mut self, mods: Modifiers) -> Result<&mut Self> {
        if mods.is_abstract {
            self.model.set_abstract(self.ty, true)?;
        }
        self.mods = mods;
        Ok(self)
    }

    /// Set the superclass.
    pub fn extends(&mut self, superclass: TypeId) -> Result<&mut Self> {
        self.model.set_superclass(self.ty, superclass)?;
        Ok(self)
    }

    /// Add an implemented interface; for an interface, an extended one.
    pub fn implements(&mut self, interface: TypeId) -> Result<&mut Self> {
        self.model.add_interface(self.ty, interface)?;
        Ok(self)
    }

    /// Declare a field and return it for further setup.
    pub fn field(&mut self, mods: Modifiers, ty: TypeId, name: &str) -> Result<&mut FieldDecl> {
        self.model.check(ty)?;
        let index = self.fields.len();
        self.fields.push(FieldDecl::new(mods, ty, name)?);
        Ok(&mut self.fields[index])
    }

    /// Declare a method and return it for further setup.
    pub fn method(
        &mut self,
        mods: Modifiers,
        return_type: TypeId,
        name: &str,
    ) -> Result<&mut MethodDecl> {
        let method = MethodDecl::new(&self.model, mods, return_type, name)?;
        Ok(self.push_method(method))
    }

    /// Declare a constructor named after the class.
    pub fn constructor(&mut self, mods: Modifiers) -> Result<&mut MethodDecl> {
        let name = self.model.name(self.ty)?;
        let method = MethodDecl::constructor(&self.model, mods, &name)?;
        Ok(self.push_method(method))
    }

    fn push_method(&mut self, method: MethodDecl) -> &mut MethodDecl {
        let index = self.methods.len();
        self.methods.push(method);
        &mut self.methods[index]
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    pub fn nested_classes(&self) -> &[ClassDecl] {
        &self.nested
    }
}

impl Generifiable for ClassDecl {
    fn generify(&mut self, name: &str) -> Result<TypeId> {
        self.model.generify(self.ty, name)
    }

    fn generify_bounded(&mut self, name: &str, bound: TypeId) -> Result<TypeId> {
        self.model.generify_bounded(self.ty, name, bound)
    }

    fn type_params(&self) -> Vec<TypeId> {
        self.model.type_params(self.ty).unwrap_or_default()
    }
}

impl Declaration for ClassDecl {
    fn declare(&self, f: &mut Formatter) {
        let model = self.model.clone();
        let Some(kind) = f.checked(model.class_kind(self.ty)).flatten() else {
            return;
        };
        let Some(name) = f.checked(model.name(self.ty)) else {
            return;
        };

        f.declaration(&self.mods).print(kind.keyword()).id(&name);
        if let Some(generics) = f.checked(model.generics(self.ty)) {
            generics.declare(f);
        }
        if let Some(Some(superclass)) = f.checked(model.superclass(self.ty)) {
            if superclass != model.object() {
                f.print("extends").type_(superclass);
            }
        }
        let interfaces = model
            .interfaces(self.ty)
            .and_then(|it| it.collect::<Result<Vec<_>>>());
        if let Some(interfaces) = f.checked(interfaces) {
            if !interfaces.is_empty() {
                f.print(if kind.is_interface() { "extends" } else { "implements" })
                    .generables(&interfaces);
            }
        }
        f.print_char('{').newline().indent();

        for field in &self.fields {
            f.declaration(field);
        }
        for method in &self.methods {
            f.newline().declaration(method);
        }
        for nested in &self.nested {
            f.newline().declaration(nested);
        }

        f.outdent().print_char('}').newline();
    }
}
